pub mod config;
pub mod error;
pub mod record;
pub mod links;
pub mod hierarchy;
pub mod graph;
pub mod layout;
pub mod host;
pub mod views;

pub use config::Config;
pub use error::{PackvizError, Result};
pub use graph::{build_outgoing, LinkRole, RecordIndex, ResolvedLink};
pub use hierarchy::{outline, ChildIndex, OutlineNode};
pub use layout::{layout, LayoutNode, NodeRole, RadialLayout};
pub use links::{extract_all_links, extract_tokens};
pub use record::{display_name, is_reference_token, key_of, FieldValue, Record, RecordKey};
pub use views::{DenRoster, OutgoingList, RosterMember, ViewRenderer, ViewResult};
