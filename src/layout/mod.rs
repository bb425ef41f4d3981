//! Radial layout: one center node and N satellites evenly spaced on a circle.
//!
//! Properties:
//! - Deterministic (no randomness, no overlap avoidance)
//! - Satellite 0 sits due east; angles increase in screen coordinates
//! - Labels are truncated only in the display projection

mod radial;

pub use radial::{layout, satellite_angle, truncate_label};

use serde::Serialize;

use crate::graph::LinkRole;

/// Ellipsis appended to truncated display labels.
pub const ELLIPSIS: char = '\u{2026}';

/// Planar coordinate in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn midpoint(&self) -> Point {
        Point {
            x: self.width / 2.0,
            y: self.height / 2.0,
        }
    }
}

/// Role of a node in the rendered graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Center,
    Known,
    Missing,
}

impl From<LinkRole> for NodeRole {
    fn from(role: LinkRole) -> Self {
        match role {
            LinkRole::Known => NodeRole::Known,
            LinkRole::Missing => NodeRole::Missing,
        }
    }
}

/// A positioned node. `label` is never truncated; `display_label` is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub key: String,
    pub label: String,
    pub display_label: String,
    pub role: NodeRole,
    pub position: Point,
}

/// Result of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialLayout {
    pub canvas: Canvas,
    pub radius: f64,
    pub center: LayoutNode,
    pub satellites: Vec<LayoutNode>,
}

impl RadialLayout {
    /// Center -> satellite segments, one per satellite, in satellite order.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.satellites
            .iter()
            .map(move |s| (self.center.position, s.position))
    }
}
