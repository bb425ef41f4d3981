use serde_json::Value as JsonValue;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::{PackvizError, Result};

/// Load a host context from disk.
///
/// - `.json` / `.yaml` / `.yml` file: parsed as the context itself.
/// - Directory: every JSON/YAML file below it (sorted by file name) is one
///   record, wrapped as `{ "records": [ ... ] }`.
pub fn load_context(path: &Path) -> Result<JsonValue> {
    if path.is_dir() {
        return load_record_dir(path);
    }

    let extension = extension_of(path);
    if !is_snapshot_extension(&extension) {
        return Err(PackvizError::InvalidInput(format!(
            "Unsupported snapshot file: {}",
            path.display()
        )));
    }

    let ctx = parse_file(path, &extension)?;
    log::info!("Loaded context from {}", path.display());
    Ok(ctx)
}

fn load_record_dir(root: &Path) -> Result<JsonValue> {
    let mut records = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let extension = extension_of(path);
        if !is_snapshot_extension(&extension) {
            continue;
        }

        records.push(parse_file(path, &extension)?);
    }

    log::info!("Loaded {} record files from {}", records.len(), root.display());
    Ok(serde_json::json!({ "records": records }))
}

fn parse_file(path: &Path, extension: &str) -> Result<JsonValue> {
    let content = std::fs::read_to_string(path)?;
    let value: JsonValue = match extension {
        "json" => serde_json::from_str(&content)?,
        _ => serde_yaml_ng::from_str(&content)?,
    };
    Ok(value)
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn is_snapshot_extension(extension: &str) -> bool {
    matches!(extension, "json" | "yaml" | "yml")
}
