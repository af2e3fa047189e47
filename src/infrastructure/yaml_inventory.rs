//! YAML inventory loader
//!
//! Decodes the raw document into an `Inventory`, fingerprints the exact
//! bytes, and collects non-fatal warnings (unknown keys, duplicate names).

use crate::config::suggest;
use crate::domain::entities::Inventory;
use crate::domain::value_objects::{ConfigWarning, ContentHash};
use crate::error::{Error, Result};

/// Keys the inventory schema understands, used for typo suggestions
const KNOWN_KEYS: &[&str] = &["hosts", "name", "address", "user", "docker_compose", "path"];

/// Decoded inventory plus everything derived from the raw bytes
#[derive(Debug, Clone)]
pub struct LoadedInventory {
    pub inventory: Inventory,
    pub hash: ContentHash,
    pub warnings: Vec<ConfigWarning>,
}

/// Decode an inventory document.
///
/// The hash always covers the bytes exactly as read, before any parsing.
pub fn load_inventory(raw: &[u8]) -> Result<LoadedInventory> {
    let hash = ContentHash::from_bytes(raw);
    let content = std::str::from_utf8(raw)
        .map_err(|e| Error::Validation(format!("config file is not valid UTF-8: {}", e)))?;

    if is_blank_document(content) {
        return Ok(LoadedInventory {
            inventory: Inventory::default(),
            hash,
            warnings: Vec::new(),
        });
    }

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = serde_yaml_ng::Deserializer::from_str(content);
    let inventory: Inventory = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })?;

    let mut warnings: Vec<ConfigWarning> = unknown_paths
        .into_iter()
        .map(|path| {
            let key = path
                .split('.')
                .next_back()
                .unwrap_or(path.as_str())
                .to_string();
            ConfigWarning::UnknownKey {
                line: find_key_line(content, &key),
                suggestion: suggest(&key, KNOWN_KEYS).map(str::to_string),
                path,
            }
        })
        .collect();

    warnings.extend(
        inventory
            .duplicate_names()
            .into_iter()
            .map(|name| ConfigWarning::DuplicateHost { name }),
    );

    Ok(LoadedInventory {
        inventory,
        hash,
        warnings,
    })
}

/// Only whitespace, comments and document markers
fn is_blank_document(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

/// First line that defines `key` as a mapping key (1-indexed)
fn find_key_line(content: &str, key: &str) -> Option<usize> {
    content.lines().enumerate().find_map(|(i, line)| {
        let trimmed = line.trim_start().trim_start_matches("- ").trim_start();
        let rest = trimmed.strip_prefix(key)?;
        rest.trim_start().starts_with(':').then_some(i + 1)
    })
}
