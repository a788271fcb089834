//! World definition loading.
//!
//! Location and character records are JSON arrays. A missing file is not an
//! error: the forest fills every tile without location records, and a world
//! without characters simply has no autonomous actors.

use std::path::Path;

use serde::de::DeserializeOwned;
use textworld_types::{CharacterRecord, LocationRecord};
use tracing::{info, warn};

use crate::error::EngineError;

/// Load location records from `path`.
pub fn load_locations(path: &str) -> Result<Vec<LocationRecord>, EngineError> {
    load_records(path, "locations")
}

/// Load character records from `path`.
pub fn load_characters(path: &str) -> Result<Vec<CharacterRecord>, EngineError> {
    load_records(path, "characters")
}

fn load_records<T: DeserializeOwned>(path: &str, kind: &str) -> Result<Vec<T>, EngineError> {
    if !Path::new(path).exists() {
        warn!(path, kind, "Asset file not found, starting without records");
        return Ok(Vec::new());
    }
    let contents = std::fs::read_to_string(path).map_err(|source| EngineError::AssetIo {
        path: path.to_owned(),
        source,
    })?;
    let records = parse_records::<T>(&contents).map_err(|source| EngineError::AssetFormat {
        path: path.to_owned(),
        source,
    })?;
    info!(path, kind, count = records.len(), "Assets loaded");
    Ok(records)
}

/// Parse a JSON array of records.
fn parse_records<T: DeserializeOwned>(json: &str) -> Result<Vec<T>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_defaults_fill_missing_fields() {
        let records = parse_records::<LocationRecord>(r#"[{"name": "The Shack"}]"#);
        assert!(records.is_ok());
        if let Ok(records) = records {
            assert_eq!(records.len(), 1);
            let shack = records.first();
            assert_eq!(shack.map(|r| r.description.as_str()), Some("A location"));
            assert_eq!(shack.map(|r| r.display_color.as_str()), Some("green"));
        }
    }

    #[test]
    fn characters_parse_with_facts() {
        let json = r#"[{"name": "Mary", "public_facts": ["Wears a red coat"], "private_facts": ["Keeps bees"]}]"#;
        let records = parse_records::<CharacterRecord>(json);
        assert!(records.is_ok());
        if let Ok(records) = records {
            assert_eq!(records.first().map(|r| r.private_facts.len()), Some(1));
        }
    }

    #[test]
    fn malformed_assets_are_rejected() {
        assert!(parse_records::<LocationRecord>("{\"name\": 3}").is_err());
    }

    #[test]
    fn missing_file_is_empty() {
        let records = load_characters("/nonexistent/textworld/characters.json");
        assert!(records.is_ok());
        assert!(records.unwrap_or_default().is_empty());
    }

    #[test]
    fn shipped_assets_parse() {
        let locations = include_str!("../../../assets/locations.json");
        let characters = include_str!("../../../assets/characters.json");
        assert!(parse_records::<LocationRecord>(locations).is_ok());
        assert!(parse_records::<CharacterRecord>(characters).is_ok());
    }
}
