use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;
use urania::ephemeris::ChartLayer;

/// clap value parser for RFC 3339 instants.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 instant like 2024-03-01T12:00:00Z: {e}"))
}

/// Read a chart layer from a JSON file.
///
/// Point ids are lowercased to match the ids the engine fetches.
pub fn read_layer(path: &Path) -> anyhow::Result<ChartLayer> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read chart {}", path.display()))?;
    let mut layer: ChartLayer = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse chart {}", path.display()))?;
    for body in &mut layer.bodies {
        body.id = body.id.to_lowercase();
    }
    Ok(layer.with_angles())
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{out}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_instant() {
        let t = parse_instant("2024-03-01T14:00:00+02:00").unwrap();
        assert_eq!(t.to_rfc3339(), "2024-03-01T12:00:00+00:00");
        assert!(parse_instant("yesterday").is_err());
    }

    #[test]
    fn test_read_layer_adds_angles() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "bodies": [{{"id": "sun", "longitude": 45.0, "speed": 0.98}}],
                "houses": {{
                    "cusps": [15, 45, 75, 105, 135, 165, 195, 225, 255, 285, 315, 345],
                    "ascendant": 15.0,
                    "midheaven": 285.0
                }}
            }}"#
        )
        .unwrap();

        let layer = read_layer(file.path()).unwrap();
        assert_eq!(layer.len(), 5);
        assert!(layer.get("asc").unwrap().is_angle());
        assert!(!layer.get("sun").unwrap().is_angle());
    }

    #[test]
    fn test_read_layer_lowercases_ids() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"bodies": [{{"id": "Pluto", "longitude": 10.0, "speed": 0.01}}]}}"#
        )
        .unwrap();

        let layer = read_layer(file.path()).unwrap();
        assert!(layer.get("pluto").is_some());
        assert!(layer.get("Pluto").is_none());
    }

    #[test]
    fn test_read_layer_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = read_layer(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse chart"));
    }
}
