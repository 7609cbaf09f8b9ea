//! Level geometry document (`<level>.json`).

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DocumentError, read_json};

fn default_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElevationRange {
    pub floor: f64,
    pub ceiling: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStart {
    #[serde(default)]
    pub index: i64,
    /// Floor height of the starting polygon, in world units.
    pub elevation: f64,
}

/// Classifiers present in the level's SVG; only these get a menu checkbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayAllowLists {
    #[serde(default)]
    pub classes: BTreeSet<String>,
    #[serde(default)]
    pub ids: BTreeSet<String>,
    #[serde(default)]
    pub selectors: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonRecord {
    /// `null` heights are written for polygons the exporter never sized.
    #[serde(default)]
    pub floor_height: Option<f64>,
    #[serde(default)]
    pub ceiling_height: Option<f64>,
    #[serde(default)]
    pub connections: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDocument {
    #[serde(default = "default_scale")]
    pub scale: f64,
    pub elevation: ElevationRange,
    #[serde(default, rename = "viewBox")]
    pub view_box: BTreeMap<String, String>,
    #[serde(default)]
    pub player: Vec<PlayerStart>,
    #[serde(default)]
    pub overlays: OverlayAllowLists,
    #[serde(default)]
    pub polygons: BTreeMap<String, PolygonRecord>,
    #[serde(default)]
    pub rebellion: bool,
}

impl LevelDocument {
    pub fn from_json_str(payload: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        read_json(path.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::LevelDocument;

    #[test]
    fn parses_exporter_output() {
        let doc = LevelDocument::from_json_str(
            r#"{
                "scale": 2,
                "elevation": {"floor": -0.25, "ceiling": 1.5},
                "viewBox": {"map": "-1 -1 2 2"},
                "player": [{"index": 0, "elevation": 0.125}],
                "overlays": {"classes": ["door"], "ids": ["background-grid"], "selectors": []},
                "polygons": {
                    "0": {"floor_height": 0, "ceiling_height": 1, "connections": ["l1", "l2"]},
                    "1": {"floor_height": null, "ceiling_height": null}
                },
                "rebellion": true
            }"#,
        )
        .unwrap();
        assert_eq!(doc.scale, 2.0);
        assert_eq!(doc.elevation.ceiling, 1.5);
        assert_eq!(doc.view_box["map"], "-1 -1 2 2");
        assert_eq!(doc.player[0].elevation, 0.125);
        assert!(doc.overlays.classes.contains("door"));
        assert_eq!(doc.polygons["0"].connections, vec!["l1", "l2"]);
        assert_eq!(doc.polygons["1"].floor_height, None);
        assert!(doc.polygons["1"].connections.is_empty());
        assert!(doc.rebellion);
    }

    #[test]
    fn optional_sections_default() {
        let doc =
            LevelDocument::from_json_str(r#"{"elevation": {"floor": 0, "ceiling": 1}}"#).unwrap();
        assert_eq!(doc.scale, 1.0);
        assert!(doc.polygons.is_empty());
        assert!(doc.overlays.classes.is_empty());
        assert!(!doc.rebellion);
    }

    #[test]
    fn elevation_is_required() {
        assert!(LevelDocument::from_json_str("{}").is_err());
    }
}
