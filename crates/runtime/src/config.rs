use serde::{Deserialize, Deserializer};

use overlays::HIDDEN_DECLARATION;
use scene::VisibilityMode;

/// Viewer settings. Every field is optional in the JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Id of the `<style>` node inside the SVG document that receives the
    /// composed stylesheet.
    pub style_node_id: String,
    /// Id of the `<object>` element hosting the SVG.
    pub object_id: String,
    #[serde(deserialize_with = "deserialize_mode")]
    pub visibility_mode: VisibilityMode,
    pub hidden_declaration: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            style_node_id: "dynamic-style".to_string(),
            object_id: "map_object".to_string(),
            visibility_mode: VisibilityMode::default(),
            hidden_declaration: HIDDEN_DECLARATION.to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

fn deserialize_mode<'de, D: Deserializer<'de>>(d: D) -> Result<VisibilityMode, D::Error> {
    let raw = String::deserialize(d)?;
    raw.parse().map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::ViewerConfig;
    use scene::VisibilityMode;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = ViewerConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, ViewerConfig::default());
        assert_eq!(cfg.style_node_id, "dynamic-style");
        assert_eq!(cfg.visibility_mode, VisibilityMode::Intersection);
    }

    #[test]
    fn overrides_mode_and_node() {
        let cfg = ViewerConfig::from_json_str(
            r#"{"visibility_mode": "contained", "style_node_id": "overlay-style"}"#,
        )
        .unwrap();
        assert_eq!(cfg.visibility_mode, VisibilityMode::Contained);
        assert_eq!(cfg.style_node_id, "overlay-style");
        assert_eq!(cfg.object_id, "map_object");
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(ViewerConfig::from_json_str(r#"{"visibility_mode": "sideways"}"#).is_err());
    }
}
