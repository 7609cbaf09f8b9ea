//! Overlay taxonomy document (`overlays.json`) and the per-level monster
//! override (`<level>_MNov.json`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DocumentError, read_json};

/// Class of the top-level node whose children a monster override replaces.
pub const MONSTER_CLASS: &str = "monster";

/// `[offStyle, onStyle]` declaration blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct StylePair {
    pub off: String,
    pub on: String,
}

impl StylePair {
    pub fn new(off: impl Into<String>, on: impl Into<String>) -> Self {
        Self {
            off: off.into(),
            on: on.into(),
        }
    }

    pub fn pick(&self, on: bool) -> &str {
        if on { &self.on } else { &self.off }
    }
}

impl From<(String, String)> for StylePair {
    fn from((off, on): (String, String)) -> Self {
        Self { off, on }
    }
}

impl From<StylePair> for (String, String) {
    fn from(pair: StylePair) -> Self {
        (pair.off, pair.on)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StylePair>,
    /// Alternate-ruleset marker. Absent means "same as the level".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebellion: Option<bool>,
    #[serde(default, rename = "types", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OverlayNode>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl OverlayNode {
    pub fn class_name(&self) -> Option<&str> {
        non_empty(&self.class)
    }

    pub fn id_name(&self) -> Option<&str> {
        non_empty(&self.id)
    }

    pub fn selector_name(&self) -> Option<&str> {
        non_empty(&self.selector)
    }

    /// Menu label: `display`, then class, id and selector.
    pub fn label(&self) -> Option<&str> {
        non_empty(&self.display)
            .or_else(|| self.class_name())
            .or_else(|| self.id_name())
            .or_else(|| self.selector_name())
    }

    pub fn variant(&self, level_variant: bool) -> bool {
        self.rebellion.unwrap_or(level_variant)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayDocument {
    /// Document-wide default style pair.
    #[serde(default)]
    pub style: StylePair,
    #[serde(default)]
    pub types: Vec<OverlayNode>,
}

impl OverlayDocument {
    pub fn from_json_str(payload: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        read_json(path.as_ref())
    }
}

pub fn monster_override_from_json_str(payload: &str) -> Result<OverlayNode, DocumentError> {
    Ok(serde_json::from_str(payload)?)
}

pub fn load_monster_override(path: impl AsRef<Path>) -> Result<OverlayNode, DocumentError> {
    read_json(path.as_ref())
}

/// Replaces the children of every top-level `monster` node with the
/// override's children. The input is left untouched.
pub fn merge_monster_override(types: &[OverlayNode], monsters: &OverlayNode) -> Vec<OverlayNode> {
    types
        .iter()
        .map(|node| {
            if node.class_name() == Some(MONSTER_CLASS) {
                OverlayNode {
                    children: monsters.children.clone(),
                    ..node.clone()
                }
            } else {
                node.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{OverlayDocument, StylePair, merge_monster_override, monster_override_from_json_str};
    use pretty_assertions::assert_eq;

    const DOC: &str = r#"{
        "style": ["display: none;", "display: inline;"],
        "types": [
            {"display": "Doors", "class": "door", "style": ["opacity: 0;", "opacity: 1;"],
             "types": [{"class": "door-locked"}]},
            {"class": "monster", "types": [{"class": "monster-old"}]},
            {"display": "", "id": "background-grid"},
            {"selector": "polygon.lava", "rebellion": true}
        ]
    }"#;

    #[test]
    fn parses_nested_types_and_style_pairs() {
        let doc = OverlayDocument::from_json_str(DOC).unwrap();
        assert_eq!(doc.style, StylePair::new("display: none;", "display: inline;"));
        assert_eq!(doc.types.len(), 4);
        assert_eq!(doc.types[0].children[0].class_name(), Some("door-locked"));
        assert_eq!(doc.types[0].style.as_ref().unwrap().pick(true), "opacity: 1;");
        assert_eq!(doc.types[3].rebellion, Some(true));
    }

    #[test]
    fn label_falls_back_through_classifiers() {
        let doc = OverlayDocument::from_json_str(DOC).unwrap();
        assert_eq!(doc.types[0].label(), Some("Doors"));
        assert_eq!(doc.types[1].label(), Some("monster"));
        // Empty display counts as missing.
        assert_eq!(doc.types[2].label(), Some("background-grid"));
        assert_eq!(doc.types[3].label(), Some("polygon.lava"));
    }

    #[test]
    fn variant_inherits_from_level_when_absent() {
        let doc = OverlayDocument::from_json_str(DOC).unwrap();
        assert!(doc.types[0].variant(true));
        assert!(!doc.types[0].variant(false));
        assert!(doc.types[3].variant(false));
    }

    #[test]
    fn missing_fields_default() {
        let doc = OverlayDocument::from_json_str("{}").unwrap();
        assert!(doc.types.is_empty());
        assert_eq!(doc.style, StylePair::default());
    }

    #[test]
    fn monster_override_replaces_only_monster_children() {
        let doc = OverlayDocument::from_json_str(DOC).unwrap();
        let mnov = monster_override_from_json_str(
            r#"{"class": "monster", "types": [{"class": "monster-fighter"}, {"class": "monster-trooper"}]}"#,
        )
        .unwrap();
        let merged = merge_monster_override(&doc.types, &mnov);

        let names: Vec<_> = merged[1]
            .children
            .iter()
            .filter_map(|n| n.class_name())
            .collect();
        assert_eq!(names, vec!["monster-fighter", "monster-trooper"]);
        assert_eq!(merged[0], doc.types[0]);
        // Source document is not mutated.
        assert_eq!(doc.types[1].children[0].class_name(), Some("monster-old"));
    }
}
