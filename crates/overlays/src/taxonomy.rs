use formats::{OverlayDocument, OverlayNode, StylePair, merge_monster_override};
use foundation::ClassifierKey;

use crate::style_map::{StyleMap, build_style_map};

/// Immutable overlay tree for one level with its resolved styles.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    roots: Vec<OverlayNode>,
    default_style: StylePair,
    style_map: StyleMap,
}

impl Taxonomy {
    pub fn new(document: OverlayDocument) -> Self {
        Self::with_monster_override(document, None)
    }

    /// Builds the tree with the level's monster list spliced in. The override
    /// node's own style, if any, is registered too.
    pub fn with_monster_override(
        document: OverlayDocument,
        monsters: Option<&OverlayNode>,
    ) -> Self {
        let OverlayDocument { style, types } = document;
        let roots = match monsters {
            Some(m) => merge_monster_override(&types, m),
            None => types,
        };

        let mut style_map = build_style_map(&roots);
        if let Some(m) = monsters {
            style_map.extend_from(std::slice::from_ref(m));
        }

        Self {
            roots,
            default_style: style,
            style_map,
        }
    }

    pub fn roots(&self) -> &[OverlayNode] {
        &self.roots
    }

    pub fn default_style(&self) -> &StylePair {
        &self.default_style
    }

    pub fn style_map(&self) -> &StyleMap {
        &self.style_map
    }

    /// `[off, on]` pair for `key`: its own override or the default pair.
    pub fn style_for(&self, key: &ClassifierKey) -> &StylePair {
        self.style_map.resolve(key, &self.default_style)
    }
}
