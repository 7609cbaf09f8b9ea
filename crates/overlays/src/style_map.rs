use std::collections::BTreeMap;

use formats::{OverlayNode, StylePair};
use foundation::{ClassifierKey, ClassifierKind};

/// Classifier key -> `[off, on]` style pair, flattened from the taxonomy.
///
/// Keys without an entry use the document-wide default pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
    entries: BTreeMap<ClassifierKey, StylePair>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &ClassifierKey) -> Option<&StylePair> {
        self.entries.get(key)
    }

    pub fn resolve<'a>(&'a self, key: &ClassifierKey, default: &'a StylePair) -> &'a StylePair {
        self.entries.get(key).unwrap_or(default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ClassifierKey, &StylePair)> {
        self.entries.iter()
    }

    /// Registers every styled node of `roots`, depth-first in document order.
    /// A later node with the same key replaces an earlier one.
    pub fn extend_from(&mut self, roots: &[OverlayNode]) {
        let mut stack: Vec<&OverlayNode> = roots.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if let Some(style) = &node.style {
                for key in classifier_keys(node) {
                    self.entries.insert(key, style.clone());
                }
            }
            stack.extend(node.children.iter().rev());
        }
    }
}

pub fn build_style_map(roots: &[OverlayNode]) -> StyleMap {
    let mut map = StyleMap::new();
    map.extend_from(roots);
    map
}

/// Every populated classifier of `node`, in class/id/selector order.
pub fn classifier_keys(node: &OverlayNode) -> impl Iterator<Item = ClassifierKey> + '_ {
    ClassifierKind::ALL.into_iter().filter_map(move |kind| {
        let name = match kind {
            ClassifierKind::Class => node.class_name(),
            ClassifierKind::Id => node.id_name(),
            ClassifierKind::Selector => node.selector_name(),
        };
        name.map(|n| ClassifierKey::new(kind, n))
    })
}
