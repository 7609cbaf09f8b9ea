use std::collections::BTreeSet;

use tracing::debug;

use crate::menu::{ItemId, OverlayMenu};

/// Checked menu items. Lives next to the menu, never inside it, so a level
/// reload simply drops it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToggleState {
    checked: BTreeSet<ItemId>,
}

impl ToggleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_checked(&self, id: ItemId) -> bool {
        self.checked.contains(&id)
    }

    pub fn set(&mut self, id: ItemId, checked: bool) {
        if checked {
            self.checked.insert(id);
        } else {
            self.checked.remove(&id);
        }
    }

    pub fn checked(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.checked.iter().copied()
    }

    /// User toggle: writes `checked` to `id` and to everything nested under
    /// it, overwriting whatever the descendants held before. Parents are left
    /// alone.
    ///
    /// Returns the number of items written; zero when `id` is not in `menu`.
    pub fn on_toggle(&mut self, menu: &OverlayMenu, id: ItemId, checked: bool) -> usize {
        if menu.get(id).is_none() {
            return 0;
        }
        self.set(id, checked);
        let descendants = menu.descendants(id);
        for child in &descendants {
            self.set(*child, checked);
        }
        debug!(item = id.0, checked, cascaded = descendants.len(), "overlay toggled");
        descendants.len() + 1
    }
}
