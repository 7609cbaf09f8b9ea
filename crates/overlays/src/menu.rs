//! Overlay menu: the taxonomy filtered down to what the current level can
//! actually show.
//!
//! Items are stored flat, numbered in pre-order, so an [`ItemId`] doubles as
//! the item's position in the rendered list.

use std::fmt;

use formats::{OverlayAllowLists, OverlayNode};
use foundation::ClassifierKey;

use crate::hover::associated_lines_prefix;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u32);

impl ItemId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    /// Set for checkboxes; `None` for a plain group heading.
    pub key: Option<ClassifierKey>,
    /// Id prefix of remote line elements revealed while hovering.
    pub lines_prefix: Option<String>,
    pub parent: Option<ItemId>,
    pub children: Vec<ItemId>,
}

impl MenuItem {
    pub fn is_checkbox(&self) -> bool {
        self.key.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayMenu {
    items: Vec<MenuItem>,
    roots: Vec<ItemId>,
}

impl OverlayMenu {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn roots(&self) -> &[ItemId] {
        &self.roots
    }

    pub fn get(&self, id: ItemId) -> Option<&MenuItem> {
        self.items.get(id.index())
    }

    /// All items in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &MenuItem)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (ItemId(i as u32), item))
    }

    /// Checkbox items and the classifier key each one controls, in pre-order.
    pub fn checkboxes(&self) -> impl Iterator<Item = (ItemId, &ClassifierKey)> {
        self.iter()
            .filter_map(|(id, item)| item.key.as_ref().map(|key| (id, key)))
    }

    /// First checkbox controlling `key`.
    pub fn find(&self, key: &ClassifierKey) -> Option<ItemId> {
        self.checkboxes().find(|(_, k)| *k == key).map(|(id, _)| id)
    }

    /// Every item nested under `id`, at any depth, in pre-order.
    pub fn descendants(&self, id: ItemId) -> Vec<ItemId> {
        let mut out = Vec::new();
        let Some(item) = self.get(id) else {
            return out;
        };
        let mut stack: Vec<ItemId> = item.children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(child) = self.get(next) {
                stack.extend(child.children.iter().rev());
            }
        }
        out
    }

    pub fn depth(&self, id: ItemId) -> usize {
        let mut depth = 0;
        let mut cursor = self.get(id).and_then(|i| i.parent);
        while let Some(parent) = cursor {
            depth += 1;
            cursor = self.get(parent).and_then(|i| i.parent);
        }
        depth
    }

    /// Indented text rendering, one item per line.
    pub fn outline(&self, checked: impl Fn(ItemId) -> bool) -> String {
        let mut out = String::new();
        for (id, item) in self.iter() {
            let indent = "  ".repeat(self.depth(id));
            match &item.key {
                Some(key) => {
                    let mark = if checked(id) { "x" } else { " " };
                    out.push_str(&format!("{indent}[{mark}] {} ({key})\n", item.label));
                }
                None => out.push_str(&format!("{indent}{}\n", item.label)),
            }
        }
        out
    }

    fn push(&mut self, pending: Pending, parent: Option<ItemId>) -> ItemId {
        let id = ItemId(self.items.len() as u32);
        self.items.push(MenuItem {
            label: pending.label,
            lines_prefix: pending.key.as_ref().and_then(associated_lines_prefix),
            key: pending.key,
            parent,
            children: Vec::new(),
        });
        for child in pending.children {
            let child_id = self.push(child, Some(id));
            self.items[id.index()].children.push(child_id);
        }
        id
    }
}

struct Pending {
    label: String,
    key: Option<ClassifierKey>,
    children: Vec<Pending>,
}

/// Renders the taxonomy for one level.
///
/// A node is skipped when its variant differs from `active_variant`. It gets
/// a checkbox when one of its classifiers is on the level's allow-lists
/// (class first, then id, then selector). A node with neither a checkbox nor
/// surviving children is dropped.
pub fn render_overlay_list(
    roots: &[OverlayNode],
    allow: &OverlayAllowLists,
    active_variant: bool,
) -> OverlayMenu {
    let pending = render_nodes(roots, allow, active_variant);
    let mut menu = OverlayMenu::default();
    for node in pending {
        let id = menu.push(node, None);
        menu.roots.push(id);
    }
    menu
}

fn render_nodes(nodes: &[OverlayNode], allow: &OverlayAllowLists, variant: bool) -> Vec<Pending> {
    let mut out = Vec::new();
    for node in nodes {
        if node.variant(variant) != variant {
            continue;
        }
        let key = registrable_key(node, allow);
        let children = render_nodes(&node.children, allow, variant);
        if key.is_none() && children.is_empty() {
            continue;
        }
        out.push(Pending {
            label: node.label().unwrap_or_default().to_string(),
            key,
            children,
        });
    }
    out
}

fn registrable_key(node: &OverlayNode, allow: &OverlayAllowLists) -> Option<ClassifierKey> {
    if let Some(class) = node.class_name()
        && allow.classes.contains(class)
    {
        return Some(ClassifierKey::class(class));
    }
    if let Some(id) = node.id_name()
        && allow.ids.contains(id)
    {
        return Some(ClassifierKey::id(id));
    }
    if let Some(selector) = node.selector_name()
        && allow.selectors.contains(selector)
    {
        return Some(ClassifierKey::selector(selector));
    }
    None
}
