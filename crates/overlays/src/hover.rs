//! Transient hover highlighting.
//!
//! Hovering a menu item forces the item and everything under it into the
//! "on" style, plus any remote line elements the item is associated with
//! (switches and terminals draw lines to what they control). Nothing here
//! touches [`ToggleState`].

use std::collections::BTreeSet;

use foundation::{ClassifierKey, ClassifierKind};

use crate::menu::{ItemId, OverlayMenu};
use crate::toggles::ToggleState;

const TERMINAL_SUFFIX: &str = "-computer_terminal";
const TERMINAL_LINES: &str = "panel-terminal_teleport";
const SWITCH_SUFFIX: &str = "_switch";

/// Document-side lookup of element ids by prefix.
pub trait LinesLookup {
    fn element_ids_with_prefix(&self, prefix: &str) -> Vec<String>;
}

/// Sorted in-memory set of element ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementIndex {
    ids: BTreeSet<String>,
}

impl ElementIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids of every `<g>` element in an SVG document. Line overlays are
    /// drawn as groups, so other elements are not candidates.
    pub fn from_svg_str(svg: &str) -> Result<Self, roxmltree::Error> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let doc = roxmltree::Document::parse_with_options(svg, options)?;
        Ok(doc
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "g")
            .filter_map(|n| n.attribute("id"))
            .filter(|id| !id.is_empty())
            .collect())
    }
}

impl<S: Into<String>> FromIterator<S> for ElementIndex {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl LinesLookup for ElementIndex {
    fn element_ids_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.ids
            .range(prefix.to_string()..)
            .take_while(|id| id.starts_with(prefix))
            .cloned()
            .collect()
    }
}

/// Lookup for callers without a document (no lines).
impl LinesLookup for () {
    fn element_ids_with_prefix(&self, _prefix: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Line-element id prefix associated with a checkbox, by naming convention:
/// `*-computer_terminal` classes point at the teleport panel lines,
/// `*_switch` classes at their own lines.
pub fn associated_lines_prefix(key: &ClassifierKey) -> Option<String> {
    if key.kind() != ClassifierKind::Class {
        return None;
    }
    let name = key.name();
    let target = if name.ends_with(TERMINAL_SUFFIX) {
        TERMINAL_LINES
    } else if name.ends_with(SWITCH_SUFFIX) {
        name
    } else {
        return None;
    };
    Some(format!("{}_lines_", target.replace('-', "_")))
}

/// Items and line elements to draw "on" for one composition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverSet {
    pub items: BTreeSet<ItemId>,
    pub lines: BTreeSet<String>,
}

impl HoverSet {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.lines.is_empty()
    }

    pub fn contains_item(&self, id: ItemId) -> bool {
        self.items.contains(&id)
    }
}

/// `id` and every item nested under it. When `hovering` is false a checked
/// item (and its subtree) is left out, so ending a hover never reverts
/// something the user checked.
pub fn gather_hovered_items(
    menu: &OverlayMenu,
    toggles: &ToggleState,
    id: ItemId,
    hovering: bool,
) -> Vec<ItemId> {
    let mut out = Vec::new();
    gather_into(menu, toggles, id, hovering, &mut out);
    out
}

fn gather_into(
    menu: &OverlayMenu,
    toggles: &ToggleState,
    id: ItemId,
    hovering: bool,
    out: &mut Vec<ItemId>,
) {
    let Some(item) = menu.get(id) else {
        return;
    };
    if !hovering && toggles.is_checked(id) {
        return;
    }
    out.push(id);
    for child in &item.children {
        gather_into(menu, toggles, *child, hovering, out);
    }
}

/// Hover enter/leave on a menu item. Leaving yields an empty set: the
/// stylesheet falls back to the persisted toggles.
pub fn on_hover(
    menu: &OverlayMenu,
    toggles: &ToggleState,
    lines: &dyn LinesLookup,
    id: ItemId,
    hovering: bool,
) -> HoverSet {
    let mut set = HoverSet::default();
    if !hovering {
        return set;
    }
    if let Some(prefix) = menu.get(id).and_then(|item| item.lines_prefix.as_deref()) {
        set.lines.extend(lines.element_ids_with_prefix(prefix));
    }
    set.items
        .extend(gather_hovered_items(menu, toggles, id, hovering));
    set
}
