use std::collections::BTreeSet;

use foundation::{ClassifierKey, ConnectorId};
use tracing::debug;

use crate::hover::HoverSet;
use crate::menu::OverlayMenu;
use crate::taxonomy::Taxonomy;
use crate::toggles::ToggleState;

pub const HIDDEN_DECLARATION: &str = "display: none;";

/// Snapshot of everything one stylesheet is composed from.
#[derive(Debug, Clone, Copy)]
pub struct StyleInputs<'a> {
    pub menu: &'a OverlayMenu,
    pub taxonomy: &'a Taxonomy,
    pub toggles: &'a ToggleState,
    pub hover: &'a HoverSet,
    pub hidden: &'a BTreeSet<ConnectorId>,
    pub hidden_declaration: &'a str,
}

pub fn rule(selector: &str, declarations: &str) -> String {
    format!("{selector} {{{declarations}}}")
}

/// Composes the dynamic stylesheet.
///
/// Rule order is fixed: one rule per checkbox in menu order (hovered items
/// use their "on" style), then the hovered line elements sorted by id, then
/// one hiding rule per hidden connector sorted by id. The same inputs always
/// produce the same bytes.
pub fn compose(inputs: &StyleInputs<'_>) -> String {
    let mut rules: Vec<String> = Vec::with_capacity(inputs.menu.len() + inputs.hidden.len());

    for (id, key) in inputs.menu.checkboxes() {
        let on = inputs.toggles.is_checked(id) || inputs.hover.contains_item(id);
        let pair = inputs.taxonomy.style_for(key);
        rules.push(rule(&key.to_css_selector(), pair.pick(on)));
    }

    for line in &inputs.hover.lines {
        let selector = ClassifierKey::id(line.as_str()).to_css_selector();
        rules.push(rule(&selector, &inputs.taxonomy.default_style().on));
    }

    for connector in inputs.hidden {
        let selector = ClassifierKey::id(connector.as_str()).to_css_selector();
        rules.push(rule(&selector, inputs.hidden_declaration));
    }

    debug!(
        rules = rules.len(),
        hidden = inputs.hidden.len(),
        hovered = inputs.hover.items.len(),
        "stylesheet composed"
    );

    rules.retain(|r| !r.is_empty());
    rules.join("\n")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{HIDDEN_DECLARATION, StyleInputs, compose, rule};
    use crate::hover::HoverSet;
    use crate::menu::{ItemId, OverlayMenu, render_overlay_list};
    use crate::taxonomy::Taxonomy;
    use crate::toggles::ToggleState;
    use formats::{OverlayAllowLists, OverlayDocument};
    use foundation::ConnectorId;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const DOC: &str = r#"{
        "style": ["display: none;", "display: inline;"],
        "types": [
            {"display": "Doors", "class": "door", "style": ["opacity: 0;", "opacity: 1;"], "types": [
                {"class": "door-secret"}
            ]},
            {"id": "background-grid"},
            {"selector": "polygon.lava"},
            {"class": "light_switch"}
        ]
    }"#;

    struct Fixture {
        menu: OverlayMenu,
        taxonomy: Taxonomy,
    }

    fn fixture() -> Fixture {
        let doc = OverlayDocument::from_json_str(DOC).unwrap();
        let allow = OverlayAllowLists {
            classes: ["door", "door-secret", "light_switch"]
                .into_iter()
                .map(String::from)
                .collect(),
            ids: ["background-grid".to_string()].into_iter().collect(),
            selectors: ["polygon.lava".to_string()].into_iter().collect(),
        };
        let taxonomy = Taxonomy::new(doc);
        Fixture {
            menu: render_overlay_list(taxonomy.roots(), &allow, false),
            taxonomy,
        }
    }

    fn inputs<'a>(
        f: &'a Fixture,
        toggles: &'a ToggleState,
        hover: &'a HoverSet,
        hidden: &'a BTreeSet<ConnectorId>,
    ) -> StyleInputs<'a> {
        StyleInputs {
            menu: &f.menu,
            taxonomy: &f.taxonomy,
            toggles,
            hover,
            hidden,
            hidden_declaration: HIDDEN_DECLARATION,
        }
    }

    #[test]
    fn rule_format() {
        assert_eq!(rule(".door", "opacity: 1;"), ".door {opacity: 1;}");
    }

    #[test]
    fn composes_checkbox_and_connector_rules() {
        let f = fixture();
        let mut toggles = ToggleState::new();
        toggles.on_toggle(&f.menu, ItemId(0), true);
        let hidden: BTreeSet<ConnectorId> =
            [ConnectorId::new("line_9"), ConnectorId::new("line_10")].into_iter().collect();

        let css = compose(&inputs(&f, &toggles, &HoverSet::default(), &hidden));
        assert_eq!(
            css,
            ".door {opacity: 1;}\n\
             .door-secret {display: inline;}\n\
             #background-grid {display: none;}\n\
             polygon.lava {display: none;}\n\
             .light_switch {display: none;}\n\
             #line_10 {display: none;}\n\
             #line_9 {display: none;}"
        );
    }

    #[test]
    fn no_hiding_rules_when_nothing_hidden() {
        let f = fixture();
        let css = compose(&inputs(
            &f,
            &ToggleState::new(),
            &HoverSet::default(),
            &BTreeSet::new(),
        ));
        assert_eq!(
            css,
            ".door {opacity: 0;}\n\
             .door-secret {display: none;}\n\
             #background-grid {display: none;}\n\
             polygon.lava {display: none;}\n\
             .light_switch {display: none;}"
        );
    }

    #[test]
    fn hover_forces_on_style_and_reveals_lines() {
        let f = fixture();
        let mut hover = HoverSet::default();
        hover.items.insert(ItemId(4));
        hover.lines.insert("light_switch_lines_s2".to_string());

        let css = compose(&inputs(&f, &ToggleState::new(), &hover, &BTreeSet::new()));
        assert!(css.contains(".light_switch {display: inline;}"));
        assert!(css.ends_with("#light_switch_lines_s2 {display: inline;}"));
        assert!(css.contains(".door {opacity: 0;}"));
    }

    #[test]
    fn compose_is_idempotent() {
        let f = fixture();
        let mut toggles = ToggleState::new();
        toggles.set(ItemId(2), true);
        let hidden: BTreeSet<ConnectorId> = [ConnectorId::new("d1")].into_iter().collect();
        let hover = HoverSet::default();
        let a = compose(&inputs(&f, &toggles, &hover, &hidden));
        let b = compose(&inputs(&f, &toggles, &hover, &hidden));
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn toggle_order_does_not_change_output(
            checked in prop::collection::vec(0u32..5, 0..8),
            hidden in prop::collection::vec("[a-z]{1,4}", 0..6),
        ) {
            let f = fixture();
            let hidden: BTreeSet<ConnectorId> = hidden.into_iter().map(ConnectorId).collect();
            let hover = HoverSet::default();

            let mut forward = ToggleState::new();
            for id in &checked {
                forward.set(ItemId(*id), true);
            }
            let mut backward = ToggleState::new();
            for id in checked.iter().rev() {
                backward.set(ItemId(*id), true);
            }
            prop_assert_eq!(
                compose(&inputs(&f, &forward, &hover, &hidden)),
                compose(&inputs(&f, &backward, &hover, &hidden))
            );
        }
    }
}
