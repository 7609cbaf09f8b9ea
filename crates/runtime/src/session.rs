use std::fmt;

use formats::{DocumentError, LevelDocument, OverlayDocument, OverlayNode};
use foundation::Generation;
use overlays::{
    HoverSet, ItemId, OverlayMenu, StyleInputs, Taxonomy, ToggleState, compose,
    render_overlay_list,
};
use scene::{ElevationWindow, LevelGeometry, VisibilityMode};

/// Documents fetched for one level.
#[derive(Debug, Clone)]
pub struct LevelAssets {
    pub overlays: OverlayDocument,
    pub level: LevelDocument,
    pub monster_override: Option<OverlayNode>,
}

#[derive(Debug)]
pub enum LoadError {
    Document(DocumentError),
    /// Fetch failure reported by whoever moves the bytes.
    Transport(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Document(err) => write!(f, "{err}"),
            LoadError::Transport(msg) => write!(f, "transport error: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Document(err) => Some(err),
            LoadError::Transport(_) => None,
        }
    }
}

impl From<DocumentError> for LoadError {
    fn from(err: DocumentError) -> Self {
        LoadError::Document(err)
    }
}

/// Everything that belongs to the currently displayed level. Replaced
/// wholesale on each load; nothing carries over except what the viewer
/// itself keeps.
#[derive(Debug)]
pub struct LevelSession {
    generation: Generation,
    taxonomy: Taxonomy,
    menu: OverlayMenu,
    level: LevelGeometry,
    pub toggles: ToggleState,
    pub window: ElevationWindow,
}

impl LevelSession {
    pub fn new(generation: Generation, assets: LevelAssets) -> Self {
        let LevelAssets {
            overlays,
            level,
            monster_override,
        } = assets;
        let taxonomy = Taxonomy::with_monster_override(overlays, monster_override.as_ref());
        let level = LevelGeometry::from_document(level);
        let menu = render_overlay_list(taxonomy.roots(), &level.allow, level.variant);
        let window = level.initial_window();
        Self {
            generation,
            taxonomy,
            menu,
            level,
            toggles: ToggleState::new(),
            window,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn menu(&self) -> &OverlayMenu {
        &self.menu
    }

    pub fn level(&self) -> &LevelGeometry {
        &self.level
    }

    /// Cascading toggle; returns how many items changed.
    pub fn toggle(&mut self, id: ItemId, checked: bool) -> usize {
        self.toggles.on_toggle(&self.menu, id, checked)
    }

    pub fn stylesheet(
        &self,
        mode: VisibilityMode,
        hover: &HoverSet,
        hidden_declaration: &str,
    ) -> String {
        let hidden = self.level.hidden_connectors(self.window, mode);
        compose(&StyleInputs {
            menu: &self.menu,
            taxonomy: &self.taxonomy,
            toggles: &self.toggles,
            hover,
            hidden: &hidden,
            hidden_declaration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{LevelAssets, LevelSession, LoadError};
    use formats::{DocumentError, LevelDocument, OverlayDocument};
    use foundation::Generation;
    use overlays::HoverSet;
    use scene::VisibilityMode;

    fn assets() -> LevelAssets {
        LevelAssets {
            overlays: OverlayDocument::from_json_str(
                r#"{"style": ["opacity: 0.2;", "opacity: 1;"],
                    "types": [{"display": "Doors", "class": "door"}]}"#,
            )
            .unwrap(),
            level: LevelDocument::from_json_str(
                r#"{"elevation": {"floor": 0, "ceiling": 1},
                    "overlays": {"classes": ["door"]}}"#,
            )
            .unwrap(),
            monster_override: None,
        }
    }

    #[test]
    fn fresh_session_starts_unchecked_with_full_window() {
        let session = LevelSession::new(Generation::ZERO.next(), assets());
        assert_eq!(session.menu().len(), 1);
        assert_eq!(session.window.ceiling(), 1.0);
        assert_eq!(
            session.stylesheet(VisibilityMode::Intersection, &HoverSet::default(), "display: none;"),
            ".door {opacity: 0.2;}"
        );
    }

    #[test]
    fn load_error_wraps_document_error() {
        let err: LoadError = DocumentError::from(
            serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        )
        .into();
        assert!(err.to_string().starts_with("document parse error"));
        assert_eq!(
            LoadError::Transport("404".into()).to_string(),
            "transport error: 404"
        );
    }
}
