use std::collections::{BTreeMap, BTreeSet};

use formats::{ElevationRange, LevelDocument, OverlayAllowLists, PlayerStart};
use foundation::ConnectorId;

use crate::elevation::{ElevationWindow, SliderRange, player_window, slider_range};
use crate::polygon::Polygon;
use crate::view_box::view_box;
use crate::visibility::{VisibilityMode, hidden_connectors};

/// Engine-side view of one level's geometry document.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelGeometry {
    pub elevation: ElevationRange,
    pub polygons: Vec<Polygon>,
    pub allow: OverlayAllowLists,
    pub view_boxes: BTreeMap<String, String>,
    pub scale: f64,
    pub players: Vec<PlayerStart>,
    /// Level-wide variant (alternate ruleset) flag.
    pub variant: bool,
}

impl LevelGeometry {
    pub fn from_document(document: LevelDocument) -> Self {
        let polygons = document
            .polygons
            .iter()
            .map(|(id, record)| Polygon::from_record(id, record))
            .collect();
        Self {
            elevation: document.elevation,
            polygons,
            allow: document.overlays,
            view_boxes: document.view_box,
            scale: document.scale,
            players: document.player,
            variant: document.rebellion,
        }
    }

    /// Window a freshly loaded level starts with.
    pub fn initial_window(&self) -> ElevationWindow {
        ElevationWindow::from_range(self.elevation)
    }

    pub fn slider_range(&self) -> SliderRange {
        slider_range(self.elevation)
    }

    pub fn player_window(&self) -> Option<ElevationWindow> {
        player_window(&self.players)
    }

    pub fn view_box(&self, preset: &str) -> String {
        view_box(&self.view_boxes, self.scale, preset)
    }

    pub fn hidden_connectors(
        &self,
        window: ElevationWindow,
        mode: VisibilityMode,
    ) -> BTreeSet<ConnectorId> {
        hidden_connectors(&self.polygons, window, mode)
    }
}
