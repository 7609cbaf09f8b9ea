//! Elevation filtering of polygons.
//!
//! A polygon is visible when its height range passes the mode's test against
//! the elevation window. Hidden polygons hide their boundary connectors,
//! except connectors also bounding a visible polygon: that wall or door is
//! still seen from the visible side.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use foundation::{ConnectorId, out_of_bounds};

use crate::elevation::ElevationWindow;
use crate::polygon::Polygon;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum VisibilityMode {
    /// Ranges overlap at all.
    #[default]
    Intersection,
    /// Window fully contains the polygon.
    Contained,
    /// Polygon floor lies in the window.
    Floor,
    /// Polygon ceiling lies in the window.
    Ceiling,
}

impl VisibilityMode {
    pub const ALL: [VisibilityMode; 4] = [
        VisibilityMode::Intersection,
        VisibilityMode::Contained,
        VisibilityMode::Floor,
        VisibilityMode::Ceiling,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VisibilityMode::Intersection => "intersection",
            VisibilityMode::Contained => "contained",
            VisibilityMode::Floor => "floor",
            VisibilityMode::Ceiling => "ceiling",
        }
    }

    /// `(min, max)` the window floor and ceiling are compared against.
    fn bounds(self, polygon: &Polygon) -> (f64, f64) {
        let (floor, ceiling) = (polygon.floor_height, polygon.ceiling_height);
        match self {
            VisibilityMode::Intersection => (ceiling, floor),
            VisibilityMode::Contained => (floor, ceiling),
            VisibilityMode::Floor => (floor, floor),
            VisibilityMode::Ceiling => (ceiling, ceiling),
        }
    }
}

impl fmt::Display for VisibilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeParseError(pub String);

impl fmt::Display for ModeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown visibility mode {:?} (expected intersection, contained, floor or ceiling)",
            self.0
        )
    }
}

impl std::error::Error for ModeParseError {}

impl FromStr for VisibilityMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VisibilityMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ModeParseError(s.to_string()))
    }
}

pub fn is_visible(polygon: &Polygon, window: ElevationWindow, mode: VisibilityMode) -> bool {
    let (min, max) = mode.bounds(polygon);
    !out_of_bounds(window.floor(), window.ceiling(), min, max)
}

/// Connectors of visible (`enabled`) and hidden (`disabled`) polygons.
/// A shared connector can sit in both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectorPartition {
    pub enabled: BTreeSet<ConnectorId>,
    pub disabled: BTreeSet<ConnectorId>,
}

impl ConnectorPartition {
    /// `disabled - enabled`.
    pub fn hidden(&self) -> BTreeSet<ConnectorId> {
        self.disabled.difference(&self.enabled).cloned().collect()
    }
}

pub fn partition_connectors<'a>(
    polygons: impl IntoIterator<Item = &'a Polygon>,
    window: ElevationWindow,
    mode: VisibilityMode,
) -> ConnectorPartition {
    let mut out = ConnectorPartition::default();
    for polygon in polygons {
        let target = if is_visible(polygon, window, mode) {
            &mut out.enabled
        } else {
            &mut out.disabled
        };
        target.extend(polygon.connections.iter().cloned());
    }
    out
}

/// Connectors to hide for `window` under `mode`. Empty when nothing needs
/// hiding.
pub fn hidden_connectors<'a>(
    polygons: impl IntoIterator<Item = &'a Polygon>,
    window: ElevationWindow,
    mode: VisibilityMode,
) -> BTreeSet<ConnectorId> {
    partition_connectors(polygons, window, mode).hidden()
}
