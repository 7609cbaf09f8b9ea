use formats::{ElevationRange, PlayerStart};
use foundation::{ticks_to_world, world_to_ticks};

/// Height of the player's view above the floor, in slider ticks.
pub const PLAYER_VIEW_HEIGHT_TICKS: f64 = 819.0 / 1024.0;

/// Selected `[floor, ceiling]` range in world units; `floor <= ceiling`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationWindow {
    floor: f64,
    ceiling: f64,
}

impl ElevationWindow {
    /// Handles may be dragged past each other; the window keeps them ordered.
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            floor: a.min(b),
            ceiling: a.max(b),
        }
    }

    pub fn from_ticks(floor_ticks: f64, ceiling_ticks: f64) -> Self {
        Self::new(ticks_to_world(floor_ticks), ticks_to_world(ceiling_ticks))
    }

    pub fn from_range(range: ElevationRange) -> Self {
        Self::new(range.floor, range.ceiling)
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    pub fn to_ticks(&self) -> [f64; 2] {
        [world_to_ticks(self.floor), world_to_ticks(self.ceiling)]
    }
}

/// Slider extent in ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
}

/// One tick of headroom past the level's extent, clamped to `[-1, 1]` WU.
pub fn slider_range(elevation: ElevationRange) -> SliderRange {
    let floor = ((elevation.floor * 32.0 - 1.0).floor() / 32.0).max(-1.0);
    let ceiling = ((elevation.ceiling * 32.0 + 1.0).ceil() / 32.0).min(1.0);
    SliderRange {
        min: world_to_ticks(floor),
        max: world_to_ticks(ceiling),
    }
}

/// Window from the first player start's floor up to eye height.
pub fn player_window(players: &[PlayerStart]) -> Option<ElevationWindow> {
    let player = players.first()?;
    let floor = world_to_ticks(player.elevation);
    Some(ElevationWindow::from_ticks(
        floor,
        floor + PLAYER_VIEW_HEIGHT_TICKS,
    ))
}
