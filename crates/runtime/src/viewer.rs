use foundation::{Generation, GenerationCounter};
use overlays::{HoverSet, ItemId, LinesLookup, OverlayMenu, on_hover};
use scene::{ElevationWindow, SliderRange, VisibilityMode};
use tracing::{debug, warn};

use crate::config::ViewerConfig;
use crate::event_log::{EventLog, LEVEL_LOADED, LOAD_FAILED, LOAD_STALE, STYLESHEET_APPLIED};
use crate::session::{LevelAssets, LevelSession, LoadError};

/// Where composed stylesheets go. Also answers associated-lines queries,
/// since both live in the displayed document.
pub trait StyleTarget: LinesLookup {
    fn apply_stylesheet(&mut self, css: &str);
}

/// Handle for one in-flight level load.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket {
    pub generation: Generation,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load started after this one; nothing changed.
    Stale,
    /// Documents could not be loaded; the previous level stays displayed.
    Failed,
}

/// Owns the current level session and turns each UI event into exactly one
/// recompose-and-apply. Until a level has loaded every event is a no-op.
pub struct Viewer<T: StyleTarget> {
    config: ViewerConfig,
    target: T,
    generations: GenerationCounter,
    session: Option<LevelSession>,
    mode: VisibilityMode,
    last_stylesheet: Option<String>,
    log: EventLog,
}

impl<T: StyleTarget> Viewer<T> {
    pub fn new(config: ViewerConfig, target: T) -> Self {
        let mode = config.visibility_mode;
        Self {
            config,
            target,
            generations: GenerationCounter::new(),
            session: None,
            mode,
            last_stylesheet: None,
            log: EventLog::new(),
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn session(&self) -> Option<&LevelSession> {
        self.session.as_ref()
    }

    pub fn menu(&self) -> Option<&OverlayMenu> {
        self.session.as_ref().map(LevelSession::menu)
    }

    pub fn visibility_mode(&self) -> VisibilityMode {
        self.mode
    }

    pub fn last_stylesheet(&self) -> Option<&str> {
        self.last_stylesheet.as_deref()
    }

    pub fn events(&self) -> &EventLog {
        &self.log
    }

    pub fn events_mut(&mut self) -> &mut EventLog {
        &mut self.log
    }

    /// Starts a level load. Any load begun earlier becomes stale.
    pub fn begin_level_load(&mut self) -> LoadTicket {
        LoadTicket {
            generation: self.generations.advance(),
        }
    }

    pub fn complete_level_load(
        &mut self,
        ticket: LoadTicket,
        assets: Result<LevelAssets, LoadError>,
    ) -> LoadOutcome {
        if !self.generations.is_current(ticket.generation) {
            debug!(
                generation = ticket.generation.get(),
                current = self.generations.current().get(),
                "dropping stale level load"
            );
            self.log.emit(ticket.generation, LOAD_STALE, "superseded");
            return LoadOutcome::Stale;
        }
        let assets = match assets {
            Ok(assets) => assets,
            Err(err) => {
                warn!(generation = ticket.generation.get(), "level load failed: {err}");
                self.log
                    .emit(ticket.generation, LOAD_FAILED, err.to_string());
                return LoadOutcome::Failed;
            }
        };

        let session = LevelSession::new(ticket.generation, assets);
        self.log.emit(
            ticket.generation,
            LEVEL_LOADED,
            format!(
                "{} menu items, {} polygons",
                session.menu().len(),
                session.level().polygons.len()
            ),
        );
        self.session = Some(session);
        self.apply(&HoverSet::default());
        LoadOutcome::Applied
    }

    /// Recomposes the current level without any hover highlight. Used when
    /// the displayed document was replaced after the level's data arrived.
    pub fn reapply(&mut self) {
        self.apply(&HoverSet::default());
    }

    /// Checks or unchecks a menu item and everything under it.
    pub fn on_toggle(&mut self, id: ItemId, checked: bool) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.toggle(id, checked);
        self.apply(&HoverSet::default());
    }

    pub fn on_hover(&mut self, id: ItemId, hovering: bool) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let hover = on_hover(session.menu(), &session.toggles, &self.target, id, hovering);
        self.apply(&hover);
    }

    pub fn set_elevation_window(&mut self, window: ElevationWindow) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.window = window;
        self.apply(&HoverSet::default());
    }

    /// Slider positions are in ticks of 1/32 world unit.
    pub fn set_elevation_ticks(&mut self, floor: f64, ceiling: f64) {
        self.set_elevation_window(ElevationWindow::from_ticks(floor, ceiling));
    }

    /// Jumps the window to the player's start height. Returns the window, or
    /// `None` when the level has no player start.
    pub fn set_player_elevation(&mut self) -> Option<ElevationWindow> {
        let window = self.session.as_ref()?.level().player_window()?;
        self.set_elevation_window(window);
        Some(window)
    }

    /// The mode outlives the session; it is remembered even before the first
    /// level loads.
    pub fn set_visibility_mode(&mut self, mode: VisibilityMode) {
        self.mode = mode;
        if self.session.is_some() {
            self.apply(&HoverSet::default());
        }
    }

    pub fn slider_range(&self) -> Option<SliderRange> {
        self.session.as_ref().map(|s| s.level().slider_range())
    }

    /// `viewBox` attribute for a named camera preset.
    pub fn zoom(&self, preset: &str) -> Option<String> {
        self.session.as_ref().map(|s| s.level().view_box(preset))
    }

    fn apply(&mut self, hover: &HoverSet) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let css = session.stylesheet(self.mode, hover, &self.config.hidden_declaration);
        self.target.apply_stylesheet(&css);
        debug!(
            generation = session.generation().get(),
            bytes = css.len(),
            "applied stylesheet"
        );
        self.log.emit(
            session.generation(),
            STYLESHEET_APPLIED,
            format!("{} rules", css.lines().count()),
        );
        self.last_stylesheet = Some(css);
    }
}
