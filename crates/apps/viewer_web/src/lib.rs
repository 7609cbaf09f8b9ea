use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use serde::Serialize;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use formats::{LevelDocument, OverlayDocument, OverlayNode, monster_override_from_json_str};
use overlays::ItemId;
use runtime::{LevelAssets, LoadError, LoadOutcome, LoadTicket, Viewer, ViewerConfig};
use scene::VisibilityMode;

mod svg;
use svg::SvgDocumentTarget;

fn new_viewer(config: ViewerConfig) -> Viewer<SvgDocumentTarget> {
    let target = SvgDocumentTarget::new(&config.object_id, &config.style_node_id);
    Viewer::new(config, target)
}

thread_local! {
    static STATE: RefCell<Viewer<SvgDocumentTarget>> =
        RefCell::new(new_viewer(ViewerConfig::default()));
}

fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Replaces the viewer with one built from a JSON config. Any loaded level is
/// dropped.
#[wasm_bindgen]
pub fn configure(config_json: &str) -> Result<(), JsValue> {
    let config = ViewerConfig::from_json_str(config_json).map_err(js_err)?;
    STATE.with(|state| *state.borrow_mut() = new_viewer(config));
    Ok(())
}

/// Fetches the documents for a level and swaps it in once they arrive. A load
/// that finishes after a newer one was started is ignored.
#[wasm_bindgen]
pub fn load_level(overlays_url: String, level_url: String, monster_url: Option<String>) {
    let ticket = STATE.with(|state| state.borrow_mut().begin_level_load());
    spawn_local(async move {
        let assets = fetch_assets(&overlays_url, &level_url, monster_url.as_deref()).await;
        finish_load(ticket, assets);
    });
}

fn finish_load(ticket: LoadTicket, assets: Result<LevelAssets, LoadError>) {
    let outcome = STATE.with(|state| {
        let mut viewer = state.borrow_mut();
        let outcome = viewer.complete_level_load(ticket, assets);
        if outcome == LoadOutcome::Failed {
            for event in viewer.events_mut().drain() {
                log(&format!("{}: {}", event.kind, event.message));
            }
        } else {
            viewer.events_mut().drain();
        }
        outcome
    });
    if outcome == LoadOutcome::Stale {
        log(&format!(
            "ignored stale level load (generation {})",
            ticket.generation.get()
        ));
    }
}

/// Hook for the `<object>` element's `load` event. The level's stylesheet
/// may have been composed before its SVG replaced the previous one.
#[wasm_bindgen]
pub fn svg_loaded() {
    STATE.with(|state| state.borrow_mut().reapply());
}

#[wasm_bindgen]
pub fn on_toggle(item: u32, checked: bool) {
    STATE.with(|state| state.borrow_mut().on_toggle(ItemId(item), checked));
}

#[wasm_bindgen]
pub fn on_hover(item: u32, hovering: bool) {
    STATE.with(|state| state.borrow_mut().on_hover(ItemId(item), hovering));
}

/// Slider handles, in ticks.
#[wasm_bindgen]
pub fn set_elevation_window(floor_ticks: f64, ceiling_ticks: f64) {
    STATE.with(|state| {
        state
            .borrow_mut()
            .set_elevation_ticks(floor_ticks, ceiling_ticks)
    });
}

#[wasm_bindgen]
pub fn set_visibility_mode(mode: &str) -> Result<(), JsValue> {
    let mode: VisibilityMode = mode.parse().map_err(js_err)?;
    STATE.with(|state| state.borrow_mut().set_visibility_mode(mode));
    Ok(())
}

/// Moves the window to the player's eye level and returns the new handle
/// positions in ticks, or nothing when the level has no player start.
#[wasm_bindgen]
pub fn player_window() -> Option<Vec<f64>> {
    STATE.with(|state| {
        state
            .borrow_mut()
            .set_player_elevation()
            .map(|w| w.to_ticks().to_vec())
    })
}

#[wasm_bindgen]
pub fn slider_range() -> Option<Vec<f64>> {
    STATE.with(|state| {
        state
            .borrow()
            .slider_range()
            .map(|range| vec![range.min, range.max])
    })
}

#[wasm_bindgen]
pub fn zoom(preset: &str) -> Option<String> {
    STATE.with(|state| state.borrow().zoom(preset))
}

#[derive(Serialize)]
struct MenuEntry<'a> {
    id: u32,
    label: &'a str,
    key: Option<String>,
    parent: Option<u32>,
    depth: usize,
    checked: bool,
}

/// Flat pre-order listing of the overlay menu, for the page to build its
/// nested list from.
#[wasm_bindgen]
pub fn overlay_menu_json() -> Result<String, JsValue> {
    STATE.with(|state| {
        let viewer = state.borrow();
        let Some(session) = viewer.session() else {
            return Ok("[]".to_string());
        };
        let menu = session.menu();
        let entries: Vec<MenuEntry<'_>> = menu
            .iter()
            .map(|(id, item)| MenuEntry {
                id: id.0,
                label: &item.label,
                key: item.key.as_ref().map(ToString::to_string),
                parent: item.parent.map(|p| p.0),
                depth: menu.depth(id),
                checked: session.toggles.is_checked(id),
            })
            .collect();
        serde_json::to_string(&entries).map_err(js_err)
    })
}

async fn fetch_text(url: &str) -> Result<String, LoadError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| LoadError::Transport(format!("{url}: {e}")))?;
    if !resp.ok() {
        return Err(LoadError::Transport(format!("{url}: HTTP {}", resp.status())));
    }
    resp.text()
        .await
        .map_err(|e| LoadError::Transport(format!("{url}: {e}")))
}

async fn fetch_assets(
    overlays_url: &str,
    level_url: &str,
    monster_url: Option<&str>,
) -> Result<LevelAssets, LoadError> {
    let overlays = OverlayDocument::from_json_str(&fetch_text(overlays_url).await?)?;
    let level = LevelDocument::from_json_str(&fetch_text(level_url).await?)?;
    let monster_override = match monster_url {
        Some(url) => fetch_monster_override(url).await,
        None => None,
    };
    Ok(LevelAssets {
        overlays,
        level,
        monster_override,
    })
}

/// Most levels have no monster override; a missing or broken one just means
/// the shared monster list is used.
async fn fetch_monster_override(url: &str) -> Option<OverlayNode> {
    let text = fetch_text(url).await.ok()?;
    match monster_override_from_json_str(&text) {
        Ok(node) => Some(node),
        Err(err) => {
            log(&format!("ignoring monster override {url}: {err}"));
            None
        }
    }
}
