use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use formats::{
    LevelDocument, LevelEntry, LevelIndex, MapIndex, OverlayDocument, OverlayNode,
    fragment, load_monster_override, page_title, parse_fragment,
};
use foundation::ClassifierKey;
use overlays::{ElementIndex, ItemId, LinesLookup, OverlayMenu};
use runtime::{LevelAssets, LoadOutcome, StyleTarget, Viewer, ViewerConfig};
use scene::{ElevationWindow, LevelGeometry, VisibilityMode};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    let assets = PathBuf::from(env::var("FLOORPLAN_ASSETS").unwrap_or_else(|_| ".".to_string()));
    debug!(assets = %assets.display(), "asset root");

    match cmd.as_str() {
        "menu" => cmd_menu(&assets, args),
        "style" => cmd_style(&assets, args),
        "hidden" => cmd_hidden(&assets, args),
        "levels" => cmd_levels(&assets, args),
        _ => Err(usage()),
    }
}

/// Flags shared by the commands that work on one level.
#[derive(Debug, Default, PartialEq)]
struct LevelArgs {
    positional: Vec<String>,
    monsters: Option<String>,
    checks: Vec<ClassifierKey>,
    hover: Option<ClassifierKey>,
    window: Option<[f64; 2]>,
    ticks: bool,
    mode: Option<VisibilityMode>,
    svg: Option<String>,
    json: bool,
}

fn parse_level_args(args: &[String]) -> Result<LevelArgs, String> {
    let mut out = LevelArgs::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--mnov" => out.monsters = Some(value(args, &mut i, "--mnov")?.to_string()),
            "--check" => out.checks.push(parse_key(value(args, &mut i, "--check")?)?),
            "--hover" => out.hover = Some(parse_key(value(args, &mut i, "--hover")?)?),
            "--window" => {
                let floor = parse_f64(value(args, &mut i, "--window")?)?;
                let ceiling = parse_f64(value(args, &mut i, "--window")?)?;
                out.window = Some([floor, ceiling]);
            }
            "--ticks" => out.ticks = true,
            "--mode" => {
                let raw = value(args, &mut i, "--mode")?;
                out.mode = Some(raw.parse().map_err(|e| format!("--mode: {e}"))?);
            }
            "--svg" => out.svg = Some(value(args, &mut i, "--svg")?.to_string()),
            "--json" => out.json = true,
            s if s.starts_with('-') => {
                return Err(format!("unknown arg: {s}\n\n{}", usage()));
            }
            s => out.positional.push(s.to_string()),
        }
        i += 1;
    }
    Ok(out)
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_key(raw: &str) -> Result<ClassifierKey, String> {
    // Accept both `class_door` and `.door`.
    let parsed = if raw.starts_with(['.', '#']) {
        ClassifierKey::from_css_selector(raw)
    } else {
        raw.parse::<ClassifierKey>()
    };
    parsed.map_err(|e| format!("{raw}: {e}"))
}

fn parse_f64(raw: &str) -> Result<f64, String> {
    raw.parse().map_err(|_| format!("not a number: {raw}"))
}

fn resolve(assets: &Path, raw: &str) -> PathBuf {
    let p = PathBuf::from(raw);
    if p.is_absolute() { p } else { assets.join(p) }
}

impl LevelArgs {
    fn window(&self) -> Option<ElevationWindow> {
        self.window.map(|[floor, ceiling]| {
            if self.ticks {
                ElevationWindow::from_ticks(floor, ceiling)
            } else {
                ElevationWindow::new(floor, ceiling)
            }
        })
    }
}

fn load_assets(assets: &Path, args: &LevelArgs) -> Result<LevelAssets, String> {
    let [overlays_path, level_path] = args.positional.as_slice() else {
        return Err(usage());
    };
    let overlays_path = resolve(assets, overlays_path);
    let level_path = resolve(assets, level_path);
    let overlays = OverlayDocument::load(&overlays_path).map_err(|e| e.to_string())?;
    let level = LevelDocument::load(&level_path).map_err(|e| e.to_string())?;
    let monster_override: Option<OverlayNode> = match &args.monsters {
        Some(p) => Some(load_monster_override(resolve(assets, p)).map_err(|e| e.to_string())?),
        None => None,
    };
    Ok(LevelAssets {
        overlays,
        level,
        monster_override,
    })
}

/// Collects the stylesheets a viewer would have written.
#[derive(Default)]
struct CapturedStyle {
    elements: ElementIndex,
    last: Option<String>,
}

impl LinesLookup for CapturedStyle {
    fn element_ids_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.elements.element_ids_with_prefix(prefix)
    }
}

impl StyleTarget for CapturedStyle {
    fn apply_stylesheet(&mut self, css: &str) {
        self.last = Some(css.to_string());
    }
}

fn load_viewer(assets: &Path, args: &LevelArgs) -> Result<Viewer<CapturedStyle>, String> {
    let level_assets = load_assets(assets, args)?;
    let mut target = CapturedStyle::default();
    if let Some(svg) = &args.svg {
        let path = resolve(assets, svg);
        let text = fs::read_to_string(&path).map_err(|e| format!("read {path:?}: {e}"))?;
        target.elements =
            ElementIndex::from_svg_str(&text).map_err(|e| format!("parse {path:?}: {e}"))?;
    }
    let mut viewer = Viewer::new(ViewerConfig::default(), target);
    if let Some(mode) = args.mode {
        viewer.set_visibility_mode(mode);
    }
    let ticket = viewer.begin_level_load();
    match viewer.complete_level_load(ticket, Ok(level_assets)) {
        LoadOutcome::Applied => Ok(viewer),
        other => Err(format!("level did not load: {other:?}")),
    }
}

fn find_item(menu: &OverlayMenu, key: &ClassifierKey) -> Result<ItemId, String> {
    menu.find(key)
        .ok_or_else(|| format!("{key} is not in this level's overlay menu"))
}

#[derive(Serialize)]
struct MenuLine {
    id: u32,
    depth: usize,
    label: String,
    key: Option<String>,
}

fn cmd_menu(assets: &Path, args: Vec<String>) -> Result<(), String> {
    // floorplan menu <overlays.json> <level.json> [--mnov FILE] [--check KEY]... [--json]
    let args = parse_level_args(&args)?;
    let mut viewer = load_viewer(assets, &args)?;
    for key in &args.checks {
        let menu = viewer.menu().ok_or("no level loaded")?;
        let id = find_item(menu, key)?;
        viewer.on_toggle(id, true);
    }
    let session = viewer.session().ok_or("no level loaded")?;
    let menu = session.menu();

    if args.json {
        let lines: Vec<MenuLine> = menu
            .iter()
            .map(|(id, item)| MenuLine {
                id: id.0,
                depth: menu.depth(id),
                label: item.label.clone(),
                key: item.key.as_ref().map(ToString::to_string),
            })
            .collect();
        let payload = serde_json::to_string_pretty(&lines).map_err(|e| format!("json: {e}"))?;
        println!("{payload}");
    } else {
        print!("{}", menu.outline(|id| session.toggles.is_checked(id)));
    }
    Ok(())
}

fn cmd_style(assets: &Path, args: Vec<String>) -> Result<(), String> {
    // floorplan style <overlays.json> <level.json> [--check KEY]... [--hover KEY]
    //   [--window F C [--ticks]] [--mode MODE] [--svg FILE] [--mnov FILE]
    let args = parse_level_args(&args)?;
    let mut viewer = load_viewer(assets, &args)?;
    if let Some(window) = args.window() {
        viewer.set_elevation_window(window);
    }
    for key in &args.checks {
        let id = find_item(viewer.menu().ok_or("no level loaded")?, key)?;
        viewer.on_toggle(id, true);
    }
    if let Some(key) = &args.hover {
        let id = find_item(viewer.menu().ok_or("no level loaded")?, key)?;
        viewer.on_hover(id, true);
    }
    if let Some(css) = &viewer.target().last {
        println!("{css}");
    }
    Ok(())
}

fn cmd_hidden(assets: &Path, args: Vec<String>) -> Result<(), String> {
    // floorplan hidden <level.json> [--window F C [--ticks]] [--mode MODE]
    let args = parse_level_args(&args)?;
    let [level_path] = args.positional.as_slice() else {
        return Err(usage());
    };
    let document =
        LevelDocument::load(resolve(assets, level_path)).map_err(|e| e.to_string())?;
    let level = LevelGeometry::from_document(document);
    let window = args.window().unwrap_or_else(|| level.initial_window());
    let mode = args.mode.unwrap_or_default();
    for id in level.hidden_connectors(window, mode) {
        println!("{id}");
    }
    Ok(())
}

fn cmd_levels(assets: &Path, args: Vec<String>) -> Result<(), String> {
    // floorplan levels <maps.json> [URL#short:index]
    let (maps_path, url) = match args.as_slice() {
        [maps] => (maps, ""),
        [maps, url] => (maps, url.as_str()),
        _ => return Err(usage()),
    };
    let maps = MapIndex::load(resolve(assets, maps_path)).map_err(|e| e.to_string())?;
    let selection = parse_fragment(url);
    let map_pos = maps.initial(&selection).ok_or("maps.json lists no maps")?;
    let map = &maps.maps[map_pos];

    let levels_path = resolve(assets, &map.map_info).join("map.json");
    let levels = LevelIndex::load(&levels_path).map_err(|e| e.to_string())?;
    let current = levels.initial(selection.level);

    println!("{} ({})", map.map_name, map.short_name);
    for (position, entry) in levels.levels.iter().enumerate() {
        let marker = if Some(position) == current { '*' } else { ' ' };
        match entry {
            LevelEntry::Separator { separator } => println!("   -- {separator} --"),
            LevelEntry::Level {
                index,
                name,
                base_name,
            } => println!(" {marker} {index:>3} {name} [{base_name}]"),
        }
    }

    if let Some(current) = current {
        let title = |pos: Option<usize>| {
            pos.and_then(|p| levels.get(p))
                .and_then(|entry| page_title(map, entry))
                .unwrap_or_default()
        };
        println!();
        println!("current:  {}", title(Some(current)));
        if let Some(link) = levels.get(current).and_then(|entry| fragment(map, entry)) {
            println!("link:     {link}");
        }
        println!("previous: {}", title(levels.step(current, -1)));
        println!("next:     {}", title(levels.step(current, 1)));
    }
    Ok(())
}

fn usage() -> String {
    let exe = env::args().next().unwrap_or_else(|| "floorplan".to_string());
    format!(
        "Usage:\n  {exe} menu <overlays.json> <level.json> [--mnov FILE] [--check KEY]... [--json]\n  {exe} style <overlays.json> <level.json> [--mnov FILE] [--check KEY]... [--hover KEY] [--window F C [--ticks]] [--mode MODE] [--svg FILE]\n  {exe} hidden <level.json> [--window F C [--ticks]] [--mode MODE]\n  {exe} levels <maps.json> [URL#short:index]\n\nNotes:\n- KEY is `class_name`, `id_name`, `selector_name`, `.class` or `#id`.\n- MODE is one of intersection, contained, floor, ceiling.\n- Relative paths resolve against $FLOORPLAN_ASSETS (default `.`).\n"
    )
}
