//! Map list (`maps.json`) and per-map level list (`map.json`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DocumentError, read_json};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEntry {
    pub map_name: String,
    pub short_name: String,
    /// Directory holding `map.json`, `overlays.json` and the level files.
    pub map_info: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapIndex {
    pub maps: Vec<MapEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelEntry {
    Separator {
        separator: String,
    },
    Level {
        index: i64,
        name: String,
        base_name: String,
    },
}

impl LevelEntry {
    pub fn is_separator(&self) -> bool {
        matches!(self, LevelEntry::Separator { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelIndex {
    #[serde(default)]
    pub levels: Vec<LevelEntry>,
}

/// Map and level named by a `#short_name:index` URL fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub map: Option<String>,
    pub level: Option<i64>,
}

/// Parses the part of `url` after `#`.
///
/// The fragment is only honoured when the level index parses; otherwise the
/// whole selection is ignored and the first map/level is used.
pub fn parse_fragment(url: &str) -> Selection {
    let Some((_, fragment)) = url.split_once('#') else {
        return Selection::default();
    };
    let mut tokens = fragment.split(':');
    let map = tokens.next().unwrap_or_default();
    let Some(level) = tokens.next().and_then(parse_leading_int) else {
        return Selection::default();
    };
    Selection {
        map: Some(map.to_string()),
        level: Some(level),
    }
}

// Accepts trailing garbage after the digits ("12abc" -> 12).
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

impl MapIndex {
    pub fn from_json_str(payload: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        read_json(path.as_ref())
    }

    /// Position of the selected map, falling back to the first one.
    pub fn initial(&self, selection: &Selection) -> Option<usize> {
        if self.maps.is_empty() {
            return None;
        }
        let found = selection
            .map
            .as_deref()
            .and_then(|short| self.maps.iter().position(|m| m.short_name == short));
        Some(found.unwrap_or(0))
    }
}

impl LevelIndex {
    pub fn from_json_str(payload: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        read_json(path.as_ref())
    }

    pub fn get(&self, position: usize) -> Option<&LevelEntry> {
        self.levels.get(position)
    }

    /// Position of the level with `index`, or of the first level when no
    /// index (or a negative one) was asked for or none matched.
    pub fn initial(&self, level: Option<i64>) -> Option<usize> {
        let mut first = None;
        for (position, entry) in self.levels.iter().enumerate() {
            let LevelEntry::Level { index, .. } = entry else {
                continue;
            };
            match level {
                Some(wanted) if wanted >= 0 => {
                    if *index == wanted {
                        return Some(position);
                    }
                    first.get_or_insert(position);
                }
                _ => return Some(position),
            }
        }
        first
    }

    /// Moves `increment` entries from `position`, wrapping around and skipping
    /// separators. An increment of zero reloads the current level.
    pub fn step(&self, position: usize, increment: isize) -> Option<usize> {
        let len = self.levels.len();
        if len == 0 || self.levels.iter().all(LevelEntry::is_separator) {
            return None;
        }
        let len_i = len as isize;
        // A zero increment still has to move off a separator.
        let stride = if increment == 0 { 1 } else { increment };
        let mut current = ((position % len) as isize + increment).rem_euclid(len_i);
        for _ in 0..len {
            if !self.levels[current as usize].is_separator() {
                return Some(current as usize);
            }
            current = (current + stride).rem_euclid(len_i);
        }
        None
    }
}

/// `"<map_name>: <index> <name>"`.
pub fn page_title(map: &MapEntry, level: &LevelEntry) -> Option<String> {
    let LevelEntry::Level { index, name, .. } = level else {
        return None;
    };
    Some(format!("{}: {index} {name}", map.map_name))
}

/// `"#<short_name>:<index>"`, the inverse of [`parse_fragment`].
pub fn fragment(map: &MapEntry, level: &LevelEntry) -> Option<String> {
    let LevelEntry::Level { index, .. } = level else {
        return None;
    };
    Some(format!("#{}:{index}", map.short_name))
}

#[cfg(test)]
mod tests {
    use super::{LevelEntry, LevelIndex, MapIndex, Selection, fragment, page_title, parse_fragment};

    fn levels() -> LevelIndex {
        LevelIndex::from_json_str(
            r#"{"levels": [
                {"separator": "Episode 1"},
                {"index": 0, "name": "Arrival", "base_name": "00_arrival"},
                {"index": 1, "name": "Bigger Guns", "base_name": "01_guns"},
                {"separator": "Episode 2"},
                {"index": 2, "name": "Blaspheme", "base_name": "02_blaspheme"}
            ]}"#,
        )
        .unwrap()
    }

    fn maps() -> MapIndex {
        MapIndex::from_json_str(
            r#"[
                {"map_name": "Marathon", "short_name": "m1", "map_info": "m1"},
                {"map_name": "Marathon 2", "short_name": "m2", "map_info": "m2"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn fragment_requires_numeric_level() {
        assert_eq!(
            parse_fragment("http://host/#m2:4"),
            Selection {
                map: Some("m2".to_string()),
                level: Some(4)
            }
        );
        assert_eq!(parse_fragment("http://host/#m2:abc"), Selection::default());
        assert_eq!(parse_fragment("http://host/#m2"), Selection::default());
        assert_eq!(parse_fragment("http://host/"), Selection::default());
        assert_eq!(parse_fragment("#m1:7x").level, Some(7));
    }

    #[test]
    fn initial_map_falls_back_to_first() {
        let maps = maps();
        let sel = parse_fragment("#m2:1");
        assert_eq!(maps.initial(&sel), Some(1));
        assert_eq!(maps.initial(&parse_fragment("#zz:1")), Some(0));
        assert_eq!(MapIndex::default().initial(&sel), None);
    }

    #[test]
    fn initial_level_skips_separators() {
        let levels = levels();
        assert_eq!(levels.initial(None), Some(1));
        assert_eq!(levels.initial(Some(-1)), Some(1));
        assert_eq!(levels.initial(Some(2)), Some(4));
        assert_eq!(levels.initial(Some(9)), Some(1));
    }

    #[test]
    fn step_wraps_and_skips_separators() {
        let levels = levels();
        assert_eq!(levels.step(2, 1), Some(4));
        assert_eq!(levels.step(4, 1), Some(1));
        assert_eq!(levels.step(1, -1), Some(4));
        assert_eq!(levels.step(2, 0), Some(2));
        assert_eq!(LevelIndex::default().step(0, 1), None);
    }

    #[test]
    fn title_and_fragment() {
        let maps = maps();
        let levels = levels();
        let level = levels.get(2).unwrap();
        assert_eq!(
            page_title(&maps.maps[0], level).as_deref(),
            Some("Marathon: 1 Bigger Guns")
        );
        assert_eq!(fragment(&maps.maps[0], level).as_deref(), Some("#m1:1"));
        assert!(page_title(&maps.maps[0], &LevelEntry::Separator { separator: "x".into() }).is_none());
    }
}
