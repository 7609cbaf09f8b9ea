use std::collections::BTreeMap;

/// Named camera preset, or the whole `[-scale, scale]` square when the level
/// has no such preset.
pub fn view_box(presets: &BTreeMap<String, String>, scale: f64, preset: &str) -> String {
    if let Some(found) = presets.get(preset) {
        return found.clone();
    }
    [-scale, -scale, scale * 2.0, scale * 2.0]
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::view_box;
    use std::collections::BTreeMap;

    #[test]
    fn preset_or_full_square() {
        let mut presets = BTreeMap::new();
        presets.insert("items".to_string(), "-0.5 -0.5 1 1".to_string());
        assert_eq!(view_box(&presets, 1.0, "items"), "-0.5 -0.5 1 1");
        assert_eq!(view_box(&presets, 1.0, "map"), "-1 -1 2 2");
        assert_eq!(view_box(&presets, 1.5, "lines"), "-1.5 -1.5 3 3");
    }
}
