//! Height precision policies.
//!
//! Level heights are authored in world units (1 WU = 1024 internal units) and
//! the elevation slider moves in ticks of 1/32 WU. Round-tripping a tick value
//! through `f64` does not always land on the authored height, so every height
//! comparison is done after rounding both sides to `f32`.

pub const TICKS_PER_WORLD_UNIT: f64 = 32.0;

/// Round to the nearest `f32`, the granularity heights are compared at.
#[inline]
pub fn fround(value: f64) -> f32 {
    value as f32
}

#[inline]
pub fn ticks_to_world(ticks: f64) -> f64 {
    ticks / TICKS_PER_WORLD_UNIT
}

#[inline]
pub fn world_to_ticks(world: f64) -> f64 {
    world * TICKS_PER_WORLD_UNIT
}

/// `true` when the window `[floor, ceiling]` misses the comparison bounds:
/// the floor lies above `min`, or the ceiling lies below `max`.
#[inline]
pub fn out_of_bounds(floor: f64, ceiling: f64, min: f64, max: f64) -> bool {
    fround(floor) > fround(min) || fround(ceiling) < fround(max)
}

#[cfg(test)]
mod tests {
    use super::{out_of_bounds, ticks_to_world, world_to_ticks};

    #[test]
    fn tick_conversion() {
        assert_eq!(ticks_to_world(16.0), 0.5);
        assert_eq!(world_to_ticks(-0.25), -8.0);
    }

    #[test]
    fn comparisons_ignore_sub_f32_noise() {
        let authored = 0.1_f64;
        let noisy = authored + 1e-12;
        // A window ceiling just below the authored height in f64 still reaches it in f32.
        assert!(!out_of_bounds(0.0, authored, authored, noisy));
        assert!(noisy > authored);
    }

    #[test]
    fn detects_real_gaps() {
        assert!(out_of_bounds(0.5, 1.0, 0.25, 0.75));
        assert!(out_of_bounds(0.0, 0.5, 1.0, 0.75));
        assert!(!out_of_bounds(0.0, 1.0, 1.0, 0.0));
    }
}
