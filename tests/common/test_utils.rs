use matcap_text::{Demo, SceneConfig, text::Font};
use rand::{SeedableRng, rngs::StdRng};
use winit::dpi::LogicalSize;

pub const FIXTURE_FONT: &str = include_str!("../fixtures/blocky.typeface.json");

pub fn fixture_font() -> Font {
    Font::from_json(FIXTURE_FONT).expect("fixture font parses")
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn config_with_count(primitive_count: usize) -> SceneConfig {
    SceneConfig {
        primitive_count,
        seed: Some(7),
        ..SceneConfig::default()
    }
}

/// The default scene in an 800x600 window at pixel ratio 1.
pub fn demo_800x600() -> Demo {
    Demo::new(
        SceneConfig::default(),
        LogicalSize::new(800.0, 600.0),
        1.0,
        &mut seeded_rng(42),
    )
}

pub fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
