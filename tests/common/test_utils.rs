#![allow(dead_code)]

use donut_scene::{
    SceneConfig, SceneState,
    assembly::{SceneAssets, assemble},
    data_structures::material::MatcapTexture,
    font::Font,
    viewport::Viewport,
};
use rand::{SeedableRng, rngs::StdRng};

pub(crate) const FONT_JSON: &str = include_str!("../../assets/fonts/blocky_regular.typeface.json");

pub(crate) fn fixture_font() -> Font {
    Font::parse(FONT_JSON).expect("bundled font parses")
}

/// A 4x4 matcap, enough for anything that does not inspect the image itself.
pub(crate) fn fixture_matcap() -> MatcapTexture {
    MatcapTexture::new(
        "fixture",
        image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 120, 140, 255])),
    )
}

pub(crate) fn fixture_assets() -> SceneAssets {
    SceneAssets {
        font: fixture_font(),
        matcap: fixture_matcap(),
    }
}

pub(crate) fn initial_viewport() -> Viewport {
    Viewport::new(800.0, 600.0, 1.0, 2.0)
}

/// Assemble the default scene with a seeded random source.
pub(crate) fn seeded_scene(seed: u64) -> SceneState {
    let mut rng = StdRng::seed_from_u64(seed);
    assemble(
        SceneConfig::default(),
        fixture_assets(),
        initial_viewport(),
        &mut rng,
    )
    .expect("scene assembles")
}
