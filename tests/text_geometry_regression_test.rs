use approx::{assert_relative_eq, assert_ulps_eq};
use cgmath::Vector3;
use donut_scene::{
    config::TextOptions,
    geometry::text::{centered_text, text_geometry},
};

use crate::common::test_utils::{fixture_font, seeded_scene};

mod common;

/// The text is centred and then shifted by half of the centred maximum, so
/// its box ends up at `[-3/4 size, 1/4 size]` on every axis.
#[test]
fn should_keep_double_centering_offset() {
    let font = fixture_font();
    let mut text = centered_text(&font, &TextOptions::default());
    let bbox = text.geometry.compute_bounding_box();
    let size = bbox.size();

    for axis in 0..3 {
        assert_relative_eq!(bbox.max[axis], size[axis] * 0.25, epsilon = 1e-4);
        assert_relative_eq!(bbox.min[axis], -size[axis] * 0.75, epsilon = 1e-4);
    }
    for axis in 0..3 {
        assert_relative_eq!(text.max_offset[axis], -size[axis] * 0.25, epsilon = 1e-4);
    }
}

#[test]
fn should_keep_default_text_offsets_and_box() {
    let font = fixture_font();
    let mut text = centered_text(&font, &TextOptions::default());

    assert_eq!(text.center_offset, Vector3::new(-2.13, -0.15, -0.1));
    assert_eq!(text.max_offset, Vector3::new(-1.06, -0.14500001, -0.065));

    let bbox = text.geometry.compute_bounding_box();
    // halving is exact, so the shifted maximum is the negated offset
    assert_eq!(bbox.max, -text.max_offset);
    assert_eq!(bbox.max, Vector3::new(1.06, 0.14500001, 0.065));
    let expected_min = Vector3::new(-3.18, -0.435, -0.195);
    for axis in 0..3 {
        assert_ulps_eq!(bbox.min[axis], expected_min[axis], max_ulps = 8);
    }
}

#[test]
fn should_build_identical_text_twice() {
    let font = fixture_font();
    let options = TextOptions::default();
    assert_eq!(centered_text(&font, &options), centered_text(&font, &options));
}

#[test]
fn should_extrude_text_with_bevel_depth() {
    let font = fixture_font();
    let options = TextOptions::default();
    let mut geometry = text_geometry(&font, &options);
    assert!(geometry.triangle_count() > 0);

    let bbox = geometry.compute_bounding_box();
    let depth = bbox.max.z - bbox.min.z;
    assert_relative_eq!(
        depth,
        options.depth + 2.0 * options.bevel_thickness,
        epsilon = 1e-4
    );
}

#[test]
fn should_span_about_glyph_height() {
    let font = fixture_font();
    let options = TextOptions::default();
    let mut geometry = text_geometry(&font, &options);
    let bbox = geometry.compute_bounding_box();

    // 'j' descends 0.2 of the em, 'H' reaches 0.7
    let height = bbox.max.y - bbox.min.y;
    let expected = 0.9 * options.size + 2.0 * options.bevel_size;
    assert_relative_eq!(height, expected, epsilon = 1e-3);
}

#[test]
fn should_store_centred_text_in_scene() {
    let state = seeded_scene(1);
    let text = state.text_mesh().expect("text mesh");
    let bbox = text
        .geometry
        .bounding_box()
        .expect("bounding box computed during centring");
    assert!(bbox.max.x > 0.0);
    assert!(bbox.min.x < 0.0);
    assert!(-bbox.min.x > bbox.max.x);
}

#[test]
fn should_skip_unknown_characters_when_fallback_missing() {
    let json = r#"{
        "glyphs": {
            "I": { "ha": 400, "x_min": 0, "x_max": 300, "o": "m 0 0 l 0 700 l 300 700 l 300 0 z" }
        },
        "familyName": "NoFallback",
        "resolution": 1000,
        "boundingBox": { "yMin": 0, "xMin": 0, "yMax": 700, "xMax": 300 }
    }"#;
    let font = donut_scene::font::Font::parse(json).unwrap();
    assert_eq!(font.generate_shapes("I~I", 1.0).len(), 2);
}
