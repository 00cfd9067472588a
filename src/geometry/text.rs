use cgmath::Vector3;

use super::Geometry;
use super::extrude::{ExtrudeOptions, extrude};
use crate::config::TextOptions;
use crate::font::Font;

/// Text geometry after centring, with the two translations that were applied.
#[derive(Clone, Debug, PartialEq)]
pub struct CenteredText {
    pub geometry: Geometry,
    /// Translation applied by [`Geometry::center`].
    pub center_offset: Vector3<f32>,
    /// Second translation, minus half of the centred bounding box maximum.
    pub max_offset: Vector3<f32>,
}

/// Extrude `options.content` laid out with `font`.
pub fn text_geometry(font: &Font, options: &TextOptions) -> Geometry {
    let shapes = font.generate_shapes(&options.content, options.size);
    extrude(&shapes, &ExtrudeOptions::from(options))
}

/// Build the text and centre it twice.
///
/// After [`Geometry::center`] the geometry is translated again by
/// `-max / 2` of the new bounding box, so the final box spans
/// `[-3/2 * half, 1/2 * half]` on each axis rather than being symmetric.
pub fn centered_text(font: &Font, options: &TextOptions) -> CenteredText {
    let mut geometry = text_geometry(font, options);
    let center_offset = geometry.center();
    let max = geometry.compute_bounding_box().max;
    let max_offset = -max * 0.5;
    geometry.translate(max_offset);

    if let Some(bbox) = geometry.bounding_box() {
        log::info!("text bounding box: min {:?}, max {:?}", bbox.min, bbox.max);
    }

    CenteredText {
        geometry,
        center_offset,
        max_offset,
    }
}
