//! Matcap materials.
//!
//! A matcap ("material capture") texture stores the shading of a sphere; the
//! shader looks it up by view-space normal, so no lights are involved.

use std::sync::Arc;

use anyhow::Context;
use image::RgbaImage;

/// A decoded matcap image, kept on the CPU until the renderer uploads it.
#[derive(Clone, Debug, PartialEq)]
pub struct MatcapTexture {
    name: String,
    image: RgbaImage,
}

impl MatcapTexture {
    pub fn new(name: &str, image: RgbaImage) -> Self {
        Self {
            name: name.to_string(),
            image,
        }
    }

    /// Decode PNG/JPEG bytes into RGBA8.
    pub fn from_bytes(name: &str, bytes: &[u8]) -> anyhow::Result<Self> {
        let image = image::load_from_memory(bytes)
            .with_context(|| format!("could not decode matcap {}", name))?
            .to_rgba8();
        Ok(Self::new(name, image))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

#[derive(Clone, Debug)]
pub struct MatcapMaterial {
    pub name: String,
    pub matcap: Arc<MatcapTexture>,
}

impl MatcapMaterial {
    pub fn new(name: &str, matcap: Arc<MatcapTexture>) -> Self {
        Self {
            name: name.to_string(),
            matcap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn materials_share_one_texture() {
        let texture = Arc::new(MatcapTexture::new(
            "grey",
            RgbaImage::from_pixel(2, 2, Rgba([128, 128, 128, 255])),
        ));
        let text = MatcapMaterial::new("text", texture.clone());
        let donut = MatcapMaterial::new("donut", texture.clone());
        assert!(Arc::ptr_eq(&text.matcap, &donut.matcap));
        assert_eq!(Arc::strong_count(&texture), 3);
    }

    #[test]
    fn rejects_garbage_bytes() {
        assert!(MatcapTexture::from_bytes("bad", b"not an image").is_err());
    }
}
