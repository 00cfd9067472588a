//! Viewport bookkeeping shared by the camera and the renderer.

/// Logical size of the drawing surface plus the pixel density used to render it.
///
/// `width`/`height` are in logical (CSS) pixels. When built from a window
/// whose scale factor is within the cap, the drawing buffer is the window's
/// physical size; otherwise it is `round(width * pixel_ratio)` by
/// `round(height * pixel_ratio)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
    physical: Option<[u32; 2]>,
}

impl Viewport {
    /// Create a viewport, capping the device pixel ratio at `max_pixel_ratio`.
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64, max_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio: device_pixel_ratio.min(max_pixel_ratio),
            physical: None,
        }
    }

    /// Build a viewport from a physical window size and its scale factor.
    pub fn from_physical(
        size: winit::dpi::PhysicalSize<u32>,
        scale_factor: f64,
        max_pixel_ratio: f64,
    ) -> Self {
        let logical: winit::dpi::LogicalSize<f64> = size.to_logical(scale_factor);
        let mut viewport =
            Self::new(logical.width, logical.height, scale_factor, max_pixel_ratio);
        // uncapped: the swapchain must match the window exactly
        if scale_factor <= max_pixel_ratio {
            viewport.physical = Some([size.width, size.height]);
        }
        viewport
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            (self.width / self.height) as f32
        } else {
            1.0
        }
    }

    /// Physical size of the render output. Zero when the surface is minimised.
    pub fn drawing_buffer_size(&self) -> [u32; 2] {
        self.physical.unwrap_or([
            (self.width * self.pixel_ratio).round() as u32,
            (self.height * self.pixel_ratio).round() as u32,
        ])
    }

    pub fn is_empty(&self) -> bool {
        let [w, h] = self.drawing_buffer_size();
        w == 0 || h == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_pixel_ratio() {
        let viewport = Viewport::new(800.0, 600.0, 3.0, 2.0);
        assert_eq!(viewport.pixel_ratio, 2.0);
        assert_eq!(viewport.drawing_buffer_size(), [1600, 1200]);
    }

    #[test]
    fn rounds_fractional_buffer_sizes() {
        let viewport = Viewport::new(333.0, 101.0, 1.5, 2.0);
        assert_eq!(viewport.drawing_buffer_size(), [500, 152]);
    }

    #[test]
    fn keeps_physical_window_size_at_fractional_scale() {
        let size = winit::dpi::PhysicalSize::new(61, 61);
        let viewport = Viewport::from_physical(size, 1.75, 2.0);
        assert_eq!(viewport.drawing_buffer_size(), [61, 61]);

        let size = winit::dpi::PhysicalSize::new(1023, 1023);
        let viewport = Viewport::from_physical(size, 1.25, 2.0);
        assert_eq!(viewport.drawing_buffer_size(), [1023, 1023]);
    }

    #[test]
    fn rescales_window_size_when_scale_is_capped() {
        let size = winit::dpi::PhysicalSize::new(3000, 1500);
        let viewport = Viewport::from_physical(size, 3.0, 2.0);
        assert_eq!(viewport.pixel_ratio, 2.0);
        assert_eq!(viewport.drawing_buffer_size(), [2000, 1000]);
    }

    #[test]
    fn converts_physical_window_sizes() {
        let viewport =
            Viewport::from_physical(winit::dpi::PhysicalSize::new(2048, 1536), 2.0, 2.0);
        assert_eq!(viewport.width, 1024.0);
        assert_eq!(viewport.height, 768.0);
        assert_eq!(viewport.drawing_buffer_size(), [2048, 1536]);
    }
}
