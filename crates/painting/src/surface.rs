//! CPU surface for painting - RGBA f32 storage and circular stamp rasterization

use tracing::trace;

use crate::target::StampTarget;

/// An RGBA CPU surface for painting
/// Stores pixels as [f32; 4] in row-major order
pub struct CpuSurface {
    /// Surface dimensions
    pub width: u32,
    pub height: u32,
    pixels: Vec<[f32; 4]>,
}

impl CpuSurface {
    /// Create a new surface with the given dimensions, initialized to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![[0.0, 0.0, 0.0, 0.0]; pixel_count],
        }
    }

    /// Clear the surface to a solid color
    pub fn clear(&mut self, color: [f32; 4]) {
        self.pixels.fill(color);
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        Some(self.pixels[index])
    }

    /// Blend a color onto an existing pixel using alpha compositing
    /// Formula: out = src * alpha + dst * (1 - alpha)
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [f32; 4], opacity: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        let dst = self.pixels[index];

        let src_alpha = color[3] * opacity;
        let inv_src_alpha = 1.0 - src_alpha;

        self.pixels[index] = [
            color[0] * src_alpha + dst[0] * inv_src_alpha,
            color[1] * src_alpha + dst[1] * inv_src_alpha,
            color[2] * src_alpha + dst[2] * inv_src_alpha,
            src_alpha + dst[3] * inv_src_alpha,
        ];
    }

    /// Blend a filled circle onto the surface
    ///
    /// Every pixel whose center lies inside the circle is blended once with
    /// `opacity`. Returns the bounding box of the affected region
    /// (x, y, width, height), or None if nothing was touched.
    pub fn fill_circle(
        &mut self,
        center_x: f32,
        center_y: f32,
        radius: f32,
        color: [f32; 4],
        opacity: f32,
    ) -> Option<(u32, u32, u32, u32)> {
        if radius <= 0.0 || opacity <= 0.0 {
            return None;
        }

        let x_min = ((center_x - radius).floor().max(0.0) as u32).min(self.width);
        let y_min = ((center_y - radius).floor().max(0.0) as u32).min(self.height);
        let x_max = ((center_x + radius).ceil().max(0.0) as u32).min(self.width);
        let y_max = ((center_y + radius).ceil().max(0.0) as u32).min(self.height);

        if x_min >= x_max || y_min >= y_max {
            return None;
        }

        let radius_sq = radius * radius;
        for py in y_min..y_max {
            for px in x_min..x_max {
                let dx = (px as f32 + 0.5) - center_x;
                let dy = (py as f32 + 0.5) - center_y;
                if dx * dx + dy * dy <= radius_sq {
                    self.blend_pixel(px, py, color, opacity);
                }
            }
        }

        Some((x_min, y_min, x_max - x_min, y_max - y_min))
    }

    /// Get raw pixel data for GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Get the total number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }
}

/// Draws stamps onto a [`CpuSurface`] in a single color
pub struct SurfaceTarget<'a> {
    surface: &'a mut CpuSurface,
    color: [f32; 4],
}

impl<'a> SurfaceTarget<'a> {
    pub fn new(surface: &'a mut CpuSurface, color: [f32; 4]) -> Self {
        Self { surface, color }
    }
}

impl StampTarget for SurfaceTarget<'_> {
    /// Circles are rotation invariant, so `_rotation` is ignored.
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, alpha: f32, _rotation: f32) {
        let region = self.surface.fill_circle(x, y, radius, self.color, alpha);
        if region.is_none() {
            trace!("  stamp at ({:.1}, {:.1}) outside surface bounds", x, y);
        }
    }
}
