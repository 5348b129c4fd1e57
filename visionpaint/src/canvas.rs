//! Canvas - bitmap the strokes are rasterized into

use crate::tools::WHITE;
use image::{ImageBuffer, Rgba, RgbaImage};

/// A white bitmap that pencil and eraser strokes are painted onto
#[derive(Clone)]
pub struct Canvas {
    pub image: RgbaImage,
    /// Set whenever pixels change; the view re-uploads the texture and clears it.
    pub dirty: bool,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: ImageBuffer::from_pixel(width.max(1), height.max(1), WHITE),
            dirty: true,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Resize to new dimensions. Keeps existing pixels (crops if smaller,
    /// pads with white if larger).
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        let (new_width, new_height) = (new_width.max(1), new_height.max(1));
        if new_width == self.width() && new_height == self.height() {
            return;
        }
        let mut new_image = ImageBuffer::from_pixel(new_width, new_height, WHITE);
        let copy_width = self.width().min(new_width);
        let copy_height = self.height().min(new_height);
        for y in 0..copy_height {
            for x in 0..copy_width {
                new_image.put_pixel(x, y, *self.image.get_pixel(x, y));
            }
        }
        self.image = new_image;
        self.dirty = true;
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        (x < self.width() && y < self.height()).then(|| *self.image.get_pixel(x, y))
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        if x < self.width() && y < self.height() {
            self.image.put_pixel(x, y, color);
            self.dirty = true;
        }
    }

    fn set_pixel_safe(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as u32, y as u32, color);
        }
    }

    /// Stamp a round dab, used for the start of a stroke and its caps.
    pub fn dab(&mut self, x: i32, y: i32, color: Rgba<u8>, width: u32) {
        self.draw_circle_filled(x, y, width as i32 / 2, color);
    }

    /// Bresenham line with a round brush of `width` at every step.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba<u8>, width: u32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.dab(x, y, color, width);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn draw_circle_filled(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba<u8>) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.set_pixel_safe(cx + dx, cy + dy, color);
                }
            }
        }
    }

    pub fn fill(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
        self.dirty = true;
    }

    pub fn clear(&mut self) {
        self.fill(WHITE);
    }

    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| *p == WHITE)
    }

    pub fn to_texture_data(&self) -> egui::ColorImage {
        let size = [self.width() as usize, self.height() as usize];
        let pixels: Vec<egui::Color32> = self
            .image
            .pixels()
            .map(|p| egui::Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3]))
            .collect();
        egui::ColorImage { size, pixels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{BLACK, ERASER_WIDTH, PALETTE, PENCIL_WIDTH};

    #[test]
    fn test_new_canvas_is_white() {
        let canvas = Canvas::new(40, 30);
        assert!(canvas.is_blank());
        assert_eq!((canvas.width(), canvas.height()), (40, 30));
    }

    #[test]
    fn test_pencil_line_covers_endpoints() {
        let mut canvas = Canvas::new(50, 50);
        canvas.draw_line(5, 5, 40, 20, PALETTE[1], PENCIL_WIDTH);
        assert_eq!(canvas.pixel(5, 5), Some(PALETTE[1]));
        assert_eq!(canvas.pixel(40, 20), Some(PALETTE[1]));
        // Pencil is 3 px wide: one pixel either side of the center line
        assert_eq!(canvas.pixel(5, 6), Some(PALETTE[1]));
        assert_eq!(canvas.pixel(5, 8), Some(WHITE));
    }

    #[test]
    fn test_eraser_paints_white() {
        let mut canvas = Canvas::new(60, 60);
        canvas.fill(BLACK);
        canvas.draw_line(30, 30, 30, 30, WHITE, ERASER_WIDTH);
        assert_eq!(canvas.pixel(30, 30), Some(WHITE));
        assert_eq!(canvas.pixel(39, 30), Some(WHITE));
        assert_eq!(canvas.pixel(45, 30), Some(BLACK));
    }

    #[test]
    fn test_strokes_clip_at_edges() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_line(-20, -20, 30, 30, BLACK, ERASER_WIDTH);
        assert_eq!(canvas.pixel(0, 0), Some(BLACK));
        assert_eq!(canvas.pixel(10, 10), None);
    }

    #[test]
    fn test_clear_restores_white() {
        let mut canvas = Canvas::new(20, 20);
        canvas.dab(10, 10, PALETTE[2], PENCIL_WIDTH);
        assert!(!canvas.is_blank());
        canvas.dirty = false;
        canvas.clear();
        assert!(canvas.is_blank());
        assert!(canvas.dirty);
    }

    #[test]
    fn test_resize_keeps_drawing() {
        let mut canvas = Canvas::new(20, 20);
        canvas.set_pixel(3, 3, BLACK);
        canvas.resize(40, 10);
        assert_eq!(canvas.pixel(3, 3), Some(BLACK));
        assert_eq!(canvas.pixel(30, 5), Some(WHITE));
        assert_eq!(canvas.pixel(3, 15), None);
    }

    #[test]
    fn test_texture_matches_size() {
        let canvas = Canvas::new(7, 3);
        let tex = canvas.to_texture_data();
        assert_eq!(tex.size, [7, 3]);
        assert_eq!(tex.pixels.len(), 21);
    }
}
