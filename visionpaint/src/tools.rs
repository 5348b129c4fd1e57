//! Drawing tools and the color palette

use image::Rgba;

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Stroke width of the pencil, in pixels.
pub const PENCIL_WIDTH: u32 = 3;
/// Stroke width of the eraser, in pixels.
pub const ERASER_WIDTH: u32 = 20;

/// The seven palette colors, in toolbar order.
pub const PALETTE: [Rgba<u8>; 7] = [
    BLACK,
    Rgba([0xff, 0x00, 0x00, 255]),
    Rgba([0x00, 0xff, 0x00, 255]),
    Rgba([0x00, 0x00, 0xff, 255]),
    Rgba([0xff, 0xff, 0x00, 255]),
    Rgba([0xff, 0x00, 0xff, 255]),
    Rgba([0x00, 0xff, 0xff, 255]),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Pencil,
    Eraser,
}

impl Tool {
    pub fn all() -> &'static [Tool] {
        &[Tool::Pencil, Tool::Eraser]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Pencil => "pencil",
            Tool::Eraser => "eraser",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tool::Pencil => "✏",
            Tool::Eraser => "⌫",
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Tool::Pencil => PENCIL_WIDTH,
            Tool::Eraser => ERASER_WIDTH,
        }
    }
}

/// Current tool and color. Picking a color always switches back to the pencil.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Brush {
    pub tool: Tool,
    pub color: Rgba<u8>,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            tool: Tool::Pencil,
            color: BLACK,
        }
    }
}

impl Brush {
    pub fn pick_color(&mut self, color: Rgba<u8>) {
        self.color = color;
        self.tool = Tool::Pencil;
    }

    pub fn pick_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Color actually laid down: the eraser paints white.
    pub fn ink(&self) -> Rgba<u8> {
        match self.tool {
            Tool::Pencil => self.color,
            Tool::Eraser => WHITE,
        }
    }

    pub fn width(&self) -> u32 {
        self.tool.width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picking_color_selects_pencil() {
        let mut brush = Brush::default();
        brush.pick_tool(Tool::Eraser);
        assert_eq!(brush.ink(), WHITE);
        assert_eq!(brush.width(), 20);
        brush.pick_color(PALETTE[1]);
        assert_eq!(brush.tool, Tool::Pencil);
        assert_eq!(brush.ink(), Rgba([255, 0, 0, 255]));
        assert_eq!(brush.width(), 3);
    }

    #[test]
    fn test_eraser_keeps_color_for_later() {
        let mut brush = Brush::default();
        brush.pick_color(PALETTE[3]);
        brush.pick_tool(Tool::Eraser);
        brush.pick_tool(Tool::Pencil);
        assert_eq!(brush.ink(), PALETTE[3]);
    }
}
