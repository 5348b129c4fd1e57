//! Desktop icons: a vector glyph over a boxed label

use crate::filesystem::{FileSystemItem, ItemKind, PAINT_ID, TUTORIAL_ID};
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Response, Sense, Shape, Stroke, Ui, Vec2};
use std::hash::Hash;
use visioncore::safety::ellipsize;
use visioncore::theme::PopColors;

pub const ICON_WIDTH: f32 = 112.0;
const GLYPH_SIZE: f32 = 40.0;
const LABEL_HEIGHT: f32 = 22.0;
pub const ICON_HEIGHT: f32 = GLYPH_SIZE + 16.0 + LABEL_HEIGHT;
const LABEL_CHARS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Drive,
    Folder,
    Text,
    Game,
    Palette,
    Help,
    Lock,
    Video,
}

impl Glyph {
    pub fn for_item(item: &FileSystemItem) -> Self {
        if item.id == PAINT_ID {
            return Glyph::Palette;
        }
        if item.id == TUTORIAL_ID {
            return Glyph::Help;
        }
        if item.locked {
            return Glyph::Lock;
        }
        match item.kind {
            ItemKind::Folder => Glyph::Folder,
            ItemKind::Text => Glyph::Text,
            ItemKind::Application => Glyph::Game,
            ItemKind::Locked => Glyph::Lock,
            ItemKind::Video => Glyph::Video,
        }
    }
}

/// Draw an icon at `pos` (top-left). Click selects, double-click opens; the
/// caller decides what those mean.
pub fn desktop_icon(ui: &mut Ui, id_source: impl Hash, pos: Pos2, label: &str, glyph: Glyph, selected: bool) -> Response {
    let rect = Rect::from_min_size(pos, Vec2::new(ICON_WIDTH, ICON_HEIGHT));
    let response = ui.interact(rect, ui.id().with(("icon", id_source)), Sense::click());
    let painter = ui.painter();

    let glyph_rect = Rect::from_center_size(
        Pos2::new(rect.center().x, rect.top() + 8.0 + GLYPH_SIZE / 2.0),
        Vec2::splat(GLYPH_SIZE),
    );
    let glyph_rect = if response.is_pointer_button_down_on() {
        glyph_rect.shrink(2.0)
    } else {
        glyph_rect
    };
    if selected {
        painter.circle_filled(glyph_rect.center(), GLYPH_SIZE * 0.7, Color32::from_white_alpha(60));
    }
    draw_glyph(painter, glyph_rect, glyph);

    let text = ellipsize(label, LABEL_CHARS);
    let (fill, text_color) = if selected {
        (PopColors::PINK, PopColors::WHITE)
    } else if response.hovered() {
        (Color32::from_gray(250), PopColors::BLACK)
    } else {
        (PopColors::WHITE, PopColors::BLACK)
    };
    let galley = painter.layout_no_wrap(text, FontId::proportional(11.0), text_color);
    let label_rect = Rect::from_center_size(
        Pos2::new(rect.center().x, rect.bottom() - LABEL_HEIGHT / 2.0),
        Vec2::new(galley.size().x + 16.0, LABEL_HEIGHT),
    );
    painter.rect_filled(label_rect.translate(Vec2::splat(2.0)), 0.0, PopColors::BLACK);
    painter.rect_filled(label_rect, 0.0, fill);
    painter.rect_stroke(label_rect, 0.0, Stroke::new(2.0, PopColors::BLACK));
    painter.galley(label_rect.center() - galley.size() / 2.0, galley, text_color);

    response
}

/// Paint a glyph inside `rect`, with its half-transparent drop shadow.
pub fn draw_glyph(painter: &Painter, rect: Rect, glyph: Glyph) {
    draw_glyph_shape(painter, rect.translate(Vec2::splat(2.0)), glyph, Some(Color32::from_black_alpha(128)));
    draw_glyph_shape(painter, rect, glyph, None);
}

fn draw_glyph_shape(painter: &Painter, r: Rect, glyph: Glyph, flat: Option<Color32>) {
    let outline = Stroke::new(2.0, flat.unwrap_or(PopColors::BLACK));
    let fill = |c: Color32| flat.unwrap_or(c);
    let w = r.width();
    let h = r.height();
    let at = |fx: f32, fy: f32| Pos2::new(r.left() + w * fx, r.top() + h * fy);

    match glyph {
        Glyph::Folder => {
            let tab = Rect::from_min_max(at(0.05, 0.15), at(0.45, 0.35));
            let body = Rect::from_min_max(at(0.05, 0.3), at(0.95, 0.85));
            for part in [tab, body] {
                painter.rect_filled(part, 0.0, fill(PopColors::YELLOW));
                painter.rect_stroke(part, 0.0, outline);
            }
        }
        Glyph::Text => {
            let page = Rect::from_min_max(at(0.2, 0.05), at(0.8, 0.95));
            painter.rect_filled(page, 0.0, fill(PopColors::WHITE));
            painter.rect_stroke(page, 0.0, outline);
            if flat.is_none() {
                for i in 0..4 {
                    let y = r.top() + h * (0.3 + 0.15 * i as f32);
                    painter.hline((page.left() + 5.0)..=(page.right() - 5.0), y, Stroke::new(1.5, PopColors::BLACK));
                }
            }
        }
        Glyph::Game => {
            let pad = Rect::from_min_max(at(0.05, 0.3), at(0.95, 0.8));
            painter.rect_filled(pad, h * 0.2, fill(PopColors::LIME));
            painter.rect_stroke(pad, h * 0.2, outline);
            if flat.is_none() {
                let c = at(0.28, 0.55);
                painter.hline((c.x - 6.0)..=(c.x + 6.0), c.y, Stroke::new(2.5, PopColors::BLACK));
                painter.vline(c.x, (c.y - 6.0)..=(c.y + 6.0), Stroke::new(2.5, PopColors::BLACK));
                painter.circle_filled(at(0.68, 0.5), 2.5, PopColors::BLACK);
                painter.circle_filled(at(0.78, 0.62), 2.5, PopColors::BLACK);
            }
        }
        Glyph::Palette => {
            painter.circle_filled(r.center(), w * 0.45, fill(PopColors::PINK));
            painter.circle_stroke(r.center(), w * 0.45, outline);
            if flat.is_none() {
                let dots = [
                    (at(0.35, 0.3), PopColors::YELLOW),
                    (at(0.62, 0.28), PopColors::CYAN),
                    (at(0.75, 0.5), PopColors::LIME),
                    (at(0.3, 0.55), PopColors::WHITE),
                ];
                for (p, c) in dots {
                    painter.circle_filled(p, 3.5, c);
                    painter.circle_stroke(p, 3.5, Stroke::new(1.0, PopColors::BLACK));
                }
            }
        }
        Glyph::Help => {
            painter.circle_filled(r.center(), w * 0.45, fill(PopColors::CYAN));
            painter.circle_stroke(r.center(), w * 0.45, outline);
            if flat.is_none() {
                painter.text(r.center(), Align2::CENTER_CENTER, "?", FontId::proportional(h * 0.6), PopColors::BLACK);
            }
        }
        Glyph::Lock => {
            let red = Color32::from_rgb(0xef, 0x44, 0x44);
            let shackle_color = flat.unwrap_or(red);
            painter.circle_stroke(at(0.5, 0.4), w * 0.2, Stroke::new(3.0, shackle_color));
            let body = Rect::from_min_max(at(0.2, 0.45), at(0.8, 0.92));
            painter.rect_filled(body, 3.0, fill(Color32::from_rgb(0xfe, 0xe2, 0xe2)));
            painter.rect_stroke(body, 3.0, Stroke::new(2.0, shackle_color));
        }
        Glyph::Video => {
            let body = Rect::from_min_max(at(0.05, 0.25), at(0.7, 0.8));
            painter.rect_filled(body, 2.0, fill(PopColors::CYAN));
            painter.rect_stroke(body, 2.0, outline);
            let lens = vec![at(0.7, 0.45), at(0.95, 0.3), at(0.95, 0.75), at(0.7, 0.6)];
            painter.add(Shape::convex_polygon(lens, fill(PopColors::CYAN), outline));
        }
        Glyph::Drive => {
            let body = Rect::from_min_max(at(0.05, 0.3), at(0.95, 0.75));
            painter.rect_filled(body, 3.0, fill(PopColors::CYAN));
            painter.rect_stroke(body, 3.0, outline);
            if flat.is_none() {
                painter.hline((body.left() + 4.0)..=(body.right() - 4.0), body.center().y, Stroke::new(2.0, PopColors::BLACK));
                painter.circle_filled(at(0.78, 0.63), 2.5, PopColors::BLACK);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::{tutorial, FileTree, SECRET_ID};

    #[test]
    fn test_glyph_by_item() {
        let mut tree = FileTree::initial();
        let glyph = |tree: &FileTree, id: &str| Glyph::for_item(tree.find(id).expect("item"));
        assert_eq!(glyph(&tree, "about"), Glyph::Text);
        assert_eq!(glyph(&tree, "projects"), Glyph::Folder);
        assert_eq!(glyph(&tree, "trash"), Glyph::Folder);
        assert_eq!(glyph(&tree, "snake_game"), Glyph::Game);
        assert_eq!(glyph(&tree, "paint_app"), Glyph::Palette);
        assert_eq!(glyph(&tree, SECRET_ID), Glyph::Lock);
        tree.unlock_secret();
        assert_eq!(glyph(&tree, SECRET_ID), Glyph::Video);
        assert_eq!(Glyph::for_item(&tutorial()), Glyph::Help);
    }
}
