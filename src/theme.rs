//! Dark theme and the palette shared by every widget

use egui::Color32;

use crate::core::scene::Paint;

pub mod colors {
    use super::Color32;

    // === Backgrounds ===
    pub const BG_PRIMARY: Color32 = Color32::from_rgb(11, 14, 20);
    pub const BG_ELEVATED: Color32 = Color32::from_rgb(20, 25, 34);
    pub const BG_HOVER: Color32 = Color32::from_rgb(32, 39, 52);

    // === Text ===
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 234, 240);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 168, 180);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(96, 104, 118);

    // === Lines & Borders ===
    pub const BORDER: Color32 = Color32::from_rgb(44, 52, 66);

    // === Accents ===
    pub const ACCENT: Color32 = Color32::from_rgb(91, 155, 213);
    pub const OPERATIONAL: Color32 = Color32::from_rgb(46, 125, 50);
    pub const PLANNED: Color32 = Color32::from_rgb(230, 81, 0);
    pub const CORRECT: Color32 = Color32::from_rgb(76, 175, 80);
    pub const WRONG: Color32 = Color32::from_rgb(229, 57, 53);

    // === Mesh ===
    /// Base colour of links, packets and nodes: rgb(91, 155, 213)
    pub const MESH_RGB: (u8, u8, u8) = (91, 155, 213);
    pub const MESH_NODE_ALPHA: f32 = 0.3;
    pub const MESH_PACKET_ALPHA: f32 = 0.5;
}

/// Mesh colour at the given opacity
pub fn mesh_color(alpha: f32) -> Color32 {
    let (r, g, b) = colors::MESH_RGB;
    Color32::from_rgba_unmultiplied(r, g, b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Resolve a diagram colour against the palette
pub fn paint_color(paint: Paint) -> Color32 {
    match paint {
        Paint::Rgb(r, g, b) => Color32::from_rgb(r, g, b),
        Paint::Text => colors::TEXT_PRIMARY,
        Paint::TextMuted => colors::TEXT_SECONDARY,
        Paint::Outline => colors::TEXT_MUTED,
        Paint::Faint => colors::BORDER,
        Paint::White => Color32::WHITE,
    }
}

pub fn guide_visuals() -> egui::Visuals {
    use colors::*;

    let mut visuals = egui::Visuals::dark();

    visuals.panel_fill = BG_PRIMARY;
    visuals.window_fill = BG_ELEVATED;
    visuals.extreme_bg_color = BG_PRIMARY;
    visuals.faint_bg_color = BG_ELEVATED;

    visuals.override_text_color = Some(TEXT_PRIMARY);

    visuals.widgets.noninteractive.bg_fill = BG_PRIMARY;
    visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, BORDER);

    visuals.widgets.inactive.bg_fill = BG_ELEVATED;
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, BORDER);
    visuals.widgets.inactive.weak_bg_fill = BG_ELEVATED;

    visuals.widgets.hovered.bg_fill = BG_HOVER;
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.weak_bg_fill = BG_HOVER;

    visuals.widgets.active.bg_fill = BG_HOVER;
    visuals.widgets.active.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(1.0, ACCENT);
    visuals.widgets.active.weak_bg_fill = BG_HOVER;

    visuals.selection.bg_fill = ACCENT.gamma_multiply(0.4);
    visuals.selection.stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);

    visuals.hyperlink_color = ACCENT;

    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_color_alpha() {
        let c = mesh_color(colors::MESH_PACKET_ALPHA);
        assert_eq!(c.a(), 128);
        assert_eq!(mesh_color(2.0).a(), 255);
    }

    #[test]
    fn test_paint_rgb_passthrough() {
        assert_eq!(paint_color(Paint::Rgb(74, 144, 217)), Color32::from_rgb(74, 144, 217));
    }
}
