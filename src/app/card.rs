//! Profile card painting.
//!
//! Banner strip, avatar, name labels and badges, all taken from the
//! current `ProfileView`. The card slides toward the pointer while hovered.

use eframe::egui;

use profile_card::render::color::parse_hex_color;
use profile_card::render::{cover_uv, BannerStyle};

use super::ProfileApp;

const CARD_SIZE: egui::Vec2 = egui::vec2(380.0, 440.0);
const CARD_ROUNDING: f32 = 16.0;
const BANNER_HEIGHT: f32 = 120.0;
const AVATAR_RADIUS: f32 = 48.0;
const TILT_SHIFT: f32 = 8.0;

impl ProfileApp {
    pub fn draw_card(&mut self, ui: &mut egui::Ui, area: egui::Rect) {
        let base = egui::Rect::from_center_size(area.center(), CARD_SIZE);

        let hover = ui.interact(base, ui.id().with("profile_card"), egui::Sense::hover());
        self.tilt.hover(base, hover.hover_pos());

        let shift = self.tilt.parallax(TILT_SHIFT);
        let rect = base.translate(shift);
        let visuals = ui.visuals().clone();
        let painter = ui.painter().clone();

        // Shadow falls away from the raised edge.
        painter.rect_filled(
            base.translate(egui::vec2(0.0, 10.0) - shift * 0.5),
            CARD_ROUNDING,
            egui::Color32::from_black_alpha(70),
        );
        painter.rect(
            rect,
            CARD_ROUNDING,
            visuals.window_fill,
            visuals.window_stroke,
        );

        let banner = egui::Rect::from_min_size(rect.min, egui::vec2(rect.width(), BANNER_HEIGHT));
        self.paint_banner(&painter, banner, &visuals);

        let avatar_center = egui::pos2(rect.left() + 24.0 + AVATAR_RADIUS, banner.bottom());
        painter.circle_filled(avatar_center, AVATAR_RADIUS + 6.0, visuals.window_fill);
        let avatar_tex = self
            .view
            .avatar_url
            .as_ref()
            .and_then(|url| self.textures.get(url));
        match avatar_tex {
            Some(tex) => {
                let avatar_rect =
                    egui::Rect::from_center_size(avatar_center, egui::Vec2::splat(AVATAR_RADIUS * 2.0));
                egui::Image::new(egui::load::SizedTexture::from_handle(tex))
                    .rounding(AVATAR_RADIUS)
                    .paint_at(ui, avatar_rect);
            }
            None => {
                painter.circle_filled(avatar_center, AVATAR_RADIUS, visuals.faint_bg_color);
                painter.circle_stroke(avatar_center, AVATAR_RADIUS, visuals.window_stroke);
            }
        }

        let text_rect = egui::Rect::from_min_max(
            egui::pos2(rect.left() + 24.0, banner.bottom() + AVATAR_RADIUS + 16.0),
            rect.max - egui::vec2(24.0, 20.0),
        );
        let view = &self.view;
        ui.allocate_new_ui(egui::UiBuilder::new().max_rect(text_rect), |ui| {
            ui.label(egui::RichText::new(&view.display_name).size(24.0).strong());
            ui.label(egui::RichText::new(&view.username).weak());
            ui.add_space(8.0);
            ui.label(egui::RichText::new(&view.user_id).monospace().size(12.0));
            ui.label(egui::RichText::new(&view.created_at).size(12.0));

            if !view.badges.is_empty() {
                ui.add_space(6.0);
                ui.separator();
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);
                    for badge in &view.badges {
                        egui::Frame::none()
                            .fill(visuals.faint_bg_color)
                            .rounding(8.0)
                            .inner_margin(egui::Margin::symmetric(8.0, 4.0))
                            .show(ui, |ui| {
                                ui.label(
                                    egui::RichText::new(format!(
                                        "{} {}",
                                        badge.icon.glyph(),
                                        badge.label
                                    ))
                                    .size(12.0),
                                );
                            });
                    }
                });
            }
        });
    }

    fn paint_banner(&self, painter: &egui::Painter, banner: egui::Rect, visuals: &egui::Visuals) {
        let rounding = egui::Rounding {
            nw: CARD_ROUNDING,
            ne: CARD_ROUNDING,
            sw: 0.0,
            se: 0.0,
        };
        let default_fill = visuals.selection.bg_fill;

        match &self.view.banner {
            BannerStyle::Cover { url } => match self.textures.get(url) {
                Some(tex) => {
                    painter.image(
                        tex.id(),
                        banner,
                        cover_uv(tex.size_vec2(), banner.size()),
                        egui::Color32::WHITE,
                    );
                }
                None => {
                    painter.rect_filled(banner, rounding, default_fill);
                }
            },
            BannerStyle::Fill { color } => {
                let fill = parse_hex_color(color)
                    .map(|c| c.to_color32())
                    .unwrap_or(default_fill);
                painter.rect_filled(banner, rounding, fill);
            }
            BannerStyle::Default => {
                painter.rect_filled(banner, rounding, default_fill);
            }
        }
    }
}
