//! Floating controls in the top-right corner: load status, background
//! toggle and the light/dark theme switch.

use eframe::egui;

use profile_card::theme::ThemePreference;

use super::ProfileApp;

impl ProfileApp {
    pub fn draw_toolbar(&mut self, ctx: &egui::Context) {
        egui::Area::new(egui::Id::new("toolbar"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if self.loading {
                        ui.spinner();
                        ui.weak("Loading profile...");
                    }

                    let running = self.animator.is_running();
                    let bg = ui
                        .selectable_label(running, "\u{2728}")
                        .on_hover_text(if running {
                            "Stop background"
                        } else {
                            "Start background"
                        });
                    if bg.clicked() {
                        self.toggle_background();
                    }

                    // Theme switch
                    let label = match self.theme.current() {
                        ThemePreference::Dark => "\u{263E}",
                        ThemePreference::Light => "\u{2600}",
                    };
                    let switch = ui
                        .add(egui::Button::new(label).min_size(egui::vec2(28.0, 24.0)))
                        .on_hover_text("Toggle theme");
                    if switch.clicked() {
                        let theme = self.theme.toggle();
                        ctx.set_visuals(theme.visuals());
                    }

                    self.hover_interactive |= bg.hovered() || switch.hovered();
                });
            });
    }
}
