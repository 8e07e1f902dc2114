//! `ProfileApp`: the top-level egui application state.
//!
//! Methods are split across the sibling sub-modules:
//!
//! - `lookup`:  background profile fetch and hand-off to the renderer
//! - `toolbar`: theme switch and load status
//! - `card`:    the profile card itself

pub mod card;
pub mod lookup;
pub mod toolbar;

use std::collections::HashMap;
use std::sync::mpsc;
use std::time::Instant;

use eframe::egui;

use profile_card::config::Config;
use profile_card::effects::{CardTilt, CursorFollow};
use profile_card::net::image::ImageLoader;
use profile_card::profile::ProfilePayload;
use profile_card::render::animator::{AnimationHandle, Animator, Surface, PARTICLE_COLOR};
use profile_card::render::color::parse_hex_color;
use profile_card::render::{BannerStyle, ProfileView};
use profile_card::theme::{FileStore, ThemeSwitch};

pub struct ProfileApp {
    pub config: Config,
    pub view: ProfileView,
    pub loading: bool,
    pub lookup_rx: Option<mpsc::Receiver<Option<ProfilePayload>>>,
    // Avatar / banner images
    pub images: ImageLoader,
    pub textures: HashMap<String, egui::TextureHandle>,
    // Background
    pub animator: Animator,
    pub animation: Option<AnimationHandle>,
    pub background_started: bool,
    pub surface: Option<Surface>,
    // Pointer effects
    pub cursor: CursorFollow,
    pub tilt: CardTilt,
    /// Set by widgets during the frame when the pointer is over something clickable.
    pub hover_interactive: bool,
    pub theme: ThemeSwitch,
    pub title_shown: String,
    pub last_frame: Instant,
}

impl ProfileApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let color = parse_hex_color(&config.particle_color).unwrap_or_else(|| {
            log::warn!(
                "Bad particle color {:?}; using default",
                config.particle_color
            );
            PARTICLE_COLOR
        });
        let theme = ThemeSwitch::new(Box::new(FileStore::new(&config.storage_path)));
        cc.egui_ctx.set_visuals(theme.current().visuals());

        let mut app = Self {
            animator: Animator::new(config.particle_count, color),
            config,
            view: ProfileView::default(),
            loading: false,
            lookup_rx: None,
            images: ImageLoader::new(),
            textures: HashMap::new(),
            animation: None,
            background_started: false,
            surface: None,
            cursor: CursorFollow::default(),
            tilt: CardTilt::default(),
            hover_interactive: false,
            theme,
            title_shown: String::new(),
            last_frame: Instant::now(),
        };
        app.start_lookup(&cc.egui_ctx);
        app
    }

    /// Seed the particle field on the first frame, once the window size is
    /// known, and keep its surface in sync with the window afterwards.
    fn sync_background(&mut self, rect: egui::Rect) {
        let surface = Surface::from(rect);

        if !self.background_started {
            self.background_started = true;
            let host = self.config.background.then_some(surface);
            self.animation = self.animator.start(host);
        } else if self.surface != Some(surface) {
            log::debug!("Background resized to {}x{}", surface.width, surface.height);
            self.animator.resize(surface);
        }
        self.surface = Some(surface);
    }

    /// Stop the running particle field, or seed a fresh one if stopped.
    pub fn toggle_background(&mut self) {
        match self.animation.take() {
            Some(handle) if !handle.is_stopped() => {
                handle.stop();
                log::info!("Particle field stopped");
            }
            _ => {
                let host = self.surface.filter(|_| self.config.background);
                self.animation = self.animator.start(host);
            }
        }
    }

    fn upload_images(&mut self, ctx: &egui::Context) {
        self.images.poll();

        let wanted = [self.view.avatar_url.clone(), self.banner_url()];
        for url in wanted.into_iter().flatten() {
            if self.textures.contains_key(&url) {
                continue;
            }
            if let Some(data) = self.images.take(&url) {
                let image = egui::ColorImage::from_rgba_unmultiplied(
                    [data.width as usize, data.height as usize],
                    &data.rgba,
                );
                let tex = ctx.load_texture(format!("img_{}", url), image, egui::TextureOptions::LINEAR);
                self.textures.insert(url, tex);
            } else {
                self.images.request(&url);
            }
        }
    }

    fn banner_url(&self) -> Option<String> {
        match &self.view.banner {
            BannerStyle::Cover { url } => Some(url.clone()),
            _ => None,
        }
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        if self.title_shown != self.view.title {
            self.title_shown = self.view.title.clone();
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.title_shown.clone()));
        }
    }
}

impl eframe::App for ProfileApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;

        self.check_lookup();
        self.upload_images(ctx);
        self.sync_title(ctx);

        ctx.set_visuals(self.theme.current().visuals());
        self.hover_interactive = false;

        let fill = ctx.style().visuals.panel_fill;
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(fill))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                self.sync_background(rect);
                self.animator.frame(ui.painter(), rect.min);

                self.tilt.advance(dt);
                self.draw_card(ui, rect);
            });

        self.draw_toolbar(ctx);

        // Custom cursor goes on top of everything.
        let pointer = ctx.input(|i| i.pointer.hover_pos());
        self.cursor.update(pointer, self.hover_interactive);
        if self.cursor.visible {
            ctx.set_cursor_icon(egui::CursorIcon::None);
        }
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("cursor"),
        ));
        self.cursor.paint(&painter, ctx.style().visuals.selection.bg_fill);

        if self.animator.is_running() || !self.tilt.is_settled() {
            ctx.request_repaint();
        }
    }
}
