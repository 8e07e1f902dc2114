//! Profile lookup lifecycle for `ProfileApp`.
//!
//! The fetch runs once, on its own thread; `check_lookup` picks the result
//! up on the UI thread and hands it to the renderer.

use std::sync::mpsc;

use eframe::egui;

use profile_card::net::fetch::fetch_profile;
use profile_card::render::render;

use super::ProfileApp;

impl ProfileApp {
    /// Kick off the single profile fetch for this run.
    pub fn start_lookup(&mut self, ctx: &egui::Context) {
        if self.loading || self.lookup_rx.is_some() {
            return;
        }

        let url = match self.config.lookup_url() {
            Ok(url) => url,
            Err(e) => {
                log::error!(
                    "Bad lookup URL {:?} + {:?}: {}",
                    self.config.lookup_base,
                    self.config.user_id,
                    e
                );
                render(&mut self.view, None);
                return;
            }
        };

        self.loading = true;
        log::info!("Looking up profile at {}", url);

        let (tx, rx) = mpsc::channel();
        self.lookup_rx = Some(rx);
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let result = fetch_profile(url.as_str());
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    /// Poll the lookup channel and render the result once it arrives.
    pub fn check_lookup(&mut self) {
        let Some(rx) = &self.lookup_rx else {
            return;
        };

        let payload = match rx.try_recv() {
            Ok(payload) => payload,
            Err(mpsc::TryRecvError::Empty) => return,
            Err(mpsc::TryRecvError::Disconnected) => {
                log::error!("Profile lookup thread ended without a result");
                None
            }
        };

        render(&mut self.view, payload.as_ref());
        self.loading = false;
        self.lookup_rx = None;
    }
}
