mod app;

use eframe::egui;

use app::ProfileApp;
use profile_card::config::Config;

fn main() {
    env_logger::init();

    let config = Config::from_env();
    log::debug!("Starting with {:?}", config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Discord Profile",
        options,
        Box::new(|cc| Ok(Box::new(ProfileApp::new(cc, config)))),
    );

    if let Err(e) = result {
        log::error!("Failed to start profile card: {}", e);
        std::process::exit(1);
    }
}
