//! visionsnake - standalone Snake.exe

use eframe::NativeOptions;
use visionsnake::SnakeWindow;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::var("VISIONOS_SEED").ok().and_then(|s| s.parse().ok());

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([360.0, 420.0])
            .with_title("Snake.exe"),
        ..Default::default()
    };

    eframe::run_native(
        "visionsnake",
        options,
        Box::new(move |cc| {
            visioncore::VisionTheme::default().apply(&cc.egui_ctx);
            Box::new(SnakeWindow::new(seed))
        }),
    )
}
