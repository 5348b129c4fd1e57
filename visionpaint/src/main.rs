//! visionpaint - standalone Paint.exe

use eframe::NativeOptions;
use visionpaint::PaintApp;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([600.0, 450.0])
            .with_title("Paint.exe"),
        ..Default::default()
    };

    eframe::run_native(
        "visionpaint",
        options,
        Box::new(|cc| {
            visioncore::VisionTheme::default().apply(&cc.egui_ctx);
            Box::new(PaintApp::new())
        }),
    )
}
