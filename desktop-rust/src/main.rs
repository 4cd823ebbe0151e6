mod app;
mod model;

use app::DesktopApp;

fn main() -> eframe::Result<()> {
    cableway_report::init_logging(false);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([500.0, 550.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "Cableway Inspection Report",
        options,
        Box::new(|_cc| Box::new(DesktopApp::default())),
    )
}
