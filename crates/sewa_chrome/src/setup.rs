use eframe::NativeOptions;
use sewa::DataPath;

use crate::app_size::AppSizeHandler;

const DEFAULT_SIZE: [f32; 2] = [1200.0, 800.0];
const MIN_SIZE: [f32; 2] = [720.0, 480.0];

pub fn generate_native_options(paths: &DataPath) -> NativeOptions {
    let size = AppSizeHandler::new(paths)
        .get_app_size()
        .unwrap_or(DEFAULT_SIZE.into());

    NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Sewa Calendar")
            .with_inner_size(size)
            .with_min_inner_size(MIN_SIZE),
        ..Default::default()
    }
}
