use std::time::Duration;

use egui::Context;

use sewa::{DataPath, DataPathType};

use crate::timed_serializer::TimedSerializer;

pub struct AppSizeHandler {
    serializer: TimedSerializer<egui::Vec2>,
}

impl AppSizeHandler {
    pub fn new(path: &DataPath) -> Self {
        let serializer = TimedSerializer::new(path, DataPathType::Setting, "app_size.json")
            .with_delay(Duration::from_millis(500));

        Self { serializer }
    }

    pub fn try_save_app_size(&mut self, ctx: &Context) {
        // no resize-in-progress signal, so debounce on the delay instead
        let cur_size = ctx.input(|i| i.screen_rect.size());
        self.serializer.try_save(cur_size);
    }

    pub fn get_app_size(&self) -> Option<egui::Vec2> {
        self.serializer.get_item()
    }
}
