mod settings_handler;

pub use settings_handler::{
    Settings, SettingsHandler, DEFAULT_API_BASE_URL, DEFAULT_UPCOMING_LIMIT,
};
