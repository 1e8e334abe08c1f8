pub mod app_size;
pub mod setup;
pub mod timed_serializer;

mod app;

pub use app::{calendar_config, SewaChrome};
