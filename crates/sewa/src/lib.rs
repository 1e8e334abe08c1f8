pub mod api;
mod args;
mod error;
mod persist;
pub mod storage;

pub use api::{ApiClient, ApiConfig, ApiPromise, ApiResponse, Page};
pub use args::Args;
pub use error::Error;
pub use persist::*;
pub use storage::{DataPath, DataPathType, Directory};

pub type Result<T> = std::result::Result<T, error::Error>;
