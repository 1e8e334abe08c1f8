use crate::{storage, DataPath, DataPathType, Directory};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

const SETTINGS_FILE: &str = "settings.json";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_UPCOMING_LIMIT: usize = 4;

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Settings {
    pub api_base_url: String,
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
}

fn default_upcoming_limit() -> usize {
    DEFAULT_UPCOMING_LIMIT
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
        }
    }
}

pub struct SettingsHandler {
    directory: Directory,
    current_settings: Option<Settings>,
}

impl SettingsHandler {
    pub fn new(path: &DataPath) -> Self {
        let directory = Directory::new(path.path(DataPathType::Setting));

        Self {
            directory,
            current_settings: None,
        }
    }

    pub fn load(mut self) -> Self {
        match self.directory.get_file(SETTINGS_FILE) {
            Ok(contents_str) => match serde_json::from_str::<Settings>(&contents_str) {
                Ok(settings) => {
                    info!("loaded settings from {}", self.directory.file_path.display());
                    self.current_settings = Some(settings);
                }
                Err(err) => {
                    error!("Invalid settings format ({err}). Using defaults");
                    self.current_settings = Some(Settings::default());
                }
            },
            Err(_) => {
                error!("Could not read settings. Using defaults");
                self.current_settings = Some(Settings::default());
            }
        }

        self
    }

    pub fn save(&self) -> crate::Result<()> {
        let serialized = serde_json::to_string_pretty(&self.settings())?;
        storage::write_file(&self.directory.file_path, SETTINGS_FILE, &serialized)?;
        info!("wrote settings to {}", self.directory.file_path.display());
        Ok(())
    }

    pub fn settings(&self) -> Settings {
        self.current_settings.clone().unwrap_or_default()
    }
}
