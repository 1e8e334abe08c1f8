use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use sewa::{storage, DataPath, DataPathType, Directory};
use tracing::{debug, error};

/// Writes a small json value to disk at most once per `delay`, and only
/// when it changed since the last write.
pub struct TimedSerializer<T: PartialEq + Copy + Serialize + for<'de> Deserialize<'de>> {
    directory: Directory,
    file_name: String,
    delay: Duration,
    last_saved: Option<Instant>,
    saved_item: Option<T>,
}

impl<T: PartialEq + Copy + Serialize + for<'de> Deserialize<'de>> TimedSerializer<T> {
    pub fn new(path: &DataPath, path_type: DataPathType, file_name: impl Into<String>) -> Self {
        Self {
            directory: Directory::new(path.path(path_type)),
            file_name: file_name.into(),
            delay: Duration::from_millis(1000),
            last_saved: None,
            saved_item: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn should_save(&self) -> bool {
        self.last_saved
            .map_or(true, |saved| saved.elapsed() >= self.delay)
    }

    // returns whether the item was written
    pub fn try_save(&mut self, cur_item: T) -> bool {
        if !self.should_save() || self.saved_item == Some(cur_item) {
            return false;
        }

        self.save(cur_item)
    }

    pub fn get_item(&self) -> Option<T> {
        if self.saved_item.is_some() {
            return self.saved_item;
        }

        let contents = match self.directory.get_file(&self.file_name) {
            Ok(contents) => contents,
            Err(_) => {
                debug!("no saved {}", self.file_name);
                return None;
            }
        };

        match serde_json::from_str::<T>(&contents) {
            Ok(item) => Some(item),
            Err(err) => {
                error!("invalid {} ({err}), ignoring", self.file_name);
                None
            }
        }
    }

    fn save(&mut self, cur_item: T) -> bool {
        let serialized = match serde_json::to_string(&cur_item) {
            Ok(serialized) => serialized,
            Err(err) => {
                error!("could not serialize {}: {err}", self.file_name);
                return false;
            }
        };

        if let Err(err) = storage::write_file(&self.directory.file_path, &self.file_name, &serialized) {
            error!("could not write {}: {err}", self.file_name);
            return false;
        }

        debug!("wrote {} {serialized}", self.file_name);
        self.last_saved = Some(Instant::now());
        self.saved_item = Some(cur_item);
        true
    }
}
