use crate::model::{Listing, StorageError};
use crate::utils::slugify;
use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, warn};

const DEBUG_DIR: &str = "debug_html";

/// Writes one JSON array per run under a fixed output directory.
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<slug>-<label>-<YYYY-MM-DD-HH-MM>.json`
    pub fn file_name(query: &str, label: &str, now: DateTime<Local>) -> String {
        format!("{}-{}-{}.json", slugify(query), label, now.format("%Y-%m-%d-%H-%M"))
    }

    /// Serializes `listings` to a fresh file and returns its path.
    pub fn save(&self, query: &str, label: &str, listings: &[Listing]) -> Result<PathBuf, StorageError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(Self::file_name(query, label, Local::now()));

        info!("Saving {} results to {}", listings.len(), path.display());
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, listings)?;
        writer.flush()?;

        Ok(path)
    }

    /// Keeps the raw HTML of a page that produced nothing, for later inspection.
    pub fn save_debug_html(&self, query: &str, label: &str, page: u32, html: &str) {
        let folder = self.dir.join(DEBUG_DIR);
        if let Err(e) = fs::create_dir_all(&folder) {
            warn!("Failed to create debug folder: {}", e);
            return;
        }
        let filename = folder.join(format!("{}-{}-page{}.html", slugify(query), label, page));
        if let Err(e) = fs::write(&filename, html) {
            warn!("Failed to write debug HTML: {}", e);
        } else {
            info!("Saved debug HTML: {}", filename.display());
        }
    }
}
