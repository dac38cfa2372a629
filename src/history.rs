use crate::flight::FlightRecord;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Scheduled flights kept across sessions, in insertion order.
pub struct History {
    path: PathBuf,
    records: Vec<FlightRecord>,
}

impl History {
    /// Loads the store at `path`; a missing file is an empty history.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let records = match fs::read_to_string(&path) {
            Ok(data) if data.trim().is_empty() => vec![],
            Ok(data) => serde_json::from_str(&data)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => vec![],
            Err(e) => return Err(e),
        };
        debug!(path = %path.display(), records = records.len(), "Opened history");
        Ok(History { path, records })
    }

    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes the extended history to disk first; on a failed write the
    /// in-memory records are left untouched.
    pub fn append(&mut self, records: impl IntoIterator<Item = FlightRecord>) -> io::Result<()> {
        let mut updated = self.records.clone();
        updated.extend(records);
        self.write(&updated)?;
        info!(added = updated.len() - self.records.len(), total = updated.len(), "History updated");
        self.records = updated;
        Ok(())
    }

    pub fn clear(&mut self) -> io::Result<()> {
        self.write(&[])?;
        self.records.clear();
        info!("History cleared");
        Ok(())
    }

    fn write(&self, records: &[FlightRecord]) -> io::Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let data = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, data)
    }
}
