use super::{InputDocument, Location, PollutionSnapshot, PollutionSource};
use crate::error::AqiError;
use std::path::PathBuf;

/// Source backed by a directory of saved documents, one per location.
///
/// `Location::City("New York")` is read from `<dir>/new-york.json`;
/// coordinates from `<dir>/<lat>_<lon>.json` with four decimals.
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, location: &Location) -> PathBuf {
        self.dir.join(format!("{}.json", slug(location)))
    }
}

fn slug(location: &Location) -> String {
    match location {
        Location::City(name) => name
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-"),
        Location::Coordinates { lat, lon } => format!("{lat:.4}_{lon:.4}"),
    }
}

impl PollutionSource for JsonDirSource {
    fn fetch(&self, location: &Location) -> Result<PollutionSnapshot, AqiError> {
        let path = self.path_for(location);
        let fail = |reason: String| AqiError::Source {
            source_name: self.source_name().to_string(),
            location: location.to_string(),
            reason,
        };

        let json = std::fs::read_to_string(&path)
            .map_err(|e| fail(format!("{}: {e}", path.display())))?;
        let doc = InputDocument::parse(&json).map_err(|e| fail(e.to_string()))?;
        let mut snapshot = doc
            .into_snapshot(&location.to_string())
            .map_err(|e| fail(e.to_string()))?;
        if let Location::City(name) = location {
            snapshot.label = name.clone();
        }
        tracing::debug!(path = %path.display(), readings = snapshot.readings.len(), "loaded snapshot");
        Ok(snapshot)
    }

    fn source_name(&self) -> &str {
        "json-dir"
    }
}
