use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use crate::repository::{LoadError, QuestionSource, path_key};
use crate::sheet::Sheet;

/// Comma-separated export of a single sheet, named after the file stem.
#[derive(Debug, Clone)]
pub struct DelimitedSource {
    path: PathBuf,
}

impl DelimitedSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sheet_name(&self) -> String {
        self.path
            .file_stem()
            .map_or_else(|| "Sheet1".to_string(), |stem| stem.to_string_lossy().into_owned())
    }

    fn unreadable(&self, reason: impl ToString) -> LoadError {
        LoadError::Unreadable {
            source_name: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl QuestionSource for DelimitedSource {
    fn cache_key(&self) -> String {
        path_key(&self.path)
    }

    fn read_sheets(&self) -> Result<Vec<Sheet>, LoadError> {
        if !self.path.is_file() {
            return Err(LoadError::Missing {
                path: self.path.clone(),
            });
        }

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| self.unreadable(e))?;

        let headers = reader
            .headers()
            .map_err(|e| self.unreadable(e))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| self.unreadable(e))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(vec![Sheet {
            name: self.sheet_name(),
            headers,
            rows,
        }])
    }
}
