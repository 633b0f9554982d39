use std::path::{Path, PathBuf};

use calamine::{Reader, open_workbook_auto};

use super::mapping::cell_text;
use crate::repository::{LoadError, QuestionSource, path_key};
use crate::sheet::Sheet;

/// Spreadsheet workbook (`xlsx`, `xls`, `ods`, ...). Every worksheet is read in
/// workbook order; the first row of each is its header.
#[derive(Debug, Clone)]
pub struct WorkbookSource {
    path: PathBuf,
}

impl WorkbookSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unreadable(&self, reason: impl ToString) -> LoadError {
        LoadError::Unreadable {
            source_name: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl QuestionSource for WorkbookSource {
    fn cache_key(&self) -> String {
        path_key(&self.path)
    }

    fn read_sheets(&self) -> Result<Vec<Sheet>, LoadError> {
        if !self.path.is_file() {
            return Err(LoadError::Missing {
                path: self.path.clone(),
            });
        }

        let mut workbook = open_workbook_auto(&self.path).map_err(|e| self.unreadable(e))?;
        let names = workbook.sheet_names().to_vec();

        let mut sheets = Vec::with_capacity(names.len());
        for name in names {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| self.unreadable(e))?;
            let mut rows = range
                .rows()
                .map(|row| row.iter().map(cell_text).collect::<Vec<_>>());
            let headers = rows.next().unwrap_or_default();
            sheets.push(Sheet {
                name,
                headers,
                rows: rows.collect(),
            });
        }
        Ok(sheets)
    }
}
