//! On-disk question banks.

mod delimited;
mod mapping;
mod workbook;

use std::path::Path;

pub use delimited::DelimitedSource;
pub use workbook::WorkbookSource;

use crate::repository::{LoadError, QuestionSource};

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];
const DELIMITED_EXTENSIONS: &[&str] = &["csv"];

/// Pick a source implementation from the file extension.
///
/// # Errors
///
/// Returns `LoadError::Missing` if nothing exists at `path`, or
/// `LoadError::UnsupportedFormat` for unknown extensions.
pub fn open_source(path: &Path) -> Result<Box<dyn QuestionSource>, LoadError> {
    if !path.is_file() {
        return Err(LoadError::Missing {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        return Ok(Box::new(WorkbookSource::new(path)));
    }
    if DELIMITED_EXTENSIONS.contains(&extension.as_str()) {
        return Ok(Box::new(DelimitedSource::new(path)));
    }
    Err(LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })
}
