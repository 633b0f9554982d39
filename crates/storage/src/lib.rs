#![forbid(unsafe_code)]

pub mod files;
pub mod repository;
pub mod sheet;

pub use files::{DelimitedSource, WorkbookSource, open_source};
pub use repository::{BankCache, InMemorySource, LoadError, QuestionSource};
pub use sheet::{Sheet, assemble_bank};
