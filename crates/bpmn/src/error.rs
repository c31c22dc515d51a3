//! Error types surfaced by the compiler.
//!
//! [`CompileError`] aborts compilation and reaches the caller.
//! [`LookupError`] never leaves the crate as an error: it is reported through
//! the warning sink and the offending flow is dropped.

use thiserror::Error;

/// Fatal compilation failure. No workflow is produced.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The input text is not well-formed XML.
    #[error("invalid BPMN XML: {0}")]
    InvalidXml(#[from] roxmltree::Error),
    /// No start event leads to a usable first element.
    #[error("no start event leads to a supported element, expected one of: {supported}")]
    NoEntryPoint {
        /// Comma separated list of tags an entry point may resolve to.
        supported: String,
    },
    /// Strict mode was requested and compilation reported warnings.
    #[error("compilation reported {count} warning(s) in strict mode, first: {first}")]
    StrictWarnings { count: usize, first: String },
}

/// Failure to resolve a flow target to a single element.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("no task found with id {id}")]
    TaskNotFound { id: String },
    #[error("{count} elements share the id {id}")]
    DuplicateTask { id: String, count: usize },
}
