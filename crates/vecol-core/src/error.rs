//! Error types for vecol-core.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by function resolution, kernel execution and row output.
#[derive(Error, Debug)]
pub enum Error {
    /// An argument type is not accepted by the function.
    #[error("Illegal type {type_name} of argument of function {function}")]
    IllegalTypeOfArgument {
        /// Name of the offending argument type.
        type_name: String,
        /// Function that rejected it.
        function: &'static str,
    },

    /// A column does not match any encoding the function can iterate.
    #[error("Illegal combination of columns as arguments of function {function}")]
    IllegalColumn {
        /// Function that rejected the columns.
        function: &'static str,
    },

    /// Wrong number of arguments passed to a function.
    #[error(
        "Number of arguments for function {function} doesn't match: passed {passed}, should be {expected}"
    )]
    NumberOfArgumentsDoesntMatch {
        /// Function name.
        function: &'static str,
        /// Number of arguments passed.
        passed: usize,
        /// Number of arguments the function takes.
        expected: usize,
    },

    /// Haystack and needle columns disagree with the batch row count.
    #[error(
        "Sizes of columns of function {function} don't match: expected {rows} rows, haystack has {haystack}, needle has {needle}"
    )]
    SizesOfColumnsDoesntMatch {
        /// Function name.
        function: &'static str,
        /// Rows in the batch.
        rows: usize,
        /// Rows in the haystack column.
        haystack: usize,
        /// Rows in the needle column.
        needle: usize,
    },

    /// A value does not fit a FixedString column.
    #[error("String of size {size} is too large for FixedString({n})")]
    TooLargeStringSize {
        /// Size of the rejected value.
        size: usize,
        /// Column width.
        n: usize,
    },

    /// A FixedString column was declared with zero width.
    #[error("FixedString width must be positive")]
    ZeroFixedStringWidth,

    /// A constant column was built over a column that does not hold one row.
    #[error("ColumnConst must wrap a column of one row, got {rows} rows")]
    IllegalConstColumnSize {
        /// Rows in the wrapped column.
        rows: usize,
    },

    /// A column handed to a data type for serialization has another layout.
    #[error("Column {column} cannot be serialized as {data_type}")]
    ColumnTypeMismatch {
        /// Data type name.
        data_type: String,
        /// Column family name.
        column: &'static str,
    },

    /// A row received more fields than the output header declares.
    #[error("Field {index} is out of range for a row of {fields} fields")]
    FieldOutOfRange {
        /// Zero-based index of the field being written.
        index: usize,
        /// Number of fields in the header.
        fields: usize,
    },

    /// IO error while writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for vecol operations.
pub type Result<T> = std::result::Result<T, Error>;
