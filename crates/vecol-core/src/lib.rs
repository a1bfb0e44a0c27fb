//! # `vecol` Core
//!
//! Runtime-dispatched vectorized kernels for a columnar database's scalar
//! functions.
//!
//! ## Features
//!
//! - **Multi-target compilation**: one generic kernel body, compiled once per
//!   CPU tier (baseline, SSE4.2, AVX, AVX2, AVX-512)
//! - **Runtime dispatch**: the best variant is picked once per function from
//!   cached CPU detection
//! - **Encoding-agnostic sources**: the same loop runs over variable-length,
//!   fixed-width and constant string columns
//! - **JSONEachRow output**: newline-delimited JSON rows with heartbeats
//!
//! ## Quick Start
//!
//! ```rust
//! use vecol_core::column::{Column, ColumnString};
//! use vecol_core::functions::{execute_function, Context, FunctionStartsWith, ScalarFunction};
//! use vecol_core::DataType;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let starts_with = FunctionStartsWith::create(&Context::default());
//!     starts_with.return_type(&[DataType::String, DataType::String])?;
//!
//!     let haystack = Column::String(ColumnString::from_strings(["clickhouse", "click"]));
//!     let needle = Column::const_string("click", 2);
//!
//!     let result = execute_function(&starts_with, &[&haystack, &needle], 2)?;
//!     assert_eq!(result, Column::UInt8(vec![1, 1].into()));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
// Clippy lints configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(
    test,
    allow(
        clippy::doc_markdown,
        clippy::uninlined_format_args,
        clippy::cast_possible_truncation,
        clippy::float_cmp
    )
)]

pub mod block;
pub mod column;
pub mod config;
pub mod data_type;
#[cfg(test)]
mod data_type_tests;
pub mod error;
pub mod formats;
pub mod functions;
pub mod gather;
pub mod target;

pub use block::{Block, ColumnWithTypeAndName};
pub use column::{Column, ColumnConst, ColumnFixedString, ColumnString, ColumnVector};
pub use config::{ConfigError, DispatchSettings, FormatSettings, JsonFormatSettings, Settings};
pub use data_type::DataType;
pub use error::{Error, Result};
pub use formats::{Heartbeat, JsonEachRowRowOutput};
pub use functions::{
    execute_function, Context, FunctionEndsWith, FunctionStartsWith, ScalarFunction,
};
pub use target::{best_target, is_supported, FunctionDynamicAdaptor, TargetArch};
