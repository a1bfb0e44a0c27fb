//! Encoding-agnostic iteration over string columns.
//!
//! Kernels are written once against [`StringSource`] and instantiated per
//! source pair, so the same loop runs over variable, fixed and constant
//! columns without branching on the encoding per row.

pub mod sources;

pub use sources::{ConstSource, FixedSource, StringSource, VariableSource};

#[cfg(test)]
mod sources_tests;
