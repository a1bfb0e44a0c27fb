//! Runtime instruction-set dispatch.
//!
//! # Module Structure
//!
//! - `detect` — cached CPU tier detection ([`TargetArch`], [`best_target`])
//! - `multitarget` — `declare_multitarget!`, one generic body compiled per tier
//! - `adaptor` — [`FunctionDynamicAdaptor`], freezes the best registered variant
//!
//! # Tiers
//!
//! | Tier      | Features enabled                         |
//! |-----------|------------------------------------------|
//! | `default` | baseline                                 |
//! | `sse42`   | SSE4.2, POPCNT                           |
//! | `avx`     | + AVX                                    |
//! | `avx2`    | + AVX2                                   |
//! | `avx512`  | + AVX-512F, AVX-512BW                    |
//!
//! Non-x86_64 targets always run the baseline.

// SAFETY: Shared invariants for target-featured code in this module tree.
// - Condition 1: A `#[target_feature]` entry is entered only after
//   `is_supported` confirmed its tier on the running CPU.
// - Condition 2: Tiers are detected as a chain, so support for a tier implies
//   every feature enabled by the tiers below it.
// Reason: target-featured entries are what makes per-tier code generation
// possible without separate builds.

mod adaptor;
mod detect;
mod multitarget;

pub use adaptor::{FunctionDynamicAdaptor, FunctionDynamicAdaptorBuilder, TargetDetector};
pub use detect::{best_target, is_supported, TargetArch};

#[cfg(test)]
mod detect_tests;
