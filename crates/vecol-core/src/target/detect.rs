//! Runtime CPU capability detection.
//!
//! Detection runs once per process and is cached; CPU features cannot change
//! while the process is alive.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Instruction-set tier a function variant is compiled for.
///
/// Tiers are totally ordered; a CPU supporting a tier supports every tier
/// below it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TargetArch {
    /// Baseline code, runnable everywhere.
    #[default]
    Default,
    /// SSE4.2 + POPCNT.
    Sse42,
    /// AVX.
    Avx,
    /// AVX2.
    Avx2,
    /// AVX-512F + AVX-512BW.
    Avx512,
}

impl TargetArch {
    /// Every tier, weakest first.
    pub const ALL: [Self; 5] = [
        Self::Default,
        Self::Sse42,
        Self::Avx,
        Self::Avx2,
        Self::Avx512,
    ];

    /// Lowercase name, as used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Sse42 => "sse42",
            Self::Avx => "avx",
            Self::Avx2 => "avx2",
            Self::Avx512 => "avx512",
        }
    }

    /// Target features enabled when compiling this tier's variants.
    #[must_use]
    pub const fn features(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Sse42 => "sse4.2,popcnt",
            Self::Avx => "sse4.2,popcnt,avx",
            Self::Avx2 => "sse4.2,popcnt,avx,avx2",
            Self::Avx512 => "sse4.2,popcnt,avx,avx2,avx512f,avx512bw",
        }
    }
}

impl fmt::Display for TargetArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetArch {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|arch| arch.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "target".to_string(),
                message: format!("unknown target '{s}'"),
            })
    }
}

/// Cached best tier - detected once at first use.
static BEST_TARGET: OnceLock<TargetArch> = OnceLock::new();

#[cfg(target_arch = "x86_64")]
fn cpu_has(arch: TargetArch) -> bool {
    match arch {
        TargetArch::Default => true,
        TargetArch::Sse42 => {
            is_x86_feature_detected!("sse4.2") && is_x86_feature_detected!("popcnt")
        }
        TargetArch::Avx => is_x86_feature_detected!("avx"),
        TargetArch::Avx2 => is_x86_feature_detected!("avx2"),
        TargetArch::Avx512 => {
            is_x86_feature_detected!("avx512f") && is_x86_feature_detected!("avx512bw")
        }
    }
}

#[cfg(not(target_arch = "x86_64"))]
fn cpu_has(arch: TargetArch) -> bool {
    arch == TargetArch::Default
}

/// Walks the tiers upward and stops at the first one the CPU lacks, so the
/// result implies support for every lower tier.
fn detect_best_target() -> TargetArch {
    let best = TargetArch::ALL
        .into_iter()
        .take_while(|&arch| cpu_has(arch))
        .last()
        .unwrap_or_default();
    tracing::debug!(tier = %best, "detected CPU capability");
    best
}

/// Returns the highest tier the running CPU supports.
#[inline]
#[must_use]
pub fn best_target() -> TargetArch {
    *BEST_TARGET.get_or_init(detect_best_target)
}

/// Returns `true` if variants compiled for `arch` may run on this CPU.
#[inline]
#[must_use]
pub fn is_supported(arch: TargetArch) -> bool {
    arch <= best_target()
}
