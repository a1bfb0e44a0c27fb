//! Dynamic adaptor: one function, several compiled variants, one choice.
//!
//! The adaptor is built with a baseline variant plus any number of
//! higher-tier variants. On first execution (or an explicit
//! [`resolve`](FunctionDynamicAdaptor::resolve)) it asks the detector for the
//! CPU tier and freezes the highest registered variant the CPU can run.
//! Every later call goes straight to that variant.
//!
//! Resolution is guarded by a `OnceLock`: concurrent first calls agree on a
//! single choice, and there is no way back to the unresolved state.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use crate::column::Column;
use crate::config::DispatchSettings;
use crate::data_type::DataType;
use crate::error::Result;
use crate::functions::ScalarFunction;

use super::detect::{best_target, TargetArch};

/// Reports the best tier the CPU supports.
pub type TargetDetector = fn() -> TargetArch;

struct Registration {
    arch: TargetArch,
    implementation: Box<dyn ScalarFunction>,
    invocations: AtomicU64,
}

impl Registration {
    fn new(arch: TargetArch, implementation: Box<dyn ScalarFunction>) -> Self {
        Self {
            arch,
            implementation,
            invocations: AtomicU64::new(0),
        }
    }
}

/// Collects variants before the adaptor is frozen.
pub struct FunctionDynamicAdaptorBuilder {
    /// Sorted by tier; index 0 is always [`TargetArch::Default`].
    registrations: Vec<Registration>,
    detector: TargetDetector,
    max_target: Option<TargetArch>,
}

impl FunctionDynamicAdaptorBuilder {
    /// Registers the variant compiled for `arch`.
    ///
    /// A second registration for the same tier replaces the first.
    #[must_use]
    pub fn register_implementation<F>(mut self, arch: TargetArch, implementation: F) -> Self
    where
        F: ScalarFunction + 'static,
    {
        let registration = Registration::new(arch, Box::new(implementation));
        match self
            .registrations
            .binary_search_by_key(&arch, |r| r.arch)
        {
            Ok(index) => {
                tracing::warn!(
                    function = registration.implementation.name(),
                    tier = %arch,
                    "replacing implementation registered twice"
                );
                self.registrations[index] = registration;
            }
            Err(index) => self.registrations.insert(index, registration),
        }
        self
    }

    /// Replaces CPU detection, e.g. to pin a tier in tests.
    #[must_use]
    pub fn with_detector(mut self, detector: TargetDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Caps the tier the adaptor may select.
    #[must_use]
    pub fn with_max_target(mut self, max_target: Option<TargetArch>) -> Self {
        self.max_target = max_target;
        self
    }

    /// Freezes the registrations. Resolution happens on first use.
    #[must_use]
    pub fn build(self) -> FunctionDynamicAdaptor {
        FunctionDynamicAdaptor {
            registrations: self.registrations,
            selected: OnceLock::new(),
            detector: self.detector,
            max_target: self.max_target,
        }
    }
}

/// A [`ScalarFunction`] that forwards to the best variant for this CPU.
pub struct FunctionDynamicAdaptor {
    registrations: Vec<Registration>,
    selected: OnceLock<usize>,
    detector: TargetDetector,
    max_target: Option<TargetArch>,
}

impl FunctionDynamicAdaptor {
    /// Starts an adaptor around the always-runnable baseline variant.
    pub fn builder<F>(
        default_implementation: F,
        settings: &DispatchSettings,
    ) -> FunctionDynamicAdaptorBuilder
    where
        F: ScalarFunction + 'static,
    {
        FunctionDynamicAdaptorBuilder {
            registrations: vec![Registration::new(
                TargetArch::Default,
                Box::new(default_implementation),
            )],
            detector: best_target,
            max_target: settings.max_target,
        }
    }

    fn select(&self) -> usize {
        let detected = (self.detector)();
        let ceiling = match self.max_target {
            Some(max) if max < detected => max,
            Some(max) => {
                if max > detected {
                    tracing::warn!(
                        function = self.name(),
                        max_target = %max,
                        detected = %detected,
                        "configured max_target is not supported by this CPU"
                    );
                }
                detected
            }
            None => detected,
        };
        let index = self
            .registrations
            .iter()
            .rposition(|r| r.arch <= ceiling)
            .unwrap_or(0);
        tracing::debug!(
            function = self.name(),
            detected = %detected,
            selected = %self.registrations[index].arch,
            "resolved implementation"
        );
        index
    }

    fn selected(&self) -> &Registration {
        let index = *self.selected.get_or_init(|| self.select());
        &self.registrations[index]
    }

    /// Resolves now instead of on first execution; returns the chosen tier.
    pub fn resolve(&self) -> TargetArch {
        self.selected().arch
    }

    /// Returns `true` once the choice is frozen.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.selected.get().is_some()
    }

    /// The frozen tier, if resolution has happened.
    #[must_use]
    pub fn selected_target(&self) -> Option<TargetArch> {
        self.selected
            .get()
            .map(|&index| self.registrations[index].arch)
    }

    /// Registered tiers, weakest first.
    #[must_use]
    pub fn registered_targets(&self) -> Vec<TargetArch> {
        self.registrations.iter().map(|r| r.arch).collect()
    }

    /// Number of executions routed to each registered tier.
    #[must_use]
    pub fn invocation_counts(&self) -> Vec<(TargetArch, u64)> {
        self.registrations
            .iter()
            .map(|r| (r.arch, r.invocations.load(Ordering::Relaxed)))
            .collect()
    }

    fn default_implementation(&self) -> &dyn ScalarFunction {
        self.registrations[0].implementation.as_ref()
    }
}

impl ScalarFunction for FunctionDynamicAdaptor {
    fn name(&self) -> &'static str {
        self.default_implementation().name()
    }

    fn number_of_arguments(&self) -> usize {
        self.default_implementation().number_of_arguments()
    }

    fn use_default_implementation_for_constants(&self) -> bool {
        self.default_implementation()
            .use_default_implementation_for_constants()
    }

    fn return_type(&self, arguments: &[DataType]) -> Result<DataType> {
        self.default_implementation().return_type(arguments)
    }

    fn execute(&self, arguments: &[&Column], input_rows_count: usize) -> Result<Column> {
        let registration = self.selected();
        registration.invocations.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(
            function = self.name(),
            tier = %registration.arch,
            rows = input_rows_count,
            "execute"
        );
        registration
            .implementation
            .execute(arguments, input_rows_count)
    }
}

impl fmt::Debug for FunctionDynamicAdaptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDynamicAdaptor")
            .field("name", &self.name())
            .field("registered", &self.registered_targets())
            .field("selected", &self.selected_target())
            .field("max_target", &self.max_target)
            .finish_non_exhaustive()
    }
}
