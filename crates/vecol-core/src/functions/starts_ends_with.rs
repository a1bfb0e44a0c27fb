//! `startsWith(haystack, needle)` and `endsWith(haystack, needle)`.
//!
//! Returns `UInt8` 1 when the needle's bytes equal the start (or end) of the
//! haystack's bytes, 0 otherwise, including when the needle is longer than the
//! haystack. Comparison is exact: no case folding, no collation.
//!
//! The kernel is written once over [`StringSource`] and instantiated for the
//! 16 haystack/needle encoding pairs, then compiled once per [`TargetArch`].

use std::marker::PhantomData;

use crate::column::{Column, ColumnVector};
use crate::data_type::DataType;
use crate::declare_multitarget;
use crate::error::{Error, Result};
use crate::gather::{ConstSource, FixedSource, StringSource, VariableSource};
use crate::target::{FunctionDynamicAdaptor, TargetArch};

use super::{Context, ScalarFunction};

/// Which end of the haystack a needle is compared against.
pub trait MatchMode: Send + Sync + 'static {
    /// Function name.
    const NAME: &'static str;

    /// Compares `needle` with the matching end of `haystack`.
    ///
    /// Callers guarantee `needle.len() <= haystack.len()`.
    fn matches(haystack: &[u8], needle: &[u8]) -> bool;
}

/// `startsWith`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Prefix;

impl MatchMode for Prefix {
    const NAME: &'static str = "startsWith";

    #[inline(always)]
    fn matches(haystack: &[u8], needle: &[u8]) -> bool {
        &haystack[..needle.len()] == needle
    }
}

/// `endsWith`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Suffix;

impl MatchMode for Suffix {
    const NAME: &'static str = "endsWith";

    #[inline(always)]
    fn matches(haystack: &[u8], needle: &[u8]) -> bool {
        &haystack[haystack.len() - needle.len()..] == needle
    }
}

fn illegal_column<M: MatchMode>() -> Error {
    Error::IllegalColumn { function: M::NAME }
}

/// Lock-step loop over one haystack/needle source pair.
#[inline(always)]
fn execute<'a, M, H, N>(mut haystack: H, mut needle: N, input_rows_count: usize) -> Result<Column>
where
    M: MatchMode,
    H: StringSource<'a>,
    N: StringSource<'a>,
{
    if haystack.column_size() != input_rows_count || needle.column_size() != input_rows_count {
        return Err(Error::SizesOfColumnsDoesntMatch {
            function: M::NAME,
            rows: input_rows_count,
            haystack: haystack.column_size(),
            needle: needle.column_size(),
        });
    }

    let mut res = Vec::with_capacity(input_rows_count);
    while !haystack.is_end() {
        let h = haystack.get_whole();
        let n = needle.get_whole();

        res.push(u8::from(n.len() <= h.len() && M::matches(h, n)));

        haystack.next();
        needle.next();
    }
    Ok(Column::UInt8(ColumnVector::from(res)))
}

#[inline(always)]
fn dispatch_needle<'a, M, H>(
    haystack: H,
    needle: &'a Column,
    input_rows_count: usize,
) -> Result<Column>
where
    M: MatchMode,
    H: StringSource<'a>,
{
    match needle {
        Column::String(c) => execute::<M, _, _>(haystack, VariableSource::new(c), input_rows_count),
        Column::FixedString(c) => {
            execute::<M, _, _>(haystack, FixedSource::new(c), input_rows_count)
        }
        Column::Const(c) => match c.data_column() {
            Column::String(inner) => execute::<M, _, _>(
                haystack,
                ConstSource::new(VariableSource::new(inner), c.len()),
                input_rows_count,
            ),
            Column::FixedString(inner) => execute::<M, _, _>(
                haystack,
                ConstSource::new(FixedSource::new(inner), c.len()),
                input_rows_count,
            ),
            _ => Err(illegal_column::<M>()),
        },
        _ => Err(illegal_column::<M>()),
    }
}

/// Picks the source for each column and runs the kernel.
#[inline(always)]
fn execute_columns<'a, M: MatchMode>(
    haystack: &'a Column,
    needle: &'a Column,
    input_rows_count: usize,
) -> Result<Column> {
    match haystack {
        Column::String(c) => {
            dispatch_needle::<M, _>(VariableSource::new(c), needle, input_rows_count)
        }
        Column::FixedString(c) => {
            dispatch_needle::<M, _>(FixedSource::new(c), needle, input_rows_count)
        }
        Column::Const(c) => match c.data_column() {
            Column::String(inner) => dispatch_needle::<M, _>(
                ConstSource::new(VariableSource::new(inner), c.len()),
                needle,
                input_rows_count,
            ),
            Column::FixedString(inner) => dispatch_needle::<M, _>(
                ConstSource::new(FixedSource::new(inner), c.len()),
                needle,
                input_rows_count,
            ),
            _ => Err(illegal_column::<M>()),
        },
        _ => Err(illegal_column::<M>()),
    }
}

declare_multitarget! {
    mod starts_ends_with_targets {
        fn execute_columns<M: MatchMode>(
            haystack: &Column,
            needle: &Column,
            input_rows_count: usize,
        ) -> Result<Column>;
    }
}

/// Runs the variant compiled for `arch` directly, without an adaptor.
///
/// Falls back to the baseline variant when the CPU lacks `arch`.
pub fn execute_for_target<M: MatchMode>(
    arch: TargetArch,
    haystack: &Column,
    needle: &Column,
    input_rows_count: usize,
) -> Result<Column> {
    starts_ends_with_targets::call::<M>(arch, haystack, needle, input_rows_count)
}

/// The function as compiled for one tier.
#[derive(Debug)]
pub struct StartsEndsWithTarget<M> {
    arch: TargetArch,
    _mode: PhantomData<fn() -> M>,
}

impl<M: MatchMode> StartsEndsWithTarget<M> {
    /// The variant compiled for `arch`.
    #[must_use]
    pub fn new(arch: TargetArch) -> Self {
        Self {
            arch,
            _mode: PhantomData,
        }
    }

    /// Tier this variant was compiled for.
    #[must_use]
    pub fn arch(&self) -> TargetArch {
        self.arch
    }
}

impl<M: MatchMode> ScalarFunction for StartsEndsWithTarget<M> {
    fn name(&self) -> &'static str {
        M::NAME
    }

    fn number_of_arguments(&self) -> usize {
        2
    }

    fn use_default_implementation_for_constants(&self) -> bool {
        true
    }

    fn return_type(&self, arguments: &[DataType]) -> Result<DataType> {
        if arguments.len() != 2 {
            return Err(Error::NumberOfArgumentsDoesntMatch {
                function: M::NAME,
                passed: arguments.len(),
                expected: 2,
            });
        }
        if let Some(bad) = arguments.iter().find(|t| !t.is_string_or_fixed_string()) {
            return Err(Error::IllegalTypeOfArgument {
                type_name: bad.name(),
                function: M::NAME,
            });
        }
        Ok(DataType::UInt8)
    }

    fn execute(&self, arguments: &[&Column], input_rows_count: usize) -> Result<Column> {
        let &[haystack, needle] = arguments else {
            return Err(Error::NumberOfArgumentsDoesntMatch {
                function: M::NAME,
                passed: arguments.len(),
                expected: 2,
            });
        };
        execute_for_target::<M>(self.arch, haystack, needle, input_rows_count)
    }
}

/// Factory for the dispatching `startsWith`/`endsWith` function.
#[derive(Debug)]
pub struct FunctionStartsEndsWith<M>(PhantomData<fn() -> M>);

impl<M: MatchMode> FunctionStartsEndsWith<M> {
    /// Function name.
    pub const NAME: &'static str = M::NAME;

    /// Builds an adaptor holding every tier's variant.
    ///
    /// The tier is chosen on first execution and kept for the adaptor's
    /// lifetime.
    #[must_use]
    pub fn create(context: &Context) -> FunctionDynamicAdaptor {
        let mut builder = FunctionDynamicAdaptor::builder(
            StartsEndsWithTarget::<M>::new(TargetArch::Default),
            &context.settings.dispatch,
        );
        for arch in [
            TargetArch::Sse42,
            TargetArch::Avx,
            TargetArch::Avx2,
            TargetArch::Avx512,
        ] {
            builder = builder.register_implementation(arch, StartsEndsWithTarget::<M>::new(arch));
        }
        builder.build()
    }
}

/// `startsWith(haystack, needle)`.
pub type FunctionStartsWith = FunctionStartsEndsWith<Prefix>;

/// `endsWith(haystack, needle)`.
pub type FunctionEndsWith = FunctionStartsEndsWith<Suffix>;
