//! Scalar functions over column batches.
//!
//! A function validates argument types up front ([`ScalarFunction::return_type`])
//! and then executes whole batches ([`ScalarFunction::execute`]). Errors abort
//! the batch; there are no partial results.

use crate::column::{Column, ColumnConst};
use crate::config::Settings;
use crate::data_type::DataType;
use crate::error::{Error, Result};

pub mod starts_ends_with;

pub use starts_ends_with::{
    FunctionEndsWith, FunctionStartsEndsWith, FunctionStartsWith, MatchMode, Prefix, Suffix,
};

/// Settings a function is created with.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Effective settings.
    pub settings: Settings,
}

impl Context {
    /// Creates a context carrying `settings`.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

/// A scalar function evaluated one batch at a time.
pub trait ScalarFunction: Send + Sync {
    /// Function name.
    fn name(&self) -> &'static str;

    /// Number of arguments the function takes.
    fn number_of_arguments(&self) -> usize;

    /// When every argument is constant, evaluate once on the single value and
    /// broadcast the result instead of iterating all rows.
    fn use_default_implementation_for_constants(&self) -> bool {
        false
    }

    /// Checks argument types and returns the result type.
    fn return_type(&self, arguments: &[DataType]) -> Result<DataType>;

    /// Evaluates the function over `input_rows_count` rows.
    fn execute(&self, arguments: &[&Column], input_rows_count: usize) -> Result<Column>;
}

/// Executes `function`, checking arity and folding all-constant arguments.
pub fn execute_function(
    function: &dyn ScalarFunction,
    arguments: &[&Column],
    input_rows_count: usize,
) -> Result<Column> {
    let expected = function.number_of_arguments();
    if arguments.len() != expected {
        return Err(Error::NumberOfArgumentsDoesntMatch {
            function: function.name(),
            passed: arguments.len(),
            expected,
        });
    }

    if function.use_default_implementation_for_constants()
        && !arguments.is_empty()
        && arguments.iter().all(|c| c.is_const())
    {
        if arguments.iter().any(|c| c.len() != input_rows_count) {
            let haystack = arguments[0].len();
            return Err(Error::SizesOfColumnsDoesntMatch {
                function: function.name(),
                rows: input_rows_count,
                haystack,
                needle: arguments.get(1).map_or(haystack, |c| c.len()),
            });
        }
        let inner: Vec<&Column> = arguments
            .iter()
            .map(|&c| match c {
                Column::Const(constant) => constant.data_column(),
                other => other,
            })
            .collect();
        let result = function.execute(&inner, 1)?;
        return Ok(Column::Const(ColumnConst::try_new(result, input_rows_count)?));
    }

    function.execute(arguments, input_rows_count)
}
