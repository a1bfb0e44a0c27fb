//! Minimal column containers consumed by the function kernels.
//!
//! Only the encodings the kernels and row output need are modelled:
//! packed variable-length strings, fixed-stride strings, constant broadcast
//! and plain numeric vectors.

use crate::error::{Error, Result};

/// Variable-length strings packed into one buffer with an end-offset index.
///
/// Row `i` spans `chars[offsets[i - 1]..offsets[i]]` (with an implicit `0`
/// before the first row).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnString {
    chars: Vec<u8>,
    offsets: Vec<usize>,
}

impl ColumnString {
    /// Creates an empty column.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a column from any sequence of byte strings.
    pub fn from_strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut column = Self::new();
        for value in values {
            column.insert_data(value.as_ref());
        }
        column
    }

    /// Appends one row.
    pub fn insert_data(&mut self, value: &[u8]) {
        self.chars.extend_from_slice(value);
        self.offsets.push(self.chars.len());
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Returns `true` if the column has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Packed bytes of every row.
    #[must_use]
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    /// End offset of every row into [`chars`](Self::chars).
    #[must_use]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Bytes of row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.len()`.
    #[must_use]
    pub fn get(&self, row: usize) -> &[u8] {
        let start = if row == 0 { 0 } else { self.offsets[row - 1] };
        &self.chars[start..self.offsets[row]]
    }
}

/// Strings of one shared width `n`, stored back to back.
///
/// Shorter values are right-padded with zero bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFixedString {
    chars: Vec<u8>,
    n: usize,
}

impl ColumnFixedString {
    /// Creates an empty column of width `n`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero; [`try_new`](Self::try_new) reports it instead.
    #[must_use]
    pub fn new(n: usize) -> Self {
        match Self::try_new(n) {
            Ok(column) => column,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates an empty column of width `n`, rejecting zero width.
    pub fn try_new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(Error::ZeroFixedStringWidth);
        }
        Ok(Self {
            chars: Vec::new(),
            n,
        })
    }

    /// Builds a width-`n` column, padding each value with zero bytes.
    pub fn from_strings<I, S>(n: usize, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut column = Self::try_new(n)?;
        for value in values {
            column.insert_data(value.as_ref())?;
        }
        Ok(column)
    }

    /// Appends one row, padded to the column width.
    pub fn insert_data(&mut self, value: &[u8]) -> Result<()> {
        if value.len() > self.n {
            return Err(Error::TooLargeStringSize {
                size: value.len(),
                n: self.n,
            });
        }
        self.chars.extend_from_slice(value);
        self.chars.resize(self.chars.len() + self.n - value.len(), 0);
        Ok(())
    }

    /// Width of every row.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len() / self.n
    }

    /// Returns `true` if the column has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Packed bytes of every row.
    #[must_use]
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    /// Bytes of row `row`, padding included.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.len()`.
    #[must_use]
    pub fn get(&self, row: usize) -> &[u8] {
        &self.chars[row * self.n..(row + 1) * self.n]
    }
}

/// One value logically repeated for `size` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnConst {
    data: Box<Column>,
    size: usize,
}

impl ColumnConst {
    /// Wraps a one-row column as a constant of `size` rows.
    ///
    /// A constant inner column is unwrapped first, so constants never nest.
    ///
    /// # Panics
    ///
    /// Panics if `data` does not hold exactly one row; [`try_new`](Self::try_new)
    /// reports it instead.
    #[must_use]
    pub fn new(data: Column, size: usize) -> Self {
        match Self::try_new(data, size) {
            Ok(column) => column,
            Err(err) => panic!("{err}"),
        }
    }

    /// Wraps a one-row column as a constant of `size` rows, rejecting any
    /// other row count.
    pub fn try_new(data: Column, size: usize) -> Result<Self> {
        let data = match data {
            Column::Const(inner) => *inner.data,
            other => other,
        };
        if data.len() != 1 {
            return Err(Error::IllegalConstColumnSize { rows: data.len() });
        }
        Ok(Self {
            data: Box::new(data),
            size,
        })
    }

    /// The one-row column holding the value.
    #[must_use]
    pub fn data_column(&self) -> &Column {
        &self.data
    }

    /// Logical number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the constant spans no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Expands the constant into a full column of [`len`](Self::len) rows.
    #[must_use]
    pub fn convert_to_full_column(&self) -> Column {
        match self.data.as_ref() {
            Column::String(c) => {
                let values = std::iter::repeat_n(c.get(0), self.size);
                Column::String(ColumnString::from_strings(values))
            }
            Column::FixedString(c) => Column::FixedString(ColumnFixedString {
                chars: c.chars().repeat(self.size),
                n: c.n(),
            }),
            Column::UInt8(c) => Column::UInt8(ColumnVector::from(vec![c.data()[0]; self.size])),
            Column::Int64(c) => Column::Int64(ColumnVector::from(vec![c.data()[0]; self.size])),
            Column::Float64(c) => Column::Float64(ColumnVector::from(vec![c.data()[0]; self.size])),
            Column::Const(_) => unreachable!("ColumnConst::try_new unwraps nested constants"),
        }
    }
}

/// Plain vector of fixed-size numbers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnVector<T> {
    data: Vec<T>,
}

impl<T> ColumnVector<T> {
    /// Values, one per row.
    #[must_use]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the column has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consumes the column, returning its values.
    #[must_use]
    pub fn into_data(self) -> Vec<T> {
        self.data
    }
}

impl<T> From<Vec<T>> for ColumnVector<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// A column in one of the supported encodings.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Variable-length strings.
    String(ColumnString),
    /// Fixed-width strings.
    FixedString(ColumnFixedString),
    /// Constant broadcast of a one-row column.
    Const(ColumnConst),
    /// Unsigned bytes; boolean function results use 0/1.
    UInt8(ColumnVector<u8>),
    /// Signed 64-bit integers.
    Int64(ColumnVector<i64>),
    /// 64-bit floats.
    Float64(ColumnVector<f64>),
}

impl Column {
    /// Shorthand for a constant string column of `rows` rows.
    pub fn const_string(value: impl AsRef<[u8]>, rows: usize) -> Self {
        Self::Const(ColumnConst::new(
            Self::String(ColumnString::from_strings([value])),
            rows,
        ))
    }

    /// Name of the encoding.
    #[must_use]
    pub fn family_name(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::FixedString(_) => "FixedString",
            Self::Const(_) => "Const",
            Self::UInt8(_) => "UInt8",
            Self::Int64(_) => "Int64",
            Self::Float64(_) => "Float64",
        }
    }

    /// Number of rows (logical rows for constants).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::String(c) => c.len(),
            Self::FixedString(c) => c.len(),
            Self::Const(c) => c.len(),
            Self::UInt8(c) => c.len(),
            Self::Int64(c) => c.len(),
            Self::Float64(c) => c.len(),
        }
    }

    /// Returns `true` if the column has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` for constant columns.
    #[must_use]
    pub fn is_const(&self) -> bool {
        matches!(self, Self::Const(_))
    }

    /// Materializes constants; other columns are returned as a copy.
    #[must_use]
    pub fn convert_to_full_column_if_const(&self) -> Self {
        match self {
            Self::Const(c) => c.convert_to_full_column(),
            other => other.clone(),
        }
    }
}
