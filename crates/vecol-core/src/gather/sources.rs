//! Sources: cursors yielding one byte span per row.
//!
//! A source borrows its column and never copies bytes. Advancing past the
//! last row is a caller bug; indexing then panics rather than reading out of
//! bounds.

use crate::column::{ColumnFixedString, ColumnString};

/// Cursor over the rows of a string-like column.
pub trait StringSource<'a> {
    /// Bytes of the current row.
    fn get_whole(&self) -> &'a [u8];

    /// Moves to the next row.
    fn next(&mut self);

    /// Returns `true` once every row has been visited.
    fn is_end(&self) -> bool;

    /// Index of the current row.
    fn row_num(&self) -> usize;

    /// Number of rows this source yields.
    fn column_size(&self) -> usize;
}

/// Source over a [`ColumnString`].
#[derive(Debug, Clone)]
pub struct VariableSource<'a> {
    chars: &'a [u8],
    offsets: &'a [usize],
    prev_offset: usize,
    row_num: usize,
}

impl<'a> VariableSource<'a> {
    /// Starts at the first row of `column`.
    #[must_use]
    pub fn new(column: &'a ColumnString) -> Self {
        Self {
            chars: column.chars(),
            offsets: column.offsets(),
            prev_offset: 0,
            row_num: 0,
        }
    }
}

impl<'a> StringSource<'a> for VariableSource<'a> {
    #[inline(always)]
    fn get_whole(&self) -> &'a [u8] {
        &self.chars[self.prev_offset..self.offsets[self.row_num]]
    }

    #[inline(always)]
    fn next(&mut self) {
        self.prev_offset = self.offsets[self.row_num];
        self.row_num += 1;
    }

    #[inline(always)]
    fn is_end(&self) -> bool {
        self.row_num == self.offsets.len()
    }

    #[inline(always)]
    fn row_num(&self) -> usize {
        self.row_num
    }

    #[inline(always)]
    fn column_size(&self) -> usize {
        self.offsets.len()
    }
}

/// Source over a [`ColumnFixedString`]; every span is `n` bytes.
#[derive(Debug, Clone)]
pub struct FixedSource<'a> {
    chars: &'a [u8],
    n: usize,
    pos: usize,
    row_num: usize,
    size: usize,
}

impl<'a> FixedSource<'a> {
    /// Starts at the first row of `column`.
    #[must_use]
    pub fn new(column: &'a ColumnFixedString) -> Self {
        Self {
            chars: column.chars(),
            n: column.n(),
            pos: 0,
            row_num: 0,
            size: column.len(),
        }
    }

    /// Width of every span.
    #[must_use]
    pub fn element_size(&self) -> usize {
        self.n
    }
}

impl<'a> StringSource<'a> for FixedSource<'a> {
    #[inline(always)]
    fn get_whole(&self) -> &'a [u8] {
        &self.chars[self.pos..self.pos + self.n]
    }

    #[inline(always)]
    fn next(&mut self) {
        self.pos += self.n;
        self.row_num += 1;
    }

    #[inline(always)]
    fn is_end(&self) -> bool {
        self.row_num == self.size
    }

    #[inline(always)]
    fn row_num(&self) -> usize {
        self.row_num
    }

    #[inline(always)]
    fn column_size(&self) -> usize {
        self.size
    }
}

/// Broadcasts the single row of an inner source over `total_rows` rows.
///
/// The inner source is never advanced; `next`/`is_end` count outer rows.
#[derive(Debug, Clone)]
pub struct ConstSource<S> {
    inner: S,
    total_rows: usize,
    row_num: usize,
}

impl<S> ConstSource<S> {
    /// Wraps a source over a one-row column.
    #[must_use]
    pub fn new(inner: S, total_rows: usize) -> Self {
        Self {
            inner,
            total_rows,
            row_num: 0,
        }
    }
}

impl<'a, S: StringSource<'a>> StringSource<'a> for ConstSource<S> {
    #[inline(always)]
    fn get_whole(&self) -> &'a [u8] {
        self.inner.get_whole()
    }

    #[inline(always)]
    fn next(&mut self) {
        self.row_num += 1;
    }

    #[inline(always)]
    fn is_end(&self) -> bool {
        self.row_num == self.total_rows
    }

    #[inline(always)]
    fn row_num(&self) -> usize {
        self.row_num
    }

    #[inline(always)]
    fn column_size(&self) -> usize {
        self.total_rows
    }
}
