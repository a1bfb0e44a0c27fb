//! Tests for string sources.

use super::{ConstSource, FixedSource, StringSource, VariableSource};
use crate::column::{ColumnFixedString, ColumnString};

fn drain<'a, S: StringSource<'a>>(mut source: S) -> Vec<&'a [u8]> {
    let mut rows = Vec::new();
    while !source.is_end() {
        rows.push(source.get_whole());
        source.next();
    }
    rows
}

#[test]
fn test_variable_source_yields_each_span() {
    let column = ColumnString::from_strings(["click", "", "house"]);
    let rows = drain(VariableSource::new(&column));
    assert_eq!(rows, vec![&b"click"[..], b"", b"house"]);
}

#[test]
fn test_variable_source_borrows_column_bytes() {
    let column = ColumnString::from_strings(["ab", "cd"]);
    let source = VariableSource::new(&column);
    let span = source.get_whole();
    assert_eq!(span.as_ptr(), column.chars().as_ptr());
}

#[test]
fn test_variable_source_empty_column_is_end() {
    let column = ColumnString::new();
    let source = VariableSource::new(&column);
    assert!(source.is_end());
    assert_eq!(source.column_size(), 0);
}

#[test]
fn test_fixed_source_stride() {
    let column = ColumnFixedString::from_strings(3, ["abc", "de", "f"]).unwrap();
    let source = FixedSource::new(&column);
    assert_eq!(source.element_size(), 3);
    assert_eq!(source.column_size(), 3);

    let rows = drain(source);
    assert_eq!(rows, vec![&b"abc"[..], b"de\0", b"f\0\0"]);
}

#[test]
fn test_fixed_source_row_num_tracks_next() {
    let column = ColumnFixedString::from_strings(2, ["aa", "bb"]).unwrap();
    let mut source = FixedSource::new(&column);
    assert_eq!(source.row_num(), 0);
    source.next();
    assert_eq!(source.row_num(), 1);
    assert_eq!(source.get_whole(), b"bb");
    source.next();
    assert!(source.is_end());
}

#[test]
fn test_const_source_broadcasts_inner_value() {
    let inner = ColumnString::from_strings(["house"]);
    let source = ConstSource::new(VariableSource::new(&inner), 4);
    assert_eq!(source.column_size(), 4);

    let rows = drain(source);
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| *r == b"house"));
}

#[test]
fn test_const_source_over_fixed_keeps_padding() {
    let inner = ColumnFixedString::from_strings(4, ["ab"]).unwrap();
    let rows = drain(ConstSource::new(FixedSource::new(&inner), 2));
    assert_eq!(rows, vec![&b"ab\0\0"[..], b"ab\0\0"]);
}

#[test]
fn test_const_source_zero_rows() {
    let inner = ColumnString::from_strings(["x"]);
    let source = ConstSource::new(VariableSource::new(&inner), 0);
    assert!(source.is_end());
}
