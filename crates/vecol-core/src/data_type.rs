//! Data types known to the function layer and their JSON text rendering.

use std::fmt;
use std::io::Write;

use crate::column::Column;
use crate::config::JsonFormatSettings;
use crate::error::{Error, Result};
use crate::formats::write_json_string;

/// Logical type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Variable-length bytes.
    String,
    /// Bytes of fixed width `N`.
    FixedString(usize),
    /// Unsigned 8-bit integer; also the boolean result type.
    UInt8,
    /// Signed 64-bit integer.
    Int64,
    /// 64-bit float.
    Float64,
}

impl DataType {
    /// Type name as shown to users, e.g. `FixedString(16)`.
    #[must_use]
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Returns `true` for `String` and `FixedString(N)`.
    #[must_use]
    pub fn is_string_or_fixed_string(&self) -> bool {
        matches!(self, Self::String | Self::FixedString(_))
    }

    /// Writes the value at `row` of `column` as JSON text.
    ///
    /// Constant columns render their single value for every row.
    pub fn serialize_text_json<W: Write>(
        &self,
        column: &Column,
        row: usize,
        out: &mut W,
        settings: &JsonFormatSettings,
    ) -> Result<()> {
        let (column, row) = match column {
            Column::Const(c) => (c.data_column(), 0),
            other => (other, row),
        };
        match (self, column) {
            (Self::String, Column::String(c)) => write_json_string(c.get(row), out, settings),
            (Self::FixedString(_), Column::FixedString(c)) => {
                write_json_string(c.get(row), out, settings)
            }
            (Self::UInt8, Column::UInt8(c)) => Ok(write!(out, "{}", c.data()[row])?),
            (Self::Int64, Column::Int64(c)) => {
                let value = c.data()[row];
                if settings.quote_64bit_integers {
                    write!(out, "\"{value}\"")?;
                } else {
                    write!(out, "{value}")?;
                }
                Ok(())
            }
            (Self::Float64, Column::Float64(c)) => write_json_float(c.data()[row], out, settings),
            (data_type, column) => Err(Error::ColumnTypeMismatch {
                data_type: data_type.name(),
                column: column.family_name(),
            }),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("String"),
            Self::FixedString(n) => write!(f, "FixedString({n})"),
            Self::UInt8 => f.write_str("UInt8"),
            Self::Int64 => f.write_str("Int64"),
            Self::Float64 => f.write_str("Float64"),
        }
    }
}

/// JSON has no literal for NaN or infinities.
fn write_json_float<W: Write>(
    value: f64,
    out: &mut W,
    settings: &JsonFormatSettings,
) -> Result<()> {
    if value.is_finite() {
        write!(out, "{value}")?;
        return Ok(());
    }
    if !settings.quote_denormals {
        out.write_all(b"null")?;
        return Ok(());
    }
    let text = if value.is_nan() {
        "\"nan\""
    } else if value.is_sign_negative() {
        "\"-inf\""
    } else {
        "\"inf\""
    };
    out.write_all(text.as_bytes())?;
    Ok(())
}
