//! `JSONEachRow` output: one JSON object per line.
//!
//! ```text
//! {"name":"click","hits":"42"}
//! {"name":"house","hits":"7"}
//! ```
//!
//! Field names are escaped once when the writer is built. Values are rendered
//! by their data type; the writer only tracks which field comes next.

use std::io::Write;

use crate::block::Block;
use crate::column::Column;
use crate::config::{FormatSettings, JsonFormatSettings};
use crate::data_type::DataType;
use crate::error::{Error, Result};

use super::{json_string, Heartbeat};

/// Position in the row protocol: `start → field (delimiter field)* → end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowState {
    BetweenRows,
    InRow,
}

/// Row writer for the `JSONEachRow` format.
#[derive(Debug)]
pub struct JsonEachRowRowOutput<W: Write> {
    out: W,
    /// Escaped, quoted field names in positional order.
    fields: Vec<String>,
    field_number: usize,
    settings: JsonFormatSettings,
    state: RowState,
}

impl<W: Write> JsonEachRowRowOutput<W> {
    /// Creates a writer for rows with the given field names.
    pub fn new<I, S>(out: W, names: I, settings: &FormatSettings) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields = names
            .into_iter()
            .map(|name| json_string(name.as_ref().as_bytes(), &settings.json))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            out,
            fields,
            field_number: 0,
            settings: settings.json,
            state: RowState::BetweenRows,
        })
    }

    /// Creates a writer whose fields are the columns of `header`.
    pub fn from_header(out: W, header: &Block, settings: &FormatSettings) -> Result<Self> {
        Self::new(
            out,
            header.columns().iter().map(|c| c.name.as_str()),
            settings,
        )
    }

    /// Writes `{`.
    pub fn write_row_start_delimiter(&mut self) -> Result<()> {
        debug_assert_eq!(self.state, RowState::BetweenRows, "row already started");
        self.out.write_all(b"{")?;
        self.state = RowState::InRow;
        Ok(())
    }

    /// Writes `"<name>":<value>` for the next field.
    pub fn write_field(
        &mut self,
        column: &Column,
        data_type: &DataType,
        row_num: usize,
    ) -> Result<()> {
        debug_assert_eq!(self.state, RowState::InRow, "field outside of a row");
        let name = self
            .fields
            .get(self.field_number)
            .ok_or(Error::FieldOutOfRange {
                index: self.field_number,
                fields: self.fields.len(),
            })?;
        self.out.write_all(name.as_bytes())?;
        self.out.write_all(b":")?;
        data_type.serialize_text_json(column, row_num, &mut self.out, &self.settings)?;
        self.field_number += 1;
        Ok(())
    }

    /// Writes `,`.
    pub fn write_field_delimiter(&mut self) -> Result<()> {
        debug_assert_eq!(self.state, RowState::InRow, "delimiter outside of a row");
        self.out.write_all(b",")?;
        Ok(())
    }

    /// Writes `}` and a newline, and resets the field index.
    pub fn write_row_end_delimiter(&mut self) -> Result<()> {
        debug_assert_eq!(self.state, RowState::InRow, "row not started");
        self.out.write_all(b"}\n")?;
        self.field_number = 0;
        self.state = RowState::BetweenRows;
        Ok(())
    }

    /// Writes a heartbeat record and flushes.
    ///
    /// Heartbeats are out of band: the field index is left untouched.
    pub fn on_heartbeat(&mut self, heartbeat: &Heartbeat) -> Result<()> {
        writeln!(
            self.out,
            "{{\"heartbeat\":{{\"timestamp\":\"{}\"}}}}",
            heartbeat.timestamp()
        )?;
        self.out.flush()?;
        Ok(())
    }

    /// Writes every row of `block`.
    ///
    /// The block's columns are matched to the writer's fields by position.
    pub fn write_block(&mut self, block: &Block) -> Result<()> {
        for row in 0..block.rows() {
            self.write_row_start_delimiter()?;
            for (i, column) in block.columns().iter().enumerate() {
                if i > 0 {
                    self.write_field_delimiter()?;
                }
                self.write_field(&column.column, &column.data_type, row)?;
            }
            self.write_row_end_delimiter()?;
        }
        Ok(())
    }

    /// Flushes buffered output.
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Index of the next field within the current row.
    #[must_use]
    pub fn field_number(&self) -> usize {
        self.field_number
    }

    /// Escaped field names.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Borrows the underlying writer.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consumes the row writer, returning the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}
