//! Per-schema row codec.
//!
//! A row is a top-level message whose field numbers are `1..=n` in header
//! order. The message shape depends on the schema, so a [RowCodec] is
//! compiled once per encode/decode call with the tag bytes precomputed,
//! then reused for every row.

use crate::errors::TableError;
use crate::field::{Field, FieldType};
use crate::value::Value;
use crate::varint;
use crate::wire;

struct Column {
    key: Vec<u8>,
    field_type: FieldType,
}

/// Compiled encoder/decoder for one schema's row messages.
pub struct RowCodec {
    columns: Vec<Column>,
}

impl RowCodec {
    /// Compiles the codec for a validated header.
    pub fn compile(header: &[Field]) -> RowCodec {
        let columns = header
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let mut key = Vec::with_capacity(1);
                wire::write_key(&mut key, i as u32 + 1, field.field_type.wire_type());
                Column {
                    key,
                    field_type: field.field_type,
                }
            })
            .collect();
        RowCodec { columns }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Serializes one row into `out` (message body only, no frame).
    /// Fields at their zero value are omitted; `Null` counts as zero.
    /// Cells must already be normalized to the column's wire shape.
    pub fn encode_row(&self, row: &[Value], out: &mut Vec<u8>) -> Result<(), TableError> {
        for (col, cell) in self.columns.iter().zip(row) {
            match (col.field_type, cell) {
                (_, Value::Null) => {}
                (FieldType::String, Value::String(s)) => {
                    if !s.is_empty() {
                        out.extend_from_slice(&col.key);
                        varint::write_delimited(out, s.as_bytes());
                    }
                }
                (FieldType::UInt, Value::UInt(v)) => {
                    if *v != 0 {
                        out.extend_from_slice(&col.key);
                        varint::write_uvarint(out, u64::from(*v));
                    }
                }
                (FieldType::Int, Value::Int(v)) => {
                    if *v != 0 {
                        out.extend_from_slice(&col.key);
                        varint::write_uvarint(out, u64::from(varint::zigzag_encode(*v)));
                    }
                }
                (FieldType::Float, Value::Float(v)) => {
                    let v = *v as f32;
                    if v != 0.0 {
                        out.extend_from_slice(&col.key);
                        wire::write_f32(out, v);
                    }
                }
                (FieldType::Bool, Value::Bool(v)) => {
                    if *v {
                        out.extend_from_slice(&col.key);
                        out.push(1);
                    }
                }
                (ty, other) => {
                    return Err(TableError::InvalidTable(format!(
                        "cell {other:?} does not fit a {} column",
                        ty.name()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Parses one row message body. Missing fields become the type's zero,
    /// unknown field numbers are skipped, and wire-type mismatches or
    /// malformed values are corrupt.
    pub fn decode_row(&self, body: &[u8]) -> Result<Vec<Value>, TableError> {
        let mut row: Vec<Value> = self
            .columns
            .iter()
            .map(|c| zero_value(c.field_type))
            .collect();
        let mut pos = 0;

        while pos < body.len() {
            let (number, wire_type, next) = wire::read_key(body, pos)
                .map_err(row_corrupt)?;
            pos = next;

            let Some(col) = (number as usize)
                .checked_sub(1)
                .and_then(|i| self.columns.get(i))
            else {
                pos = wire::skip_value(body, pos, wire_type).map_err(row_corrupt)?;
                continue;
            };

            if wire_type != col.field_type.wire_type() {
                return Err(TableError::CorruptRow(format!(
                    "field {number} has wire type {wire_type}, schema says {}",
                    col.field_type.wire_type()
                )));
            }

            let cell;
            match col.field_type {
                FieldType::String => {
                    let (bytes, next) = varint::read_delimited(body, pos).map_err(row_corrupt)?;
                    let s = String::from_utf8(bytes.to_vec()).map_err(|_| {
                        TableError::CorruptRow(format!("field {number} is not valid UTF-8"))
                    })?;
                    cell = Value::String(s);
                    pos = next;
                }
                FieldType::UInt => {
                    let (v, next) = read_u32(body, pos, number)?;
                    cell = Value::UInt(v);
                    pos = next;
                }
                FieldType::Int => {
                    let (v, next) = read_u32(body, pos, number)?;
                    cell = Value::Int(varint::zigzag_decode(v));
                    pos = next;
                }
                FieldType::Float => {
                    let (v, next) = wire::read_f32(body, pos).map_err(row_corrupt)?;
                    cell = Value::Float(f64::from(v));
                    pos = next;
                }
                FieldType::Bool => {
                    let (v, next) = varint::read_uvarint(body, pos).map_err(row_corrupt)?;
                    cell = Value::Bool(v != 0);
                    pos = next;
                }
            }
            row[number as usize - 1] = cell;
        }

        Ok(row)
    }
}

/// The zero value a missing field decodes to.
pub fn zero_value(field_type: FieldType) -> Value {
    match field_type {
        FieldType::String => Value::String(String::new()),
        FieldType::UInt => Value::UInt(0),
        FieldType::Int => Value::Int(0),
        FieldType::Float => Value::Float(0.0),
        FieldType::Bool => Value::Bool(false),
    }
}

fn row_corrupt(err: TableError) -> TableError {
    match err {
        TableError::CorruptBuffer(msg) => TableError::CorruptRow(msg),
        other => other,
    }
}

fn read_u32(body: &[u8], pos: usize, number: u32) -> Result<(u32, usize), TableError> {
    let (v, next) = varint::read_uvarint(body, pos).map_err(row_corrupt)?;
    if v > u64::from(u32::MAX) {
        return Err(TableError::CorruptRow(format!(
            "field {number} varint {v} exceeds 32 bits"
        )));
    }
    Ok((v as u32, next))
}
