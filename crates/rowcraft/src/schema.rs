//! Schema block codec: the length-prefixed tableHead message that opens
//! every buffer, carrying the field list, per-field transforms and stats,
//! and table meta.
//!
//! Field numbers are fixed so independent implementations read the same
//! bytes:
//!
//! ```text
//! TableHead  { repeated Field header = 1;  Meta meta = 2; }
//! Field      { string name = 1; string type = 2;
//!              Transform transform = 3; Stats stats = 4; }
//! Transform  { int32 offset = 1; int32 multip = 2;
//!              int32 decimals = 3; bool sequence = 4; }
//! Stats      { float start = 1; float end = 2; float min = 3;
//!              float max = 4; float mean = 5; }
//! Meta       { string name = 1; string owner = 2; string link = 3;
//!              string comment = 4; int32 row_count = 5; }
//! ```
//!
//! Scalar fields at their default value are not emitted; absent
//! sub-messages decode as their all-zero default.

use crate::errors::TableError;
use crate::field::{Field, FieldType, Meta, Stats};
use crate::transform::Transform;
use crate::varint;
use crate::wire;

const HEAD_HEADER: u32 = 1;
const HEAD_META: u32 = 2;

const FIELD_NAME: u32 = 1;
const FIELD_TYPE: u32 = 2;
const FIELD_TRANSFORM: u32 = 3;
const FIELD_STATS: u32 = 4;

const TRANSFORM_OFFSET: u32 = 1;
const TRANSFORM_MULTIP: u32 = 2;
const TRANSFORM_DECIMALS: u32 = 3;
const TRANSFORM_SEQUENCE: u32 = 4;

const STATS_START: u32 = 1;
const STATS_END: u32 = 2;
const STATS_MIN: u32 = 3;
const STATS_MAX: u32 = 4;
const STATS_MEAN: u32 = 5;

const META_NAME: u32 = 1;
const META_OWNER: u32 = 2;
const META_LINK: u32 = 3;
const META_COMMENT: u32 = 4;
const META_ROW_COUNT: u32 = 5;

/// Checks the schema invariants: non-empty header, unique non-empty names.
pub fn validate_header(header: &[Field]) -> Result<(), TableError> {
    if header.is_empty() {
        return Err(TableError::InvalidSchema("header is empty".to_string()));
    }

    for (i, field) in header.iter().enumerate() {
        if field.name.is_empty() {
            return Err(TableError::InvalidSchema(format!(
                "field {i} has an empty name"
            )));
        }
        if header[..i].iter().any(|f| f.name == field.name) {
            return Err(TableError::InvalidSchema(format!(
                "duplicate field name '{}'",
                field.name
            )));
        }
    }

    Ok(())
}

fn write_string_field(buf: &mut Vec<u8>, number: u32, value: &str) {
    if value.is_empty() {
        return;
    }
    wire::write_key(buf, number, wire::WIRE_LEN);
    varint::write_delimited(buf, value.as_bytes());
}

fn write_i32_field(buf: &mut Vec<u8>, number: u32, value: i32) {
    if value == 0 {
        return;
    }
    wire::write_key(buf, number, wire::WIRE_VARINT);
    wire::write_i32(buf, value);
}

fn write_f32_field(buf: &mut Vec<u8>, number: u32, value: f32) {
    if value == 0.0 {
        return;
    }
    wire::write_key(buf, number, wire::WIRE_FIXED32);
    wire::write_f32(buf, value);
}

fn encode_transform(transform: &Transform) -> Vec<u8> {
    let mut buf = Vec::new();
    write_i32_field(&mut buf, TRANSFORM_OFFSET, transform.offset);
    write_i32_field(&mut buf, TRANSFORM_MULTIP, transform.multip);
    write_i32_field(&mut buf, TRANSFORM_DECIMALS, transform.decimals);
    if transform.sequence {
        wire::write_key(&mut buf, TRANSFORM_SEQUENCE, wire::WIRE_VARINT);
        buf.push(1);
    }
    buf
}

fn encode_stats(stats: &Stats) -> Vec<u8> {
    let mut buf = Vec::new();
    write_f32_field(&mut buf, STATS_START, stats.start);
    write_f32_field(&mut buf, STATS_END, stats.end);
    write_f32_field(&mut buf, STATS_MIN, stats.min);
    write_f32_field(&mut buf, STATS_MAX, stats.max);
    write_f32_field(&mut buf, STATS_MEAN, stats.mean);
    buf
}

fn encode_field(field: &Field) -> Vec<u8> {
    let mut buf = Vec::new();
    write_string_field(&mut buf, FIELD_NAME, &field.name);
    write_string_field(&mut buf, FIELD_TYPE, field.field_type.name());
    if let Some(transform) = &field.transform {
        wire::write_key(&mut buf, FIELD_TRANSFORM, wire::WIRE_LEN);
        varint::write_delimited(&mut buf, &encode_transform(transform));
    }
    if let Some(stats) = &field.stats {
        wire::write_key(&mut buf, FIELD_STATS, wire::WIRE_LEN);
        varint::write_delimited(&mut buf, &encode_stats(stats));
    }
    buf
}

fn encode_meta(meta: &Meta) -> Vec<u8> {
    let mut buf = Vec::new();
    write_string_field(&mut buf, META_NAME, &meta.name);
    write_string_field(&mut buf, META_OWNER, &meta.owner);
    write_string_field(&mut buf, META_LINK, &meta.link);
    write_string_field(&mut buf, META_COMMENT, &meta.comment);
    write_i32_field(&mut buf, META_ROW_COUNT, meta.row_count);
    buf
}

/// Serializes the tableHead message body (without the outer length prefix).
pub fn encode_head(header: &[Field], meta: Option<&Meta>) -> Vec<u8> {
    let mut buf = Vec::new();
    for field in header {
        wire::write_key(&mut buf, HEAD_HEADER, wire::WIRE_LEN);
        varint::write_delimited(&mut buf, &encode_field(field));
    }
    if let Some(meta) = meta {
        wire::write_key(&mut buf, HEAD_META, wire::WIRE_LEN);
        varint::write_delimited(&mut buf, &encode_meta(meta));
    }
    buf
}

fn expect_wire(field: u32, got: u32, want: u32) -> Result<(), TableError> {
    if got != want {
        return Err(TableError::CorruptBuffer(format!(
            "schema field {field} has wire type {got}, expected {want}"
        )));
    }
    Ok(())
}

fn read_string(buf: &[u8], pos: usize) -> Result<(String, usize), TableError> {
    let (bytes, next) = varint::read_delimited(buf, pos)?;
    let s = String::from_utf8(bytes.to_vec())
        .map_err(|_| TableError::CorruptBuffer(format!("invalid UTF-8 at byte {pos}")))?;
    Ok((s, next))
}

fn decode_transform(buf: &[u8]) -> Result<Transform, TableError> {
    // Absent scalars default to zero, including multip.
    let mut t = Transform {
        offset: 0,
        multip: 0,
        decimals: 0,
        sequence: false,
    };
    let mut pos = 0;

    while pos < buf.len() {
        let (number, wire_type, next) = wire::read_key(buf, pos)?;
        pos = next;
        match number {
            TRANSFORM_OFFSET | TRANSFORM_MULTIP | TRANSFORM_DECIMALS => {
                expect_wire(number, wire_type, wire::WIRE_VARINT)?;
                let (v, next) = wire::read_i32(buf, pos)?;
                match number {
                    TRANSFORM_OFFSET => t.offset = v,
                    TRANSFORM_MULTIP => t.multip = v,
                    _ => t.decimals = v,
                }
                pos = next;
            }
            TRANSFORM_SEQUENCE => {
                expect_wire(number, wire_type, wire::WIRE_VARINT)?;
                let (v, next) = varint::read_uvarint(buf, pos)?;
                t.sequence = v != 0;
                pos = next;
            }
            _ => pos = wire::skip_value(buf, pos, wire_type)?,
        }
    }

    Ok(t)
}

fn decode_stats(buf: &[u8]) -> Result<Stats, TableError> {
    let mut stats = Stats::default();
    let mut pos = 0;

    while pos < buf.len() {
        let (number, wire_type, next) = wire::read_key(buf, pos)?;
        pos = next;
        match number {
            STATS_START | STATS_END | STATS_MIN | STATS_MAX | STATS_MEAN => {
                expect_wire(number, wire_type, wire::WIRE_FIXED32)?;
                let (v, next) = wire::read_f32(buf, pos)?;
                match number {
                    STATS_START => stats.start = v,
                    STATS_END => stats.end = v,
                    STATS_MIN => stats.min = v,
                    STATS_MAX => stats.max = v,
                    _ => stats.mean = v,
                }
                pos = next;
            }
            _ => pos = wire::skip_value(buf, pos, wire_type)?,
        }
    }

    Ok(stats)
}

fn decode_field(buf: &[u8]) -> Result<Field, TableError> {
    let mut name = String::new();
    let mut type_name = String::new();
    let mut transform = None;
    let mut stats = None;
    let mut pos = 0;

    while pos < buf.len() {
        let (number, wire_type, next) = wire::read_key(buf, pos)?;
        pos = next;
        match number {
            FIELD_NAME => {
                expect_wire(number, wire_type, wire::WIRE_LEN)?;
                (name, pos) = read_string(buf, pos)?;
            }
            FIELD_TYPE => {
                expect_wire(number, wire_type, wire::WIRE_LEN)?;
                (type_name, pos) = read_string(buf, pos)?;
            }
            FIELD_TRANSFORM => {
                expect_wire(number, wire_type, wire::WIRE_LEN)?;
                let (bytes, next) = varint::read_delimited(buf, pos)?;
                transform = Some(decode_transform(bytes)?);
                pos = next;
            }
            FIELD_STATS => {
                expect_wire(number, wire_type, wire::WIRE_LEN)?;
                let (bytes, next) = varint::read_delimited(buf, pos)?;
                stats = Some(decode_stats(bytes)?);
                pos = next;
            }
            _ => pos = wire::skip_value(buf, pos, wire_type)?,
        }
    }

    let field_type = FieldType::from_name(&type_name)
        .ok_or_else(|| TableError::InvalidSchema(format!("unknown field type '{type_name}'")))?;

    Ok(Field {
        name,
        field_type,
        transform,
        stats,
    })
}

fn decode_meta(buf: &[u8]) -> Result<Meta, TableError> {
    let mut meta = Meta::default();
    let mut pos = 0;

    while pos < buf.len() {
        let (number, wire_type, next) = wire::read_key(buf, pos)?;
        pos = next;
        match number {
            META_NAME | META_OWNER | META_LINK | META_COMMENT => {
                expect_wire(number, wire_type, wire::WIRE_LEN)?;
                let (s, next) = read_string(buf, pos)?;
                match number {
                    META_NAME => meta.name = s,
                    META_OWNER => meta.owner = s,
                    META_LINK => meta.link = s,
                    _ => meta.comment = s,
                }
                pos = next;
            }
            META_ROW_COUNT => {
                expect_wire(number, wire_type, wire::WIRE_VARINT)?;
                (meta.row_count, pos) = wire::read_i32(buf, pos)?;
            }
            _ => pos = wire::skip_value(buf, pos, wire_type)?,
        }
    }

    Ok(meta)
}

/// Reads the length-prefixed schema block at the start of `buffer`.
/// Returns the validated header, the meta if present, and the byte
/// position where the row stream begins.
pub fn decode_head(buffer: &[u8]) -> Result<(Vec<Field>, Option<Meta>, usize), TableError> {
    let (body, body_end) = varint::read_delimited(buffer, 0)?;

    let mut header = Vec::new();
    let mut meta = None;
    let mut pos = 0;

    while pos < body.len() {
        let (number, wire_type, next) = wire::read_key(body, pos)?;
        pos = next;
        match number {
            HEAD_HEADER => {
                expect_wire(number, wire_type, wire::WIRE_LEN)?;
                let (bytes, next) = varint::read_delimited(body, pos)?;
                header.push(decode_field(bytes)?);
                pos = next;
            }
            HEAD_META => {
                expect_wire(number, wire_type, wire::WIRE_LEN)?;
                let (bytes, next) = varint::read_delimited(body, pos)?;
                meta = Some(decode_meta(bytes)?);
                pos = next;
            }
            _ => pos = wire::skip_value(body, pos, wire_type)?,
        }
    }

    validate_header(&header)?;
    Ok((header, meta, body_end))
}
