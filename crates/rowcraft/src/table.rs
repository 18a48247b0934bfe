//! Container codec: ties the schema block and the row stream together.
//!
//! A buffer is `varint(len) || tableHead` followed by one
//! `varint(len) || row` frame per row. Encoding computes statistics over
//! the raw data, applies column transforms, then serializes; decoding
//! reverses the pipeline. Random access (`get`), append (`add`), and the
//! byte-position index (`get_index`) operate on the framed row stream
//! without touching rows they do not need.

use std::collections::BTreeMap;

use crate::errors::TableError;
use crate::field::{Field, FieldType, Meta};
use crate::row::RowCodec;
use crate::schema;
use crate::stats;
use crate::value::Value;
use crate::varint;

/// A schema-described table with positional rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Vec<Field>,
    /// One `Vec<Value>` per row, positionally matching `header`.
    pub data: Vec<Vec<Value>>,
    pub meta: Option<Meta>,
}

/// A row keyed by field name.
pub type VerboseRow = BTreeMap<String, Value>;

/// A table whose rows are keyed by field name instead of position.
#[derive(Debug, Clone, PartialEq)]
pub struct VerboseTable {
    pub header: Vec<Field>,
    pub data: Vec<VerboseRow>,
    pub meta: Option<Meta>,
}

/// Encodes a table into a self-delimiting byte buffer.
///
/// Statistics are computed over the raw data and attached to numeric
/// fields; the emitted meta always carries the actual row count.
pub fn encode(table: &Table) -> Result<Vec<u8>, TableError> {
    schema::validate_header(&table.header)?;
    for (i, row) in table.data.iter().enumerate() {
        if row.len() != table.header.len() {
            return Err(TableError::InvalidTable(format!(
                "row {i} has {} values, header has {} fields",
                row.len(),
                table.header.len()
            )));
        }
    }

    let mut header = table.header.clone();
    stats::attach_stats(&mut header, &table.data);
    let mut meta = table.meta.clone().unwrap_or_default();
    meta.row_count = table.data.len().try_into().unwrap_or(i32::MAX);

    let stored = apply_transforms(&header, &table.data)?;

    let codec = RowCodec::compile(&header);
    let mut out = Vec::new();
    varint::write_delimited(&mut out, &schema::encode_head(&header, Some(&meta)));
    let mut frame = Vec::new();
    for row in &stored {
        frame.clear();
        codec.encode_row(row, &mut frame)?;
        varint::write_delimited(&mut out, &frame);
    }
    Ok(out)
}

/// Decodes a buffer back into a table. The returned header carries the
/// stats and transforms from the schema block.
pub fn decode(buffer: &[u8]) -> Result<Table, TableError> {
    let (header, meta, mut pos) = schema::decode_head(buffer)?;
    let codec = RowCodec::compile(&header);
    let mut data = Vec::new();
    while pos < buffer.len() {
        let (body, next) = varint::read_delimited(buffer, pos)?;
        data.push(codec.decode_row(body)?);
        pos = next;
    }
    recover_transforms(&header, &mut data);
    Ok(Table { header, data, meta })
}

/// Encodes a verbose (keyed-row) table. Missing keys encode as nulls;
/// keys not named in the header are ignored.
pub fn encode_verbose(table: &VerboseTable) -> Result<Vec<u8>, TableError> {
    encode(&Table {
        header: table.header.clone(),
        data: verbose_to_rows(&table.header, &table.data),
        meta: table.meta.clone(),
    })
}

/// Decodes a buffer into a verbose (keyed-row) table.
pub fn decode_verbose(buffer: &[u8]) -> Result<VerboseTable, TableError> {
    let table = decode(buffer)?;
    let data = rows_to_verbose(&table.header, table.data);
    Ok(VerboseTable {
        header: table.header,
        data,
        meta: table.meta,
    })
}

/// Materializes a single row without decoding the rest of the buffer.
pub fn get(buffer: &[u8], index: usize) -> Result<Vec<Value>, TableError> {
    let mut rows = get_many(buffer, &[index])?;
    match rows.pop() {
        Some(row) => Ok(row),
        None => Err(TableError::OutOfRange { index, rows: 0 }),
    }
}

/// Materializes the requested rows, in request order. Indices need not be
/// sorted or unique. Fails with [TableError::SequencedRandomAccess] when
/// any column is delta-encoded, and [TableError::OutOfRange] when an index
/// is past the end of the row stream.
pub fn get_many(buffer: &[u8], indices: &[usize]) -> Result<Vec<Vec<Value>>, TableError> {
    let (header, _, mut pos) = schema::decode_head(buffer)?;
    if header.iter().any(Field::is_sequenced) {
        return Err(TableError::SequencedRandomAccess);
    }
    let Some(&max) = indices.iter().max() else {
        return Ok(Vec::new());
    };

    let codec = RowCodec::compile(&header);
    let mut found: BTreeMap<usize, Vec<Value>> = BTreeMap::new();
    let mut count = 0usize;

    while pos < buffer.len() && count <= max {
        let (body, next) = varint::read_delimited(buffer, pos)?;
        if indices.contains(&count) && !found.contains_key(&count) {
            let mut row = codec.decode_row(body)?;
            recover_transforms(&header, std::slice::from_mut(&mut row));
            found.insert(count, row);
        }
        pos = next;
        count += 1;
    }

    if let Some(&bad) = indices.iter().find(|&&i| i >= count) {
        return Err(TableError::OutOfRange {
            index: bad,
            rows: count,
        });
    }

    Ok(indices.iter().map(|i| found[i].clone()).collect())
}

/// Verbose-shape counterpart of [get].
pub fn get_verbose(buffer: &[u8], index: usize) -> Result<VerboseRow, TableError> {
    let mut rows = get_many_verbose(buffer, &[index])?;
    match rows.pop() {
        Some(row) => Ok(row),
        None => Err(TableError::OutOfRange { index, rows: 0 }),
    }
}

/// Verbose-shape counterpart of [get_many].
pub fn get_many_verbose(buffer: &[u8], indices: &[usize]) -> Result<Vec<VerboseRow>, TableError> {
    let (header, _, _) = schema::decode_head(buffer)?;
    let rows = get_many(buffer, indices)?;
    Ok(rows_to_verbose(&header, rows))
}

/// Appends rows to an encoded buffer, returning a new buffer. The input is
/// not mutated; statistics and the meta row count are recomputed.
pub fn add(buffer: &[u8], rows: &[Vec<Value>]) -> Result<Vec<u8>, TableError> {
    let mut table = decode(buffer)?;
    table.data.extend_from_slice(rows);
    encode(&table)
}

/// Verbose-shape counterpart of [add].
pub fn add_verbose(buffer: &[u8], rows: &[VerboseRow]) -> Result<Vec<u8>, TableError> {
    let (header, _, _) = schema::decode_head(buffer)?;
    let rows = verbose_to_rows(&header, rows);
    add(buffer, &rows)
}

/// Walks the row stream and yields the byte offset of each row frame's
/// length varint. The result is strictly increasing, one entry per row.
pub fn get_index(buffer: &[u8]) -> Result<Vec<usize>, TableError> {
    let (_, _, mut pos) = schema::decode_head(buffer)?;
    let mut index = Vec::new();
    while pos < buffer.len() {
        index.push(pos);
        let (_, next) = varint::read_delimited(buffer, pos)?;
        pos = next;
    }
    Ok(index)
}

fn verbose_to_rows(header: &[Field], rows: &[VerboseRow]) -> Vec<Vec<Value>> {
    rows.iter()
        .map(|row| {
            header
                .iter()
                .map(|f| row.get(&f.name).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect()
}

fn rows_to_verbose(header: &[Field], rows: Vec<Vec<Value>>) -> Vec<VerboseRow> {
    rows.into_iter()
        .map(|row| {
            header
                .iter()
                .map(|f| f.name.clone())
                .zip(row)
                .collect()
        })
        .collect()
}

fn invalid_cell(row: usize, field: &Field, cell: &Value) -> TableError {
    TableError::InvalidTable(format!(
        "row {row} field '{}': {cell:?} does not fit a {} column",
        field.name,
        field.field_type.name()
    ))
}

/// Converts raw rows into wire-ready stored rows, applying transforms
/// column-wise and threading the previous raw value through sequences.
fn apply_transforms(header: &[Field], data: &[Vec<Value>]) -> Result<Vec<Vec<Value>>, TableError> {
    let mut out: Vec<Vec<Value>> = data
        .iter()
        .map(|row| Vec::with_capacity(row.len()))
        .collect();

    for (c, field) in header.iter().enumerate() {
        match field.field_type {
            FieldType::String => {
                for (r, row) in data.iter().enumerate() {
                    let cell = match &row[c] {
                        Value::Null => Value::Null,
                        Value::String(s) => Value::String(s.clone()),
                        other => return Err(invalid_cell(r, field, other)),
                    };
                    out[r].push(cell);
                }
            }
            FieldType::Bool => {
                for (r, row) in data.iter().enumerate() {
                    let cell = match &row[c] {
                        Value::Null => Value::Null,
                        Value::Bool(b) => Value::Bool(*b),
                        other => return Err(invalid_cell(r, field, other)),
                    };
                    out[r].push(cell);
                }
            }
            FieldType::Float => {
                for (r, row) in data.iter().enumerate() {
                    let cell = match &row[c] {
                        Value::Null => Value::Null,
                        other => Value::Float(
                            other.as_f64().ok_or_else(|| invalid_cell(r, field, other))?,
                        ),
                    };
                    out[r].push(cell);
                }
            }
            FieldType::Int | FieldType::UInt => {
                let mut prev: Option<f64> = None;
                for (r, row) in data.iter().enumerate() {
                    let raw = match &row[c] {
                        Value::Null => None,
                        other => {
                            Some(other.as_f64().ok_or_else(|| invalid_cell(r, field, other))?)
                        }
                    };
                    let stored = match &field.transform {
                        Some(t) => t.parse(raw.unwrap_or(0.0), prev),
                        None => raw.unwrap_or(0.0).trunc(),
                    };
                    out[r].push(checked_int(stored, field.field_type)?);
                    prev = raw;
                }
            }
        }
    }

    Ok(out)
}

/// Range-checks a stored value against the column's 32-bit sign rule.
fn checked_int(stored: f64, field_type: FieldType) -> Result<Value, TableError> {
    match field_type {
        FieldType::Int => {
            if !stored.is_finite()
                || stored < f64::from(i32::MIN)
                || stored > f64::from(i32::MAX)
            {
                return Err(TableError::InvalidTransform {
                    value: stored,
                    type_name: "int",
                });
            }
            Ok(Value::Int(stored as i32))
        }
        FieldType::UInt => {
            if !stored.is_finite() || stored < 0.0 || stored > f64::from(u32::MAX) {
                return Err(TableError::InvalidTransform {
                    value: stored,
                    type_name: "uint",
                });
            }
            Ok(Value::UInt(stored as u32))
        }
        _ => unreachable!("transforms only store integer columns"),
    }
}

/// Applies the inverse transform to every transformed integer column,
/// threading the recovered value through sequences. Exactly-integral
/// results snap back to the column's native variant; fractional ones are
/// yielded as floats.
fn recover_transforms(header: &[Field], data: &mut [Vec<Value>]) {
    for (c, field) in header.iter().enumerate() {
        if !matches!(field.field_type, FieldType::Int | FieldType::UInt) {
            continue;
        }
        let Some(t) = field.transform else { continue };

        let mut prev: Option<f64> = None;
        for row in data.iter_mut() {
            let stored = row[c].as_f64().unwrap_or(0.0);
            let recovered = t.recover(stored, prev);
            row[c] = snap(recovered, field.field_type);
            prev = Some(recovered);
        }
    }
}

fn snap(value: f64, field_type: FieldType) -> Value {
    if value.fract() == 0.0 {
        match field_type {
            FieldType::Int if value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) => {
                return Value::Int(value as i32);
            }
            FieldType::UInt if value >= 0.0 && value <= f64::from(u32::MAX) => {
                return Value::UInt(value as u32);
            }
            _ => {}
        }
    }
    Value::Float(value)
}

#[cfg(test)]
mod tests {
    use crate::transform::Transform;

    use super::*;

    fn assert_close(got: &Value, want: &Value) {
        match (got, want) {
            (Value::Float(a), Value::Float(b)) => {
                let scale = b.abs().max(1e-12);
                assert!(
                    (a - b).abs() / scale <= 1e-6,
                    "{a} not within 1e-6 of {b}"
                );
            }
            (a, b) => assert_eq!(a, b),
        }
    }

    fn assert_rows_close(got: &[Vec<Value>], want: &[Vec<Value>]) {
        assert_eq!(got.len(), want.len());
        for (g, w) in got.iter().zip(want) {
            assert_eq!(g.len(), w.len());
            for (gc, wc) in g.iter().zip(w) {
                assert_close(gc, wc);
            }
        }
    }

    fn scalar_table() -> Table {
        Table {
            header: vec![
                Field::new("id", FieldType::UInt),
                Field::new("name", FieldType::String),
                Field::new("v", FieldType::Float),
                Field::new("a", FieldType::Bool),
            ],
            data: vec![
                vec![
                    Value::UInt(1),
                    Value::from("test"),
                    Value::Float(3.14),
                    Value::Bool(true),
                ],
                vec![
                    Value::UInt(2),
                    Value::from("example"),
                    Value::Float(2.71),
                    Value::Bool(false),
                ],
                vec![
                    Value::UInt(3),
                    Value::from("sample"),
                    Value::Float(1.41),
                    Value::Bool(true),
                ],
            ],
            meta: None,
        }
    }

    #[test]
    fn test_scalar_round_trip() {
        let table = scalar_table();
        let buf = encode(&table).unwrap();
        let decoded = decode(&buf).unwrap();
        assert_rows_close(&decoded.data, &table.data);
        // Header survives modulo the stats the encoder attaches.
        for (got, want) in decoded.header.iter().zip(&table.header) {
            assert_eq!(got.name, want.name);
            assert_eq!(got.field_type, want.field_type);
            assert_eq!(got.transform, want.transform);
        }
        assert_eq!(decoded.meta.as_ref().map(|m| m.row_count), Some(3));
    }

    #[test]
    fn test_verbose_round_trip() {
        let header = vec![
            Field::new("id", FieldType::UInt),
            Field::new("name", FieldType::String),
            Field::new("temperature", FieldType::Float),
            Field::new("active", FieldType::Bool),
        ];
        let row = |id: u32, name: &str, t: f64, active: bool| -> VerboseRow {
            BTreeMap::from([
                ("id".to_string(), Value::UInt(id)),
                ("name".to_string(), Value::from(name)),
                ("temperature".to_string(), Value::Float(t)),
                ("active".to_string(), Value::Bool(active)),
            ])
        };
        let table = VerboseTable {
            header,
            data: vec![row(1, "s1", 23.5, true), row(2, "s2", 24.1, false)],
            meta: None,
        };

        let buf = encode_verbose(&table).unwrap();
        let decoded = decode_verbose(&buf).unwrap();
        assert_eq!(decoded.data.len(), 2);
        for (got, want) in decoded.data.iter().zip(&table.data) {
            assert_eq!(
                got.keys().collect::<Vec<_>>(),
                want.keys().collect::<Vec<_>>()
            );
            for (key, cell) in want {
                assert_close(&got[key], cell);
            }
        }
    }

    #[test]
    fn test_affine_transform_round_trip() {
        let table = Table {
            header: vec![Field::with_transform(
                "latitude",
                FieldType::Int,
                Transform::new(-42, 1000, 3),
            )],
            data: vec![
                vec![Value::Float(-41.123456)],
                vec![Value::Float(-41.123789)],
                vec![Value::Float(-41.124012)],
            ],
            meta: None,
        };
        let buf = encode(&table).unwrap();

        // The stored values on the wire are small signed integers.
        let (header, _, _) = schema::decode_head(&buf).unwrap();
        let codec = RowCodec::compile(&header);
        for offset in get_index(&buf).unwrap() {
            let (body, _) = varint::read_delimited(&buf, offset).unwrap();
            let stored = codec.decode_row(body).unwrap();
            assert!(matches!(stored[0], Value::Int(v) if v.abs() < 1_000_000));
        }

        let decoded = decode(&buf).unwrap();
        assert_rows_close(&decoded.data, &table.data);
    }

    #[test]
    fn test_transform_overflow_is_rejected() {
        // multip 10^6 on top of decimals 6 scales by 10^12, far past i32.
        let table = Table {
            header: vec![Field::with_transform(
                "latitude",
                FieldType::Int,
                Transform::new(-42, 1_000_000, 6),
            )],
            data: vec![vec![Value::Float(-41.123456)]],
            meta: None,
        };
        assert!(matches!(
            encode(&table),
            Err(TableError::InvalidTransform { .. })
        ));
    }

    #[test]
    fn test_sequence_transform_round_trip() {
        let table = Table {
            header: vec![Field::with_transform(
                "counter",
                FieldType::UInt,
                Transform::sequence(),
            )],
            data: vec![
                vec![Value::UInt(100)],
                vec![Value::UInt(105)],
                vec![Value::UInt(112)],
                vec![Value::UInt(120)],
            ],
            meta: None,
        };
        let buf = encode(&table).unwrap();
        let decoded = decode(&buf).unwrap();
        assert_eq!(decoded.data, table.data);

        assert_eq!(get(&buf, 2), Err(TableError::SequencedRandomAccess));
        assert_eq!(get_many(&buf, &[0]), Err(TableError::SequencedRandomAccess));
    }

    #[test]
    fn test_append() {
        let table = scalar_table();
        let buf = encode(&table).unwrap();
        let added = add(
            &buf,
            &[vec![
                Value::UInt(4),
                Value::from("fourth"),
                Value::Float(4.4),
                Value::Bool(true),
            ]],
        )
        .unwrap();

        let decoded = decode(&added).unwrap();
        assert_eq!(decoded.data.len(), 4);
        assert_eq!(decoded.data[3][0], Value::UInt(4));
        assert_eq!(decoded.data[3][1], Value::from("fourth"));
        assert_rows_close(&decoded.data[..3], &table.data);
        assert_eq!(decoded.meta.as_ref().map(|m| m.row_count), Some(4));

        let index = get_index(&added).unwrap();
        assert_eq!(index.len(), 4);
        assert!(index.windows(2).all(|w| w[0] < w[1]));

        // The original frames sit at the same offsets.
        let old_index = get_index(&buf).unwrap();
        assert_eq!(&index[..3], &old_index[..]);
    }

    #[test]
    fn test_random_access() {
        let table = scalar_table();
        let buf = encode(&table).unwrap();

        let rows = get_many(&buf, &[0, 2]).unwrap();
        assert_rows_close(&rows, &[table.data[0].clone(), table.data[2].clone()]);

        // Unsorted, duplicated indices come back in request order.
        let rows = get_many(&buf, &[2, 0, 2]).unwrap();
        assert_rows_close(
            &rows,
            &[
                table.data[2].clone(),
                table.data[0].clone(),
                table.data[2].clone(),
            ],
        );

        let row = get(&buf, 1).unwrap();
        assert_rows_close(
            std::slice::from_ref(&row),
            std::slice::from_ref(&table.data[1]),
        );

        assert_eq!(
            get(&buf, 10),
            Err(TableError::OutOfRange { index: 10, rows: 3 })
        );
        assert_eq!(get_many(&buf, &[]), Ok(Vec::new()));
    }

    #[test]
    fn test_get_applies_non_sequence_transforms() {
        let table = Table {
            header: vec![Field::with_transform(
                "t",
                FieldType::Int,
                Transform::new(20, 100, 0),
            )],
            data: vec![vec![Value::Float(23.5)], vec![Value::Float(24.25)]],
            meta: None,
        };
        let buf = encode(&table).unwrap();
        let row = get(&buf, 1).unwrap();
        assert_close(&row[0], &Value::Float(24.25));
    }

    #[test]
    fn test_get_verbose() {
        let table = scalar_table();
        let buf = encode(&table).unwrap();
        let row = get_verbose(&buf, 2).unwrap();
        assert_eq!(row["id"], Value::UInt(3));
        assert_eq!(row["name"], Value::from("sample"));
    }

    #[test]
    fn test_add_verbose() {
        let table = scalar_table();
        let buf = encode(&table).unwrap();
        let row: VerboseRow = BTreeMap::from([
            ("id".to_string(), Value::UInt(9)),
            ("name".to_string(), Value::from("late")),
            // "v" left out: encodes as null, decodes as 0.0.
            ("a".to_string(), Value::Bool(false)),
        ]);
        let decoded = decode(&add_verbose(&buf, &[row]).unwrap()).unwrap();
        assert_eq!(decoded.data.len(), 4);
        assert_eq!(decoded.data[3][0], Value::UInt(9));
        assert_eq!(decoded.data[3][2], Value::Float(0.0));
    }

    #[test]
    fn test_arity_mismatch() {
        let mut table = scalar_table();
        table.data[1].pop();
        assert!(matches!(encode(&table), Err(TableError::InvalidTable(_))));
    }

    #[test]
    fn test_empty_table_round_trip() {
        let table = Table {
            header: vec![Field::new("id", FieldType::UInt)],
            data: vec![],
            meta: None,
        };
        let buf = encode(&table).unwrap();
        let decoded = decode(&buf).unwrap();
        assert!(decoded.data.is_empty());
        assert_eq!(get_index(&buf).unwrap(), Vec::<usize>::new());
        assert_eq!(
            get(&buf, 0),
            Err(TableError::OutOfRange { index: 0, rows: 0 })
        );
    }

    #[test]
    fn test_null_cells_encode_as_zeros() {
        let table = Table {
            header: vec![
                Field::new("id", FieldType::UInt),
                Field::new("name", FieldType::String),
            ],
            data: vec![vec![Value::Null, Value::Null]],
            meta: None,
        };
        let decoded = decode(&encode(&table).unwrap()).unwrap();
        assert_eq!(
            decoded.data,
            vec![vec![Value::UInt(0), Value::String(String::new())]]
        );
    }

    #[test]
    fn test_meta_round_trip() {
        let mut table = scalar_table();
        table.meta = Some(Meta {
            name: "telemetry".to_string(),
            owner: "ops".to_string(),
            link: "https://example.com/t".to_string(),
            comment: String::new(),
            row_count: 0,
        });
        let decoded = decode(&encode(&table).unwrap()).unwrap();
        let meta = decoded.meta.unwrap();
        assert_eq!(meta.name, "telemetry");
        assert_eq!(meta.owner, "ops");
        assert_eq!(meta.row_count, 3);
    }

    #[test]
    fn test_truncated_buffer_is_corrupt() {
        let buf = encode(&scalar_table()).unwrap();
        assert!(matches!(
            decode(&buf[..buf.len() - 1]),
            Err(TableError::CorruptBuffer(_))
        ));
    }

    #[test]
    fn test_wire_stability() {
        // Identical input yields byte-identical buffers, pinned here
        // against hand-assembled wire bytes.
        let table = Table {
            header: vec![Field::new("id", FieldType::UInt)],
            data: vec![vec![Value::UInt(1)], vec![Value::UInt(2)]],
            meta: None,
        };
        let buf = encode(&table).unwrap();
        assert_eq!(buf, encode(&table).unwrap());
        assert_eq!(
            buf,
            vec![
                0x2b, // schema block, 43 bytes
                0x0a, 0x25, // header entry, 37 bytes
                0x0a, 0x02, b'i', b'd', // name = "id"
                0x12, 0x04, b'u', b'i', b'n', b't', // type = "uint"
                0x22, 0x19, // stats, 25 bytes
                0x0d, 0x00, 0x00, 0x80, 0x3f, // start = 1.0
                0x15, 0x00, 0x00, 0x00, 0x40, // end = 2.0
                0x1d, 0x00, 0x00, 0x80, 0x3f, // min = 1.0
                0x25, 0x00, 0x00, 0x00, 0x40, // max = 2.0
                0x2d, 0x00, 0x00, 0xc0, 0x3f, // mean = 1.5
                0x12, 0x02, // meta entry, 2 bytes
                0x28, 0x02, // row_count = 2
                0x02, 0x08, 0x01, // row frame: id = 1
                0x02, 0x08, 0x02, // row frame: id = 2
            ]
        );
    }

    #[test]
    fn test_stats_attached_on_encode() {
        let buf = encode(&scalar_table()).unwrap();
        let decoded = decode(&buf).unwrap();
        let stats = decoded.header[0].stats.unwrap();
        assert_eq!(stats.start, 1.0);
        assert_eq!(stats.end, 3.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.mean, 2.0);
        let v_stats = decoded.header[2].stats.unwrap();
        assert!((f64::from(v_stats.mean) - (3.14 + 2.71 + 1.41) / 3.0).abs() < 1e-4);
        assert_eq!(decoded.header[1].stats, None);
        assert_eq!(decoded.header[3].stats, None);
    }

    #[test]
    fn test_untransformed_int_column_truncates() {
        let table = Table {
            header: vec![Field::new("n", FieldType::Int)],
            data: vec![vec![Value::Float(3.9)], vec![Value::Float(-3.9)]],
            meta: None,
        };
        let decoded = decode(&encode(&table).unwrap()).unwrap();
        assert_eq!(decoded.data, vec![vec![Value::Int(3)], vec![Value::Int(-3)]]);
    }
}
