//! WASM bindings for the `rowcraft` tabular codec.
//!
//! This crate exposes the codec to JavaScript: tables go in as plain JS
//! objects (or JSON strings), encoded buffers come back as `Uint8Array`s,
//! and every error surfaces as a `JsValue` carrying a debug string.
//!
//! A table object has the same shape the core serde definitions describe:
//!
//! ```text
//! // Pseudo TypeScript example
//! //
//! // const table = {
//! //   header: [
//! //     { name: "time", type: "uint", transform: { sequence: true } },
//! //     { name: "temp", type: "int",
//! //       transform: { offset: 20, multip: 100 } },
//! //   ],
//! //   data: [[1609459260, 21.5], [1609459320, 21.75]],
//! // };
//! //
//! // const buffer = encodeTable(table);
//! // const decoded = decodeTable(buffer);
//! // const rows = getTable(buffer, [0, 1]);
//! ```

mod convert;

use rowcraft::serde::{TableDef, ValueDef, VerboseTableDef};
use rowcraft::table::{self, Table, VerboseRow, VerboseTable};
use rowcraft::value::Value;
use wasm_bindgen::prelude::*;

/// Encodes a table object (positional rows) into a byte buffer.
#[wasm_bindgen(js_name = encodeTable)]
pub fn encode_table(table: JsValue) -> Result<Vec<u8>, JsValue> {
    let def: TableDef = convert::from_js(table)?;
    let table = Table::try_from(def).map_err(convert::error_to_js)?;
    table::encode(&table).map_err(convert::error_to_js)
}

/// Decodes a byte buffer into a table object (positional rows).
#[wasm_bindgen(js_name = decodeTable)]
pub fn decode_table(buffer: &[u8]) -> Result<JsValue, JsValue> {
    let table = table::decode(buffer).map_err(convert::error_to_js)?;
    convert::to_js(&TableDef::from(table))
}

/// Encodes a table whose rows are objects keyed by field name.
#[wasm_bindgen(js_name = encodeVerbose)]
pub fn encode_verbose(table: JsValue) -> Result<Vec<u8>, JsValue> {
    let def: VerboseTableDef = convert::from_js(table)?;
    let table = VerboseTable::try_from(def).map_err(convert::error_to_js)?;
    table::encode_verbose(&table).map_err(convert::error_to_js)
}

/// Decodes a byte buffer into a table with keyed rows.
#[wasm_bindgen(js_name = decodeVerbose)]
pub fn decode_verbose(buffer: &[u8]) -> Result<JsValue, JsValue> {
    let table = table::decode_verbose(buffer).map_err(convert::error_to_js)?;
    convert::to_js(&VerboseTableDef::from(table))
}

/// Encodes a table from a JSON string instead of a JS object.
#[wasm_bindgen(js_name = encodeTableJson)]
pub fn encode_table_json(json: &str) -> Result<Vec<u8>, JsValue> {
    let def: TableDef = serde_json::from_str(json).map_err(convert::error_to_js)?;
    let table = Table::try_from(def).map_err(convert::error_to_js)?;
    table::encode(&table).map_err(convert::error_to_js)
}

/// Decodes a byte buffer into a JSON string.
#[wasm_bindgen(js_name = decodeTableJson)]
pub fn decode_table_json(buffer: &[u8]) -> Result<String, JsValue> {
    let table = table::decode(buffer).map_err(convert::error_to_js)?;
    serde_json::to_string(&TableDef::from(table)).map_err(convert::error_to_js)
}

/// Materializes one row without decoding the whole buffer.
#[wasm_bindgen(js_name = getRow)]
pub fn get_row(buffer: &[u8], index: u32) -> Result<JsValue, JsValue> {
    let row = table::get(buffer, index as usize).map_err(convert::error_to_js)?;
    let row: Vec<ValueDef> = row.into_iter().map(ValueDef::from).collect();
    convert::to_js(&row)
}

/// Materializes the requested rows, in request order.
#[wasm_bindgen(js_name = getTable)]
pub fn get_table(buffer: &[u8], indices: Vec<u32>) -> Result<JsValue, JsValue> {
    let indices: Vec<usize> = indices.into_iter().map(|i| i as usize).collect();
    let rows = table::get_many(buffer, &indices).map_err(convert::error_to_js)?;
    let rows: Vec<Vec<ValueDef>> = rows
        .into_iter()
        .map(|row| row.into_iter().map(ValueDef::from).collect())
        .collect();
    convert::to_js(&rows)
}

/// Appends positional rows to an encoded buffer, returning a new buffer.
#[wasm_bindgen(js_name = addTable)]
pub fn add_table(buffer: &[u8], rows: JsValue) -> Result<Vec<u8>, JsValue> {
    let rows: Vec<Vec<ValueDef>> = convert::from_js(rows)?;
    let rows: Vec<Vec<Value>> = rows
        .into_iter()
        .map(|row| row.into_iter().map(Value::from).collect())
        .collect();
    table::add(buffer, &rows).map_err(convert::error_to_js)
}

/// Appends keyed rows to an encoded buffer, returning a new buffer.
#[wasm_bindgen(js_name = addVerbose)]
pub fn add_verbose(buffer: &[u8], rows: JsValue) -> Result<Vec<u8>, JsValue> {
    let rows: Vec<std::collections::BTreeMap<String, ValueDef>> = convert::from_js(rows)?;
    let rows: Vec<VerboseRow> = rows
        .into_iter()
        .map(|row| row.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
        .collect();
    table::add_verbose(buffer, &rows).map_err(convert::error_to_js)
}

/// Byte offsets of every row frame in the buffer.
#[wasm_bindgen(js_name = getIndex)]
pub fn get_index(buffer: &[u8]) -> Result<Vec<u32>, JsValue> {
    let index = table::get_index(buffer).map_err(convert::error_to_js)?;
    Ok(index.into_iter().map(|i| i as u32).collect())
}
