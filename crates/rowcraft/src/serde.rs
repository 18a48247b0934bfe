//! JSON-deserializable table and schema definitions.
//!
//! These types describe the *shape* of a table as it arrives from JSON
//! (for example a schema file shipped with your application, or a
//! JavaScript object crossing the WASM boundary) and are converted into
//! core `rowcraft` types before any encoding happens.
//!
//! Core types stay free of serde derives; everything crosses through the
//! `*Def` mirrors below.

use std::collections::BTreeMap;

use ::serde::{Deserialize, Serialize};

use crate::errors::TableError;
use crate::field::{Field, FieldType, Meta, Stats};
use crate::table::{Table, VerboseRow, VerboseTable};
use crate::transform::Transform;
use crate::value::Value;

/// Top-level table definition with positional rows.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TableDef {
    pub header: Vec<FieldDef>,
    pub data: Vec<Vec<ValueDef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaDef>,
}

/// Top-level table definition with rows keyed by field name.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VerboseTableDef {
    pub header: Vec<FieldDef>,
    pub data: Vec<BTreeMap<String, ValueDef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaDef>,
}

/// Description of a single column.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FieldDef {
    /// Column name; becomes the key in verbose rows.
    pub name: String,
    /// One of `string`, `uint`, `int`, `float`, `bool`.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Optional compression transform for integer columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<TransformDef>,
    /// Statistics, normally only present on decoded tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsDef>,
}

/// Transform parameters; omitted members take the documented defaults.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TransformDef {
    #[serde(default)]
    pub offset: i32,
    #[serde(default = "default_multip")]
    pub multip: i32,
    #[serde(default)]
    pub decimals: i32,
    #[serde(default)]
    pub sequence: bool,
}

fn default_multip() -> i32 {
    1
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StatsDef {
    #[serde(default)]
    pub start: f32,
    #[serde(default)]
    pub end: f32,
    #[serde(default)]
    pub min: f32,
    #[serde(default)]
    pub max: f32,
    #[serde(default)]
    pub mean: f32,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct MetaDef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub row_count: i32,
}

/// A JSON cell value. Integers pick the narrowest core variant that fits.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ValueDef {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<ValueDef> for Value {
    fn from(def: ValueDef) -> Value {
        match def {
            ValueDef::Null => Value::Null,
            ValueDef::Bool(b) => Value::Bool(b),
            ValueDef::Int(i) => {
                if let Ok(v) = i32::try_from(i) {
                    Value::Int(v)
                } else if let Ok(v) = u32::try_from(i) {
                    Value::UInt(v)
                } else {
                    Value::Float(i as f64)
                }
            }
            ValueDef::Float(f) => Value::Float(f),
            ValueDef::Str(s) => Value::String(s),
        }
    }
}

impl From<Value> for ValueDef {
    fn from(value: Value) -> ValueDef {
        match value {
            Value::Null => ValueDef::Null,
            Value::Bool(b) => ValueDef::Bool(b),
            Value::UInt(v) => ValueDef::Int(i64::from(v)),
            Value::Int(v) => ValueDef::Int(i64::from(v)),
            Value::Float(v) => ValueDef::Float(v),
            Value::String(s) => ValueDef::Str(s),
        }
    }
}

impl From<TransformDef> for Transform {
    fn from(def: TransformDef) -> Transform {
        Transform {
            offset: def.offset,
            multip: def.multip,
            decimals: def.decimals,
            sequence: def.sequence,
        }
    }
}

impl From<Transform> for TransformDef {
    fn from(t: Transform) -> TransformDef {
        TransformDef {
            offset: t.offset,
            multip: t.multip,
            decimals: t.decimals,
            sequence: t.sequence,
        }
    }
}

impl From<StatsDef> for Stats {
    fn from(def: StatsDef) -> Stats {
        Stats {
            start: def.start,
            end: def.end,
            min: def.min,
            max: def.max,
            mean: def.mean,
        }
    }
}

impl From<Stats> for StatsDef {
    fn from(s: Stats) -> StatsDef {
        StatsDef {
            start: s.start,
            end: s.end,
            min: s.min,
            max: s.max,
            mean: s.mean,
        }
    }
}

impl From<MetaDef> for Meta {
    fn from(def: MetaDef) -> Meta {
        Meta {
            name: def.name,
            owner: def.owner,
            link: def.link,
            comment: def.comment,
            row_count: def.row_count,
        }
    }
}

impl From<Meta> for MetaDef {
    fn from(m: Meta) -> MetaDef {
        MetaDef {
            name: m.name,
            owner: m.owner,
            link: m.link,
            comment: m.comment,
            row_count: m.row_count,
        }
    }
}

impl TryFrom<FieldDef> for Field {
    type Error = TableError;

    fn try_from(def: FieldDef) -> Result<Field, TableError> {
        let field_type = FieldType::from_name(&def.field_type).ok_or_else(|| {
            TableError::InvalidSchema(format!("unknown field type '{}'", def.field_type))
        })?;
        Ok(Field {
            name: def.name,
            field_type,
            transform: def.transform.map(Into::into),
            stats: def.stats.map(Into::into),
        })
    }
}

impl From<Field> for FieldDef {
    fn from(field: Field) -> FieldDef {
        FieldDef {
            name: field.name,
            field_type: field.field_type.name().to_string(),
            transform: field.transform.map(Into::into),
            stats: field.stats.map(Into::into),
        }
    }
}

impl TryFrom<TableDef> for Table {
    type Error = TableError;

    fn try_from(def: TableDef) -> Result<Table, TableError> {
        let header = def
            .header
            .into_iter()
            .map(Field::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let data = def
            .data
            .into_iter()
            .map(|row| row.into_iter().map(Value::from).collect())
            .collect();
        Ok(Table {
            header,
            data,
            meta: def.meta.map(Into::into),
        })
    }
}

impl From<Table> for TableDef {
    fn from(table: Table) -> TableDef {
        TableDef {
            header: table.header.into_iter().map(Into::into).collect(),
            data: table
                .data
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
            meta: table.meta.map(Into::into),
        }
    }
}

impl TryFrom<VerboseTableDef> for VerboseTable {
    type Error = TableError;

    fn try_from(def: VerboseTableDef) -> Result<VerboseTable, TableError> {
        let header = def
            .header
            .into_iter()
            .map(Field::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let data = def
            .data
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<VerboseRow>()
            })
            .collect();
        Ok(VerboseTable {
            header,
            data,
            meta: def.meta.map(Into::into),
        })
    }
}

impl From<VerboseTable> for VerboseTableDef {
    fn from(table: VerboseTable) -> VerboseTableDef {
        VerboseTableDef {
            header: table.header.into_iter().map(Into::into).collect(),
            data: table
                .data
                .into_iter()
                .map(|row| row.into_iter().map(|(k, v)| (k, v.into())).collect())
                .collect(),
            meta: table.meta.map(Into::into),
        }
    }
}
