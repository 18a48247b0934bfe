use thiserror::Error;

/// Errors raised by table validation, the codec, and the query primitives.
///
/// Every operation reports failure through this taxonomy; there are no
/// sentinel return values and no partial results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// Header missing or empty, duplicate or empty field name, unknown type.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// Row arity or cell type disagrees with the header.
    #[error("invalid table: {0}")]
    InvalidTable(String),

    /// A transformed value does not fit the 32-bit range of its column type.
    #[error("transform produced {value} which does not fit a {type_name} column")]
    InvalidTransform { value: f64, type_name: &'static str },

    /// Truncated varint, or a declared length exceeding the remaining bytes.
    #[error("corrupt buffer: {0}")]
    CorruptBuffer(String),

    /// A row message is malformed or a field's wire type disagrees with the schema.
    #[error("corrupt row: {0}")]
    CorruptRow(String),

    /// Random access attempted while a column has `sequence = true`.
    #[error("cannot extract specific entries from sequenced data")]
    SequencedRandomAccess,

    /// A requested row index is past the end of the row stream.
    #[error("buffer only contains {rows} rows, requested index {index}")]
    OutOfRange { index: usize, rows: usize },
}
