//! # rowcraft
//!
//! A length-prefixed binary codec for schema-described tabular data.
//!
//! A buffer starts with a schema block (typed fields, optional transforms,
//! optional statistics, optional meta) followed by one length-prefixed
//! message per row. Integer columns can carry an affine transform
//! (`offset`/`multip`/`decimals`) or delta-encode against the previous row
//! (`sequence`), folding floats and large counters into small varints.
//!
//! Besides whole-buffer [table::encode] and [table::decode] there are
//! random access ([table::get]), append ([table::add]), and a
//! byte-position index over the row frames ([table::get_index]).
//!
//! ## Example
//!
//! ```
//! use rowcraft::field::{Field, FieldType};
//! use rowcraft::table::{self, Table};
//! use rowcraft::value::Value;
//!
//! let table = Table {
//!     header: vec![
//!         Field::new("id", FieldType::UInt),
//!         Field::new("name", FieldType::String),
//!     ],
//!     data: vec![
//!         vec![Value::UInt(1), Value::from("alpha")],
//!         vec![Value::UInt(2), Value::from("beta")],
//!     ],
//!     meta: None,
//! };
//! let bytes = table::encode(&table).unwrap();
//! let decoded = table::decode(&bytes).unwrap();
//! assert_eq!(decoded.data, table.data);
//! ```

pub mod errors;
pub mod field;
pub mod row;
pub mod schema;
#[cfg(feature = "serde")]
pub mod serde;
pub mod stats;
pub mod table;
pub mod transform;
pub mod value;
pub mod varint;
pub mod wire;

pub use errors::TableError;
pub use field::{Field, FieldType, Meta, Stats};
pub use table::{Table, VerboseRow, VerboseTable};
pub use transform::Transform;
pub use value::Value;
