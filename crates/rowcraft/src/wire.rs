//! Tag keys, fixed-width values, and unknown-field skipping for the
//! message layout shared by the schema block and row messages.
//!
//! A key is `field_number << 3 | wire_type`, written as an unsigned
//! varint. Only the wire types the five primitives use are accepted.

use crate::errors::TableError;
use crate::varint;

/// Varint-valued field (`uint`, `int`, `bool`, message-level integers).
pub const WIRE_VARINT: u32 = 0;
/// 8-byte little-endian field. Never produced, skipped when encountered.
pub const WIRE_FIXED64: u32 = 1;
/// Length-delimited field (`string`, sub-messages).
pub const WIRE_LEN: u32 = 2;
/// 4-byte little-endian field (`float`).
pub const WIRE_FIXED32: u32 = 5;

/// Appends the key for `field_number` with `wire_type`.
pub fn write_key(buf: &mut Vec<u8>, field_number: u32, wire_type: u32) {
    varint::write_uvarint(buf, u64::from(field_number << 3 | wire_type));
}

/// Reads a key at `pos`, returning `(field_number, wire_type, next_pos)`.
pub fn read_key(buf: &[u8], pos: usize) -> Result<(u32, u32, usize), TableError> {
    let (key, next) = varint::read_uvarint(buf, pos)?;
    if key > u64::from(u32::MAX) {
        return Err(TableError::CorruptBuffer(format!(
            "oversized field key at byte {pos}"
        )));
    }
    Ok((key as u32 >> 3, key as u32 & 0x7, next))
}

/// Appends an IEEE-754 binary32 value as 4 little-endian bytes.
pub fn write_f32(buf: &mut Vec<u8>, value: f32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Reads 4 little-endian bytes at `pos` as an `f32`.
pub fn read_f32(buf: &[u8], pos: usize) -> Result<(f32, usize), TableError> {
    let end = pos + 4;
    if end > buf.len() {
        return Err(TableError::CorruptBuffer(format!(
            "truncated fixed32 at byte {pos}"
        )));
    }
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[pos..end]);
    Ok((f32::from_le_bytes(bytes), end))
}

/// Skips one value of the given wire type, returning the position past it.
/// Used for unknown field numbers.
pub fn skip_value(buf: &[u8], pos: usize, wire_type: u32) -> Result<usize, TableError> {
    match wire_type {
        WIRE_VARINT => varint::read_uvarint(buf, pos).map(|(_, next)| next),
        WIRE_FIXED64 => {
            if pos + 8 > buf.len() {
                return Err(TableError::CorruptBuffer(format!(
                    "truncated fixed64 at byte {pos}"
                )));
            }
            Ok(pos + 8)
        }
        WIRE_LEN => varint::read_delimited(buf, pos).map(|(_, next)| next),
        WIRE_FIXED32 => {
            if pos + 4 > buf.len() {
                return Err(TableError::CorruptBuffer(format!(
                    "truncated fixed32 at byte {pos}"
                )));
            }
            Ok(pos + 4)
        }
        other => Err(TableError::CorruptBuffer(format!(
            "unsupported wire type {other} at byte {pos}"
        ))),
    }
}

/// Appends an `int32`-style varint: negatives are sign-extended to 64 bits,
/// so they always occupy 10 bytes.
pub fn write_i32(buf: &mut Vec<u8>, value: i32) {
    varint::write_uvarint(buf, value as i64 as u64);
}

/// Reads an `int32`-style varint at `pos`, truncating to the low 32 bits.
pub fn read_i32(buf: &[u8], pos: usize) -> Result<(i32, usize), TableError> {
    let (raw, next) = varint::read_uvarint(buf, pos)?;
    Ok((raw as u32 as i32, next))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        let mut buf = Vec::new();
        write_key(&mut buf, 1, WIRE_VARINT);
        write_key(&mut buf, 4, WIRE_LEN);
        write_key(&mut buf, 5, WIRE_FIXED32);
        assert_eq!(buf, vec![0x08, 0x22, 0x2d]);

        let (field, wire, pos) = read_key(&buf, 0).unwrap();
        assert_eq!((field, wire), (1, WIRE_VARINT));
        let (field, wire, pos) = read_key(&buf, pos).unwrap();
        assert_eq!((field, wire), (4, WIRE_LEN));
        let (field, wire, _) = read_key(&buf, pos).unwrap();
        assert_eq!((field, wire), (5, WIRE_FIXED32));
    }

    #[test]
    fn test_i32_negative_is_sign_extended() {
        let mut buf = Vec::new();
        write_i32(&mut buf, -42);
        assert_eq!(buf.len(), 10);
        assert_eq!(read_i32(&buf, 0), Ok((-42, 10)));
    }

    #[test]
    fn test_f32_round_trip() {
        let mut buf = Vec::new();
        write_f32(&mut buf, 1.5);
        assert_eq!(buf, vec![0x00, 0x00, 0xc0, 0x3f]);
        assert_eq!(read_f32(&buf, 0), Ok((1.5, 4)));
    }

    #[test]
    fn test_skip_value() {
        let mut buf = Vec::new();
        varint::write_uvarint(&mut buf, 300);
        varint::write_delimited(&mut buf, b"abc");
        buf.extend_from_slice(&[0u8; 4]);

        let pos = skip_value(&buf, 0, WIRE_VARINT).unwrap();
        let pos = skip_value(&buf, pos, WIRE_LEN).unwrap();
        let pos = skip_value(&buf, pos, WIRE_FIXED32).unwrap();
        assert_eq!(pos, buf.len());
    }

    #[test]
    fn test_skip_unsupported_wire_type() {
        assert!(skip_value(&[0x00], 0, 3).is_err());
    }
}
