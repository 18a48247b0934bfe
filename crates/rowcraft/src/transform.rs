//! Per-column value transforms: an affine mapping
//! `(v - offset) * multip * 10^decimals` and, when `sequence` is set, a
//! delta against the previous row's raw value in place of the offset step.
//!
//! Both directions work in `f64`; the forward result is truncated toward
//! zero before it is range-checked against the column's integer type.

/// Transform parameters for an `int` or `uint` column.
///
/// Attached to other column types it is carried on the wire but never
/// applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Subtracted on encode, added back on decode.
    pub offset: i32,
    /// Multiplied on encode, divided on decode. Zero skips the division on
    /// decode; a buffer whose transform omits `multip` decodes as zero, so
    /// the skip is part of the wire contract.
    pub multip: i32,
    /// Power-of-ten exponent applied on top of `multip`.
    pub decimals: i32,
    /// Delta-encode against the previous row's raw value instead of `offset`.
    pub sequence: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            offset: 0,
            multip: 1,
            decimals: 0,
            sequence: false,
        }
    }
}

impl Transform {
    pub fn new(offset: i32, multip: i32, decimals: i32) -> Self {
        Transform {
            offset,
            multip,
            decimals,
            sequence: false,
        }
    }

    /// Delta transform: each row stores the difference to the previous one.
    pub fn sequence() -> Self {
        Transform {
            sequence: true,
            ..Default::default()
        }
    }

    /// Forward mapping: raw value to stored integer (still `f64`, truncated
    /// toward zero; the caller range-checks it). `prev` is the previous
    /// row's raw value, `None` for the first row.
    pub fn parse(&self, value: f64, prev: Option<f64>) -> f64 {
        let d = match prev {
            Some(p) if self.sequence => value - p,
            _ => value - f64::from(self.offset),
        };
        ((d * f64::from(self.multip)) * 10f64.powi(self.decimals)).trunc()
    }

    /// Inverse mapping: stored integer back to the raw value. `prev` is the
    /// previously recovered raw value for this column.
    pub fn recover(&self, stored: f64, prev: Option<f64>) -> f64 {
        let mut x = stored * 10f64.powi(-self.decimals);
        if self.multip != 0 {
            x /= f64::from(self.multip);
        }
        match prev {
            Some(p) if self.sequence => x + p,
            _ => x + f64::from(self.offset),
        }
    }
}
