use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use rust_decimal::Decimal;

use crate::{
    error::CoercionError,
    value::{Kind, TypeTag, Value},
};

/// Converts a raw string into a value of the target type.
///
/// `None` is accepted only for nullable targets, where it becomes
/// [`Value::Null`]. Numeric failures report [`CoercionError::Numeric`] without
/// the offending input.
pub fn coerce(raw: Option<&str>, target: TypeTag) -> Result<Value, CoercionError> {
    let Some(raw) = raw else {
        return if target.nullable {
            Ok(Value::Null)
        } else {
            Err(CoercionError::NullToNonNullable { target })
        };
    };

    let value = match target.kind {
        Kind::Str => Value::Str(raw.to_owned()),
        Kind::Bool => {
            if raw.eq_ignore_ascii_case("true") {
                Value::Bool(true)
            } else if raw.eq_ignore_ascii_case("false") {
                Value::Bool(false)
            } else {
                return Err(CoercionError::InvalidBool { target });
            }
        }
        Kind::I8 => Value::I8(numeric(raw, target)?),
        Kind::I16 => Value::I16(numeric(raw, target)?),
        Kind::I32 => Value::I32(numeric(raw, target)?),
        Kind::I64 => Value::I64(numeric(raw, target)?),
        Kind::U8 => Value::U8(numeric(raw, target)?),
        Kind::U16 => Value::U16(numeric(raw, target)?),
        Kind::U32 => Value::U32(numeric(raw, target)?),
        Kind::U64 => Value::U64(numeric(raw, target)?),
        Kind::F32 => Value::F32(numeric(raw, target)?),
        Kind::F64 => Value::F64(numeric(raw, target)?),
        Kind::Char => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Value::Char(ch),
                _ => {
                    return Err(CoercionError::CharLength {
                        target,
                        len: raw.chars().count(),
                    });
                }
            }
        }
        Kind::BigInt => Value::BigInt(numeric::<BigInt>(raw, target)?),
        Kind::BigDecimal => Value::BigDecimal(numeric::<BigDecimal>(raw, target)?),
        Kind::Decimal => Value::Decimal(decimal(raw, target)?),
        Kind::Other(_) => return Err(CoercionError::Unsupported { target }),
    };

    Ok(value)
}

fn numeric<T: FromStr>(raw: &str, target: TypeTag) -> Result<T, CoercionError> {
    raw.parse::<T>()
        .map_err(|_| CoercionError::Numeric { target })
}

// `Decimal::from_str` rejects exponent notation, which `from_scientific`
// handles.
fn decimal(raw: &str, target: TypeTag) -> Result<Decimal, CoercionError> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| CoercionError::Numeric { target })
}
