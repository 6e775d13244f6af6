use std::fmt;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use rust_decimal::Decimal;

use crate::error::TypeConfigurationError;

/// The kind of value a field can be coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Str,
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Char,
    BigInt,
    BigDecimal,
    /// 96-bit fixed-precision decimal.
    Decimal,
    /// A type the coercer has no conversion for. Carries the type's name.
    Other(&'static str),
}

impl Kind {
    pub const fn name(&self) -> &'static str {
        match *self {
            Self::Str => "String",
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
            Self::BigInt => "BigInt",
            Self::BigDecimal => "BigDecimal",
            Self::Decimal => "Decimal",
            Self::Other(name) => name,
        }
    }
}

/// Declared type of a bound field.
///
/// `nullable` is set for `Option<T>` fields, which accept an absent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag {
    pub kind: Kind,
    pub nullable: bool,
}

impl TypeTag {
    pub const fn new(kind: Kind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    pub const fn nullable(kind: Kind) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "Option<{}>", self.kind.name())
        } else {
            f.write_str(self.kind.name())
        }
    }
}

/// A coerced value, not yet moved into its field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Sentinel for an absent value: `None` for `Option<T>`, `T::default()`
    /// otherwise.
    Null,
    Str(String),
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Char(char),
    BigInt(BigInt),
    BigDecimal(BigDecimal),
    Decimal(Decimal),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Str(_) => Kind::Str.name(),
            Self::Bool(_) => Kind::Bool.name(),
            Self::I8(_) => Kind::I8.name(),
            Self::I16(_) => Kind::I16.name(),
            Self::I32(_) => Kind::I32.name(),
            Self::I64(_) => Kind::I64.name(),
            Self::U8(_) => Kind::U8.name(),
            Self::U16(_) => Kind::U16.name(),
            Self::U32(_) => Kind::U32.name(),
            Self::U64(_) => Kind::U64.name(),
            Self::F32(_) => Kind::F32.name(),
            Self::F64(_) => Kind::F64.name(),
            Self::Char(_) => Kind::Char.name(),
            Self::BigInt(_) => Kind::BigInt.name(),
            Self::BigDecimal(_) => Kind::BigDecimal.name(),
            Self::Decimal(_) => Kind::Decimal.name(),
        }
    }
}

/// A Rust type that can receive a coerced [`Value`].
///
/// Implemented for every type the coercer supports and for `Option<T>` of
/// those. The derive macro reads `TAG` to describe each bound field.
pub trait BindValue: Sized {
    const TAG: TypeTag;

    fn from_value(value: Value, field: &'static str) -> Result<Self, TypeConfigurationError>;
}

macro_rules! impl_bind_value {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl BindValue for $ty {
                const TAG: TypeTag = TypeTag::new(Kind::$kind);

                fn from_value(
                    value: Value,
                    field: &'static str,
                ) -> Result<Self, TypeConfigurationError> {
                    match value {
                        Value::$kind(inner) => Ok(inner),
                        Value::Null => Ok(<$ty>::default()),
                        other => Err(TypeConfigurationError::ValueMismatch {
                            field,
                            expected: Self::TAG,
                            found: other.kind_name(),
                        }),
                    }
                }
            }
        )*
    };
}

impl_bind_value! {
    String => Str,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    char => Char,
    BigInt => BigInt,
    BigDecimal => BigDecimal,
    Decimal => Decimal,
}

impl<T: BindValue> BindValue for Option<T> {
    const TAG: TypeTag = TypeTag::nullable(T::TAG.kind);

    fn from_value(value: Value, field: &'static str) -> Result<Self, TypeConfigurationError> {
        match value {
            Value::Null => Ok(None),
            value => T::from_value(value, field).map(Some),
        }
    }
}

/// Resolved values handed to a positional constructor, consumed in order.
#[derive(Debug)]
pub struct Arguments {
    values: std::vec::IntoIter<Value>,
}

impl Arguments {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }

    /// Takes the next value and converts it into the parameter's type.
    pub fn take<T: BindValue>(&mut self, field: &'static str) -> Result<T, TypeConfigurationError> {
        let value = self
            .values
            .next()
            .ok_or(TypeConfigurationError::MissingArgument { field })?;
        T::from_value(value, field)
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_tag_is_nullable() {
        assert_eq!(<Option<u16>>::TAG, TypeTag::nullable(Kind::U16));
        assert_eq!(<u16>::TAG, TypeTag::new(Kind::U16));
        assert_eq!(<Option<String>>::TAG.to_string(), "Option<String>");
    }

    #[test]
    fn null_becomes_empty_sentinel() {
        assert_eq!(i32::from_value(Value::Null, "x").unwrap(), 0);
        assert_eq!(String::from_value(Value::Null, "x").unwrap(), "");
        assert_eq!(<Option<i32>>::from_value(Value::Null, "x").unwrap(), None);
    }

    #[test]
    fn mismatched_value_is_a_type_error() {
        let err = i32::from_value(Value::Bool(true), "port").unwrap_err();
        assert!(matches!(
            err,
            TypeConfigurationError::ValueMismatch {
                field: "port",
                found: "bool",
                ..
            }
        ));
    }

    #[test]
    fn arguments_run_out() {
        let mut args = Arguments::new(vec![Value::I32(7)]);
        assert_eq!(args.take::<i32>("a").unwrap(), 7);
        assert_eq!(args.remaining(), 0);
        assert!(matches!(
            args.take::<i32>("b"),
            Err(TypeConfigurationError::MissingArgument { field: "b" })
        ));
    }
}
