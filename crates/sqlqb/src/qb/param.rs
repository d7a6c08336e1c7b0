//! Argument values bound to positional markers.
//!
//! - [`Value`]: one bound argument (what ends up in the rendered arg list).
//! - [`Arg`]: an argument of [`Expr`](crate::qb::Expr) / [`ConcatExpr`](crate::qb::ConcatExpr),
//!   either a value or a nested fragment.
//! - [`Operand`]: the value side of a condition-map entry (null, scalar or list).

use crate::qb::traits::Fragment;
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// A single argument value.
///
/// Byte sequences are always one scalar (`Bytes`), never expanded into a list.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
    Json(serde_json::Value),
}

impl Value {
    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::UInt(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
            Value::Bytes(v) => {
                f.write_str("\\x")?;
                for b in v {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
            Value::Uuid(v) => write!(f, "{v}"),
            Value::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
            Value::Date(v) => write!(f, "{v}"),
            Value::Json(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

impl_value_from! {
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u16 => UInt,
    u32 => UInt,
    u64 => UInt,
    f32 => Float,
    f64 => Float,
    String => Text,
    &str => Text,
    Vec<u8> => Bytes,
    &[u8] => Bytes,
    Uuid => Uuid,
    DateTime<Utc> => Timestamp,
    NaiveDate => Date,
    serde_json::Value => Json,
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::UInt(v as u64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// An argument to [`Expr`](crate::qb::Expr) or [`ConcatExpr`](crate::qb::ConcatExpr).
///
/// A fragment argument is rendered and spliced into the enclosing SQL at the
/// position of its marker.
#[derive(Clone, Debug)]
pub enum Arg {
    Value(Value),
    Fragment(Arc<dyn Fragment>),
}

impl Arg {
    /// Wrap a fragment so it can be passed as an argument.
    pub fn fragment<F: Fragment + 'static>(fragment: F) -> Self {
        Arg::Fragment(Arc::new(fragment))
    }

    pub fn is_fragment(&self) -> bool {
        matches!(self, Arg::Fragment(_))
    }
}

impl<T: Into<Value>> From<T> for Arg {
    fn from(v: T) -> Self {
        Arg::Value(v.into())
    }
}

/// Build a `Vec<Arg>` from heterogeneous values.
///
/// # Example
/// ```ignore
/// let e = Expr::new("a = ? AND b = ?", args![1, "x"]);
/// let nested = Expr::new("x IN (?)", args![Arg::fragment(sub)]);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}

/// The value side of one condition-map entry.
///
/// Conversions mirror how a caller would express nullability:
/// - `T`, `&T` → `Scalar`
/// - `Option<T>` → `Null` / `Scalar`
/// - `Vec<T>`, `&[T]`, `[T; N]` → `List`
/// - `Option<Vec<T>>`, `Option<[T; N]>` → `Null` / `List`
/// - `Vec<u8>`, `&[u8]` → `Scalar` (bytes)
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Null,
    Scalar(Value),
    List(Vec<Value>),
}

impl Operand {
    /// Returns true when this operand is the empty string.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Operand::Scalar(Value::Text(s)) if s.is_empty())
    }
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        if v.is_null() {
            Operand::Null
        } else {
            Operand::Scalar(v)
        }
    }
}

impl From<Vec<Value>> for Operand {
    fn from(v: Vec<Value>) -> Self {
        Operand::List(v)
    }
}

impl From<Option<Value>> for Operand {
    fn from(v: Option<Value>) -> Self {
        v.map_or(Operand::Null, Operand::from)
    }
}

impl From<Vec<u8>> for Operand {
    fn from(v: Vec<u8>) -> Self {
        Operand::Scalar(Value::Bytes(v))
    }
}

impl From<&[u8]> for Operand {
    fn from(v: &[u8]) -> Self {
        Operand::Scalar(Value::Bytes(v.to_vec()))
    }
}

fn list<T: Clone + Into<Value>>(items: &[T]) -> Operand {
    Operand::List(items.iter().cloned().map(Into::into).collect())
}

macro_rules! impl_operand_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(v: $ty) -> Self {
                    Operand::Scalar(v.into())
                }
            }

            impl From<&$ty> for Operand {
                fn from(v: &$ty) -> Self {
                    Operand::Scalar(v.clone().into())
                }
            }

            impl From<Option<$ty>> for Operand {
                fn from(v: Option<$ty>) -> Self {
                    v.map_or(Operand::Null, Operand::from)
                }
            }

            impl From<Vec<$ty>> for Operand {
                fn from(v: Vec<$ty>) -> Self {
                    Operand::List(v.into_iter().map(Into::into).collect())
                }
            }

            impl From<&Vec<$ty>> for Operand {
                fn from(v: &Vec<$ty>) -> Self {
                    list(v.as_slice())
                }
            }

            impl From<&[$ty]> for Operand {
                fn from(v: &[$ty]) -> Self {
                    list(v)
                }
            }

            impl<const N: usize> From<[$ty; N]> for Operand {
                fn from(v: [$ty; N]) -> Self {
                    Operand::List(v.into_iter().map(Into::into).collect())
                }
            }

            impl<const N: usize> From<&[$ty; N]> for Operand {
                fn from(v: &[$ty; N]) -> Self {
                    list(v.as_slice())
                }
            }

            impl From<Option<Vec<$ty>>> for Operand {
                fn from(v: Option<Vec<$ty>>) -> Self {
                    v.map_or(Operand::Null, Operand::from)
                }
            }

            impl<const N: usize> From<Option<[$ty; N]>> for Operand {
                fn from(v: Option<[$ty; N]>) -> Self {
                    v.map_or(Operand::Null, Operand::from)
                }
            }
        )*
    };
}

impl_operand_from!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    String,
    &str,
    Uuid,
    DateTime<Utc>,
    NaiveDate,
    serde_json::Value,
);
