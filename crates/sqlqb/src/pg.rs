//! `tokio-postgres` interop.
//!
//! [`Value`] implements [`ToSql`], so rendered arguments can be passed to a
//! `tokio_postgres` client as they are. Integers and floats are narrowed to
//! the width of the target column type; a value that would change on the way
//! is rejected instead of being rounded or wrapped.
//!
//! ```ignore
//! let (sql, args) = select(["id"])
//!     .from("users")
//!     .and_where(Eq::new().with("id", 1))
//!     .placeholder_format(PlaceholderFormat::Dollar)
//!     .render()?;
//! let rows = client.query(&sql, &pg_params(&args)).await?;
//! ```

use crate::qb::Value;
use bytes::BytesMut;
use std::error::Error;
use tokio_postgres::types::{IsNull, ToSql, Type};

type BoxError = Box<dyn Error + Sync + Send>;

/// Borrow rendered arguments as `tokio_postgres` parameters.
pub fn pg_params(values: &[Value]) -> Vec<&(dyn ToSql + Sync)> {
    values.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
}

fn is_text(ty: &Type) -> bool {
    matches!(*ty, Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN)
}

fn encode_int(v: i64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::INT2 => i16::try_from(v)?.to_sql(ty, out),
        Type::INT4 => i32::try_from(v)?.to_sql(ty, out),
        Type::OID => u32::try_from(v)?.to_sql(ty, out),
        Type::FLOAT4 => {
            let f = v as f32;
            if f as i64 != v || f64::from(f) >= i64::MAX as f64 {
                return Err(format!("integer {} is not exactly representable as float4", v).into());
            }
            f.to_sql(ty, out)
        }
        Type::FLOAT8 => {
            let f = v as f64;
            if f as i64 != v || f >= i64::MAX as f64 {
                return Err(format!("integer {} is not exactly representable as float8", v).into());
            }
            f.to_sql(ty, out)
        }
        _ if is_text(ty) => v.to_string().to_sql(ty, out),
        _ => v.to_sql(ty, out),
    }
}

fn encode_float(v: f64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::FLOAT4 => {
            let f = v as f32;
            // precision may drop, magnitude may not
            if f.is_infinite() && v.is_finite() {
                return Err(format!("float {} is out of range for float4", v).into());
            }
            f.to_sql(ty, out)
        }
        Type::FLOAT8 => v.to_sql(ty, out),
        _ if is_text(ty) => v.to_string().to_sql(ty, out),
        _ => Err(format!("cannot encode float {} as {}", v, ty).into()),
    }
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(v) => v.to_sql(ty, out),
            Value::Int(v) => encode_int(*v, ty, out),
            Value::UInt(v) => encode_int(i64::try_from(*v)?, ty, out),
            Value::Float(v) => encode_float(*v, ty, out),
            Value::Text(v) => v.to_sql(ty, out),
            Value::Bytes(v) => v.as_slice().to_sql(ty, out),
            Value::Uuid(v) => v.to_sql(ty, out),
            Value::Timestamp(v) => {
                if *ty == Type::TIMESTAMP {
                    v.naive_utc().to_sql(ty, out)
                } else {
                    v.to_sql(ty, out)
                }
            }
            Value::Date(v) => v.to_sql(ty, out),
            Value::Json(v) => v.to_sql(ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    tokio_postgres::types::to_sql_checked!();
}
