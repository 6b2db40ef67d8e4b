//! Bound parameter values.
//!
//! [`Value`] is the closed set of scalar kinds an update can carry. Values are
//! never interpreted by the fragment builder; they only meet Postgres types at
//! bind time, through the [`ToSql`] impl below.

use bytes::BytesMut;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::error::Error;
use tokio_postgres::types::{IsNull, ToSql, Type};

/// A single value bound to a `$n` placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Arrays and objects, bound as `json`/`jsonb`.
    Json(serde_json::Value),
    Uuid(uuid::Uuid),
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::Int(v.into())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(v.into())
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<uuid::Uuid> for Value {
    fn from(v: uuid::Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// JSON scalars map onto the matching variant; arrays and objects stay JSON.
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => n.as_f64().map_or(Self::Json(serde_json::Value::Number(n)), Self::Float),
            },
            serde_json::Value::String(s) => Self::Text(s),
            other => Self::Json(other),
        }
    }
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Self::Null => Ok(IsNull::Yes),
            Self::Bool(v) => v.to_sql_checked(ty, out),
            Self::Int(v) => match *ty {
                Type::INT2 => i16::try_from(*v)?.to_sql_checked(ty, out),
                Type::INT4 => i32::try_from(*v)?.to_sql_checked(ty, out),
                Type::FLOAT4 => (*v as f32).to_sql_checked(ty, out),
                Type::FLOAT8 => (*v as f64).to_sql_checked(ty, out),
                Type::NUMERIC => Decimal::from(*v).to_sql_checked(ty, out),
                _ => v.to_sql_checked(ty, out),
            },
            Self::Float(v) => match *ty {
                Type::FLOAT4 => (*v as f32).to_sql_checked(ty, out),
                // NaN and infinities have no Decimal form and fail here.
                Type::NUMERIC => Decimal::try_from(*v)?.to_sql_checked(ty, out),
                _ => v.to_sql_checked(ty, out),
            },
            Self::Text(v) => v.to_sql_checked(ty, out),
            Self::Json(v) => v.to_sql_checked(ty, out),
            Self::Uuid(v) => v.to_sql_checked(ty, out),
            Self::Timestamp(v) => match *ty {
                Type::TIMESTAMP => v.naive_utc().to_sql_checked(ty, out),
                _ => v.to_sql_checked(ty, out),
            },
            Self::Date(v) => v.to_sql_checked(ty, out),
        }
    }

    // The concrete check happens per variant in `to_sql`.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    tokio_postgres::types::to_sql_checked!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_postgres::types::FromSql;

    fn encode(value: &Value, ty: &Type) -> Result<(IsNull, Vec<u8>), Box<dyn Error + Sync + Send>> {
        let mut buf = BytesMut::new();
        let is_null = value.to_sql_checked(ty, &mut buf)?;
        Ok((is_null, buf.to_vec()))
    }

    #[test]
    fn json_scalars_become_native_variants() {
        assert_eq!(Value::from(json!(null)), Value::Null);
        assert_eq!(Value::from(json!(true)), Value::Bool(true));
        assert_eq!(Value::from(json!(32)), Value::Int(32));
        assert_eq!(Value::from(json!(0.5)), Value::Float(0.5));
        assert_eq!(Value::from(json!("Aliya")), Value::Text("Aliya".into()));
        assert_eq!(Value::from(json!("Aliya")).as_str(), Some("Aliya"));
        assert_eq!(Value::from(json!(32)).as_i64(), Some(32));
    }

    #[test]
    fn json_containers_pass_through() {
        let v = json!({"tags": ["a", "b"]});
        assert_eq!(Value::from(v.clone()), Value::Json(v));
        assert_eq!(Value::from(json!([1, 2])), Value::Json(json!([1, 2])));
    }

    #[test]
    fn option_none_is_null() {
        assert!(Value::from(None::<i32>).is_null());
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }

    #[test]
    fn null_binds_as_sql_null_for_any_type() {
        let (is_null, bytes) = encode(&Value::Null, &Type::INT4).unwrap();
        assert!(matches!(is_null, IsNull::Yes));
        assert!(bytes.is_empty());
    }

    #[test]
    fn int_narrows_to_int4_column() {
        let (_, bytes) = encode(&Value::Int(32), &Type::INT4).unwrap();
        assert_eq!(bytes, 32_i32.to_be_bytes());
    }

    #[test]
    fn int_binds_as_int8_by_default() {
        let (_, bytes) = encode(&Value::Int(32), &Type::INT8).unwrap();
        assert_eq!(bytes, 32_i64.to_be_bytes());
    }

    #[test]
    fn int_overflowing_int2_is_bind_error() {
        assert!(encode(&Value::Int(70_000), &Type::INT2).is_err());
    }

    #[test]
    fn int_widens_to_float8() {
        let (_, bytes) = encode(&Value::Int(2), &Type::FLOAT8).unwrap();
        assert_eq!(bytes, 2.0_f64.to_be_bytes());
    }

    #[test]
    fn float_binds_to_numeric_column() {
        let (is_null, bytes) = encode(&Value::Float(0.25), &Type::NUMERIC).unwrap();
        assert!(matches!(is_null, IsNull::No));

        let decoded = Decimal::from_sql(&Type::NUMERIC, &bytes).unwrap();
        assert_eq!(decoded, Decimal::new(25, 2));
    }

    #[test]
    fn int_binds_to_numeric_column() {
        let (_, bytes) = encode(&Value::Int(120_000), &Type::NUMERIC).unwrap();

        let decoded = Decimal::from_sql(&Type::NUMERIC, &bytes).unwrap();
        assert_eq!(decoded, Decimal::from(120_000_i64));
    }

    #[test]
    fn nan_cannot_bind_to_numeric_column() {
        assert!(encode(&Value::Float(f64::NAN), &Type::NUMERIC).is_err());
    }

    #[test]
    fn text_binds_raw_bytes() {
        let (_, bytes) = encode(&Value::from("Aliya"), &Type::TEXT).unwrap();
        assert_eq!(bytes, b"Aliya");
    }

    #[test]
    fn mismatched_kind_is_rejected_at_bind_time() {
        assert!(encode(&Value::Bool(true), &Type::TEXT).is_err());
        assert!(encode(&Value::from("x"), &Type::INT4).is_err());
    }

    #[test]
    fn serializes_untagged() {
        let s = serde_json::to_string(&vec![Value::from("Aliya"), Value::Int(32), Value::Null]).unwrap();
        assert_eq!(s, r#"["Aliya",32,null]"#);
    }
}
