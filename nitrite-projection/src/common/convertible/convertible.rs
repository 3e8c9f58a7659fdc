use crate::collection::{Document, NitriteId};
use crate::common::Value;
use crate::errors::{ErrorKind, NitriteError, NitriteResult};

/// Two-way conversion between a Rust type and a document [Value].
///
/// Domain types implement this to become projection targets of a
/// [`crate::common::ConvertibleMapper`]. `from_value` must not assume any
/// reserved field is present: projected records never carry `_id`.
pub trait Convertible {
    type Output;

    fn to_value(&self) -> NitriteResult<Value>;
    fn from_value(value: &Value) -> NitriteResult<Self::Output>;
}

fn mapping_error(value: &Value, expected: &str) -> NitriteError {
    log::error!("Value {} is not {}", value, expected);
    NitriteError::new(
        &format!("Value is not {}", expected),
        ErrorKind::ObjectMappingError,
    )
}

macro_rules! impl_convertible_for_scalar {
    ($($ty:ty => $variant:ident, $expected:literal);+ $(;)?) => {
        $(
            impl Convertible for $ty {
                type Output = $ty;

                fn to_value(&self) -> NitriteResult<Value> {
                    Ok(Value::$variant(self.clone()))
                }

                fn from_value(value: &Value) -> NitriteResult<Self::Output> {
                    match value {
                        Value::$variant(v) => Ok(v.clone()),
                        _ => Err(mapping_error(value, $expected)),
                    }
                }
            }
        )+
    };
}

impl_convertible_for_scalar! {
    bool => Bool, "a bool";
    i32 => I32, "an i32";
    u32 => U32, "a u32";
    i64 => I64, "an i64";
    u64 => U64, "a u64";
    f32 => F32, "an f32";
    f64 => F64, "an f64";
    char => Char, "a char";
    String => String, "a string";
    NitriteId => NitriteId, "a nitrite id";
    Document => Document, "a document";
}

impl Convertible for () {
    type Output = ();

    fn to_value(&self) -> NitriteResult<Value> {
        Ok(Value::Null)
    }

    fn from_value(_value: &Value) -> NitriteResult<Self::Output> {
        Ok(())
    }
}

impl Convertible for Value {
    type Output = Value;

    fn to_value(&self) -> NitriteResult<Value> {
        Ok(self.clone())
    }

    fn from_value(value: &Value) -> NitriteResult<Self> {
        Ok(value.clone())
    }
}

impl<T> Convertible for Option<T>
where
    T: Convertible,
{
    type Output = Option<T::Output>;

    fn to_value(&self) -> NitriteResult<Value> {
        match self {
            Some(v) => v.to_value(),
            None => Ok(Value::Null),
        }
    }

    fn from_value(value: &Value) -> NitriteResult<Self::Output> {
        match value {
            Value::Null => Ok(None),
            _ => Ok(Some(T::from_value(value)?)),
        }
    }
}

impl<T> Convertible for Vec<T>
where
    T: Convertible,
{
    type Output = Vec<T::Output>;

    fn to_value(&self) -> NitriteResult<Value> {
        let items = self
            .iter()
            .map(|item| item.to_value())
            .collect::<NitriteResult<Vec<_>>>()?;
        Ok(Value::Array(items))
    }

    fn from_value(value: &Value) -> NitriteResult<Self::Output> {
        match value {
            Value::Array(arr) => arr.iter().map(T::from_value).collect(),
            _ => Err(mapping_error(value, "an array")),
        }
    }
}

/// Reads `field` from `document` and converts it to `T`.
///
/// Missing fields read as [Value::Null], so `Option` fields map to `None`.
pub fn read_field<T>(document: &Document, field: &str) -> NitriteResult<T::Output>
where
    T: Convertible,
{
    let value = document.get(field)?;
    T::from_value(&value).map_err(|e| {
        NitriteError::new_with_cause(
            &format!("Failed to map field '{}'", field),
            ErrorKind::ObjectMappingError,
            e,
        )
    })
}

pub fn from_value<T>(value: &Value) -> NitriteResult<T::Output>
where
    T: Convertible,
{
    T::from_value(value)
}

pub fn to_value<T>(data: &T) -> NitriteResult<Value>
where
    T: Convertible,
{
    data.to_value()
}
