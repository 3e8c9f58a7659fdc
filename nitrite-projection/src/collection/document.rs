use im::OrdMap;
use smallvec::SmallVec;

use crate::collection::nitrite_id::NitriteId;
use crate::common::{ReadExecutor, Value, DOC_ID, RESERVED_FIELDS};
use crate::errors::{ErrorKind, NitriteError, NitriteResult};
use crate::FIELD_SEPARATOR;
use itertools::Itertools;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};

type FieldVec = SmallVec<[String; 8]>;

/// A schema-less record: string keys mapped to [Value]s.
///
/// Documents are what a record source yields and what a
/// [`crate::common::NitriteMapper`] consumes. Nested documents are addressed
/// with the field separator (default: `.`), so for `{"a": {"b": 1}}` the inner
/// value is reachable as `document.get("a.b")`.
///
/// Below fields are reserved and are never part of a domain object's shape.
///
/// * `_id` - The store identity of the document, always a [NitriteId].
/// * `_revision` - The revision number of the document.
/// * `_source` - The source of the document.
/// * `_modified` - The last modified time of the document.
///
/// ## Persistent Map
///
/// The fields live in an `im::OrdMap`. Cloning is O(1) and shares structure
/// with the original; every mutation builds a new map, so removing a field
/// from a clone never changes the document it was cloned from.
#[derive(Clone, Eq, PartialEq, Hash, Default, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Document {
    data: OrdMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: OrdMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Associates the specified [Value] with the specified key in this document.
    ///
    /// Embedded keys such as `"user.address.city"` create the intermediate
    /// documents as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The key is empty
    /// * The key is `_id` and the value is not a [NitriteId]
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nitrite_projection::collection::Document;
    /// use nitrite_projection::common::Value;
    ///
    /// let mut doc = Document::new();
    /// doc.put("user.name", "Alice").unwrap();
    /// assert_eq!(doc.get("user.name").unwrap(), Value::from("Alice"));
    /// assert!(doc.put("_id", 10).is_err());
    /// ```
    pub fn put<'a, T: Into<Value>>(&mut self, key: impl Into<Cow<'a, str>>, value: T) -> NitriteResult<()> {
        let key = key.into();
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(NitriteError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        let value = value.into();

        // the _id field is owned by the store
        if key == DOC_ID && !value.is_nitrite_id() {
            log::error!("Document id is an auto generated field and cannot be set manually");
            return Err(NitriteError::new(
                "Document id is an auto generated field and cannot be set manually",
                ErrorKind::InvalidOperation,
            ));
        }

        if self.is_embedded(&key) {
            let splits: Vec<&str> = FIELD_SEPARATOR.read_with(|it| key.split(it.as_str()).collect());
            self.deep_put(&splits, value)
        } else {
            self.data = self.data.update(key.to_string(), value);
            Ok(())
        }
    }

    /// Returns the [Value] for the key, or [Value::Null] if there is none.
    ///
    /// Embedded keys walk nested documents; a numeric segment indexes into an
    /// array, and a non-numeric segment applied to an array collects the
    /// matching values of every element.
    pub fn get(&self, key: &str) -> NitriteResult<Value> {
        match self.data.get(key) {
            Some(value) => Ok(value.clone()),
            None => {
                if self.is_embedded(key) {
                    self.get_by_embedded_key(key)
                } else {
                    Ok(Value::Null)
                }
            }
        }
    }

    /// Returns the [NitriteId] of this document, generating and storing one if
    /// the document has none yet.
    pub fn id(&mut self) -> NitriteResult<NitriteId> {
        if let Some(Value::NitriteId(id)) = self.data.get(DOC_ID) {
            Ok(*id)
        } else {
            let nitrite_id = NitriteId::new();
            self.data = self.data.update(DOC_ID.to_string(), Value::NitriteId(nitrite_id));
            Ok(nitrite_id)
        }
    }

    pub fn has_id(&self) -> bool {
        self.data.contains_key(DOC_ID)
    }

    /// Retrieves all field paths of this document, embedded ones joined with
    /// the field separator. Reserved fields are excluded.
    pub fn fields(&self) -> FieldVec {
        self.get_fields_internal("")
    }

    /// Removes the key and its value from the document.
    ///
    /// Removing a key that does not exist succeeds.
    pub fn remove(&mut self, key: &str) -> NitriteResult<()> {
        if self.is_embedded(key) {
            let splits: Vec<&str> = FIELD_SEPARATOR.read_with(|it| key.split(it.as_str()).collect());
            self.deep_remove(&splits)
        } else {
            self.data = self.data.without(key);
            Ok(())
        }
    }

    /// Removes a top-level entry by its literal key. The key is never split
    /// on the field separator.
    pub(crate) fn remove_key(&mut self, key: &str) {
        self.data = self.data.without(key);
    }

    /// Returns the number of top-level entries.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Checks for a top-level key or an embedded field path.
    pub fn contains_field(&self, field: &str) -> bool {
        self.contains_key(field) || self.fields().iter().any(|f| f == field)
    }

    pub fn to_map(&self) -> BTreeMap<String, Value> {
        self.data.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    pub(crate) fn to_pretty_json(&self, indent: usize) -> String {
        if self.data.is_empty() {
            return "{}".to_string();
        }

        let indent_str = " ".repeat(indent + 2);
        let body = self
            .data
            .iter()
            .map(|(key, value)| format!("{}\"{}\": {}", indent_str, key, value.to_pretty_json(indent + 2)))
            .join(",\n");
        format!("{{\n{}\n{}}}", body, " ".repeat(indent))
    }

    fn is_embedded(&self, key: &str) -> bool {
        FIELD_SEPARATOR.read_with(|it| key.contains(it.as_str()))
    }

    fn get_fields_internal(&self, prefix: &str) -> FieldVec {
        let mut fields = FieldVec::new();
        let separator = FIELD_SEPARATOR.read_with(|s| s.clone());

        for (key, value) in self.data.iter() {
            if key.is_empty() || RESERVED_FIELDS.contains(&key.as_str()) {
                continue;
            }

            let field = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}{}{}", prefix, separator, key)
            };

            if let Value::Document(doc) = value {
                fields.append(&mut doc.get_fields_internal(&field));
            } else {
                fields.push(field);
            }
        }
        fields
    }

    fn deep_put(&mut self, splits: &[&str], value: Value) -> NitriteResult<()> {
        let (key, remaining) = match splits.split_first() {
            Some((key, remaining)) if !key.is_empty() => (*key, remaining),
            _ => {
                log::error!("Invalid embedded key {:?}", splits);
                return Err(NitriteError::new(
                    "Document does not support empty key",
                    ErrorKind::InvalidFieldName,
                ));
            }
        };

        if remaining.is_empty() {
            self.data = self.data.update(key.to_string(), value);
            return Ok(());
        }

        let mut nested = match self.data.get(key) {
            Some(Value::Document(obj)) => obj.clone(),
            _ => Document::new(),
        };
        nested.deep_put(remaining, value)?;
        self.data = self.data.update(key.to_string(), Value::Document(nested));
        Ok(())
    }

    fn deep_remove(&mut self, splits: &[&str]) -> NitriteResult<()> {
        let (key, remaining) = match splits.split_first() {
            Some((key, remaining)) if !key.is_empty() => (*key, remaining),
            _ => {
                log::error!("Invalid embedded key {:?}", splits);
                return Err(NitriteError::new(
                    "Document does not support empty key",
                    ErrorKind::InvalidFieldName,
                ));
            }
        };

        if remaining.is_empty() {
            self.data = self.data.without(key);
            return Ok(());
        }

        if let Some(Value::Document(obj)) = self.data.get(key) {
            let mut nested = obj.clone();
            nested.deep_remove(remaining)?;
            if nested.is_empty() {
                // drop the emptied parent as well
                self.data = self.data.without(key);
            } else {
                self.data = self.data.update(key.to_string(), Value::Document(nested));
            }
        }
        Ok(())
    }

    fn get_by_embedded_key(&self, key: &str) -> NitriteResult<Value> {
        let separator = FIELD_SEPARATOR.read_with(|s| s.clone());
        let splits: Vec<&str> = key.split(separator.as_str()).collect();

        match splits.split_first() {
            Some((first, remaining)) if !first.is_empty() => {
                self.recursive_get(self.data.get(*first), remaining)
            }
            _ => {
                log::error!("Invalid embedded key {}", key);
                Err(NitriteError::new(
                    "Document does not support empty key",
                    ErrorKind::InvalidFieldName,
                ))
            }
        }
    }

    fn recursive_get(&self, value: Option<&Value>, splits: &[&str]) -> NitriteResult<Value> {
        let value = match value {
            None => return Ok(Value::Null),
            Some(v) => v,
        };

        let (key, remaining) = match splits.split_first() {
            None => return Ok(value.clone()),
            Some((key, remaining)) => (*key, remaining),
        };

        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(NitriteError::new(
                "Document does not support empty key",
                ErrorKind::InvalidFieldName,
            ));
        }

        match value {
            Value::Document(obj) => self.recursive_get(obj.data.get(key), remaining),
            Value::Array(arr) => match key.parse::<isize>() {
                Ok(index) if index < 0 || index as usize >= arr.len() => {
                    log::error!("Array index {} out of bound", index);
                    Err(NitriteError::new(
                        &format!("Array index {} out of bound", index),
                        ErrorKind::ValidationError,
                    ))
                }
                Ok(index) => self.recursive_get(arr.get(index as usize), remaining),
                // not an index, collect the field from every element
                Err(_) => self.decompose(arr, splits),
            },
            _ => Ok(Value::Null),
        }
    }

    fn decompose(&self, arr: &[Value], splits: &[&str]) -> NitriteResult<Value> {
        let mut items: Vec<Value> = Vec::with_capacity(arr.len());
        for item in arr {
            match self.recursive_get(Some(item), splits)? {
                Value::Array(values) => items.extend(values),
                value => items.push(value),
            }
        }
        Ok(Value::Array(items.into_iter().unique().collect()))
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.data.iter()).finish()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_pretty_json(0))
    }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Document {
            data: iter.into_iter().collect(),
        }
    }
}

pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a Document with JSON-like syntax.
///
/// # Examples
///
/// ```rust
/// use nitrite_projection::doc;
///
/// let empty = doc!{};
/// assert!(empty.is_empty());
///
/// let base = 100;
/// let person = doc!{
///     name: "Bob",
///     score: (base * 2),
///     address: {
///         city: "Paris",
///         tags: ["home", "work"]
///     }
/// };
/// assert_eq!(person.size(), 3);
/// ```
#[macro_export]
macro_rules! doc {
    ({}) => {
        $crate::collection::Document::new()
    };

    () => {
        $crate::collection::Document::new()
    };

    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    ($($key:tt : $value:tt),* $(,)?) => {
        {
            let mut doc = $crate::collection::Document::new();
            $(
                doc.put(&$crate::collection::normalize(stringify!($key)), $crate::doc_value!($value))
                .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the doc! macro.
#[macro_export]
macro_rules! doc_value {
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
