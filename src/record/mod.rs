//! Self-describing output record tree.
//!
//! A motion file is a tree of [`Value`]s rooted at a [`Record`]. Records keep
//! their field order. Numeric arrays are either bare ([`Value::Array`]) or
//! wrapped with context metadata ([`Value::Tagged`]), which carries the dtype
//! and an optional semantic format such as quaternion component order.
//! Non-finite floats are stored as strings so every value reloads bit-exact.

pub mod io;
mod wire;

use std::fmt;

use ndarray::ArrayD;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use io::{load_record, save_record};

/// Element type tag of a stored array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    Float32,
    Float64,
    Int64,
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dtype::Float32 => write!(f, "float32"),
            Dtype::Float64 => write!(f, "float64"),
            Dtype::Int64 => write!(f, "int64"),
        }
    }
}

/// A dynamically shaped numeric array tagged by element type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "wire::NdArrayRepr", try_from = "wire::NdArrayRepr")]
pub enum NdArray {
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
    Int64(ArrayD<i64>),
}

impl NdArray {
    #[must_use]
    pub const fn dtype(&self) -> Dtype {
        match self {
            NdArray::Float32(_) => Dtype::Float32,
            NdArray::Float64(_) => Dtype::Float64,
            NdArray::Int64(_) => Dtype::Int64,
        }
    }

    #[must_use]
    pub fn shape(&self) -> &[usize] {
        match self {
            NdArray::Float32(a) => a.shape(),
            NdArray::Float64(a) => a.shape(),
            NdArray::Int64(a) => a.shape(),
        }
    }

    /// Total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            NdArray::Float32(a) => a.len(),
            NdArray::Float64(a) => a.len(),
            NdArray::Int64(a) => a.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Context metadata attached to a tagged array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub dtype: Dtype,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// An array plus its context, stored as `{arr, context}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedArray {
    pub arr: NdArray,
    pub context: Context,
}

impl TaggedArray {
    /// Wraps an array with a context whose dtype matches the array.
    #[must_use]
    pub fn new(arr: NdArray) -> Self {
        let context = Context {
            dtype: arr.dtype(),
            format: None,
        };
        Self { arr, context }
    }

    /// Attaches a semantic format tag (e.g. `wxyz`).
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.context.format = Some(format.into());
        self
    }
}

/// A node of the record tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Record(Record),
    List(Vec<Value>),
    Tagged(TaggedArray),
    Array(NdArray),
    Str(String),
    Bool(bool),
    Int(i64),
    Float(#[serde(with = "wire::float")] f64),
}

/// A named entry of a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

/// An ordered keyed structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.push(name, value);
        self
    }

    /// Appends a field, replacing an existing one of the same name in place.
    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.value = value;
        } else {
            self.fields.push(Field { name, value });
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

// Records serialize as JSON objects; field order is kept both ways.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(&field.name, &field.value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a keyed record")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
                let mut record = Record::new();
                while let Some((name, value)) = access.next_entry::<String, Value>()? {
                    record.push(name, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}
