//! In-memory object graph
//!
//! Each constructed [`Object`] receives a process-unique [`ObjectId`].
//! Clones share the id, so a descriptor stored in two places of a graph is
//! one object for caching purposes, while two structurally equal objects
//! built separately are distinct.

use super::{ObjectKind, PdfObject};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an in-memory object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

/// Dictionary payload keyed by name (without the leading slash)
pub type Dictionary = BTreeMap<String, Object>;

/// Object payload
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    Name(String),
    String(Vec<u8>),
    Array(Vec<Object>),
    Dict(Dictionary),
    Stream { dict: Dictionary, data: Vec<u8> },
}

/// Shared handle to an in-memory document object
#[derive(Clone)]
pub struct Object {
    id: ObjectId,
    value: Arc<Value>,
}

impl Object {
    /// Wrap a value as a new object with a fresh identity
    pub fn new(value: Value) -> Self {
        Self {
            id: ObjectId(NEXT_ID.fetch_add(1, Ordering::Relaxed)),
            value: Arc::new(value),
        }
    }

    pub fn null() -> Self {
        Self::new(Value::Null)
    }

    pub fn int(value: i64) -> Self {
        Self::new(Value::Int(value))
    }

    pub fn real(value: f64) -> Self {
        Self::new(Value::Real(value))
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::new(Value::Name(name.into()))
    }

    pub fn string(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(Value::String(bytes.into()))
    }

    pub fn array(items: Vec<Object>) -> Self {
        Self::new(Value::Array(items))
    }

    /// Build a dictionary from `(key, value)` pairs
    pub fn dict<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Object)>,
    {
        Self::new(Value::Dict(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Build a stream from dictionary entries and already-decoded data
    pub fn stream<K, I>(entries: I, data: impl Into<Vec<u8>>) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Object)>,
    {
        Self::new(Value::Stream {
            dict: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            data: data.into(),
        })
    }

    /// Array of reals, convenient for white points and ranges
    pub fn reals(values: &[f64]) -> Self {
        Self::array(values.iter().map(|&v| Self::real(v)).collect())
    }

    /// Array of names
    pub fn names(names: &[&str]) -> Self {
        Self::array(names.iter().map(|&n| Self::name(n)).collect())
    }

    /// Payload of this object
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {:?}", self.id.0, self.value)
    }
}

impl PdfObject for Object {
    type Id = ObjectId;

    fn id(&self) -> ObjectId {
        self.id
    }

    fn kind(&self) -> ObjectKind {
        match self.value.as_ref() {
            Value::Null => ObjectKind::Null,
            Value::Bool(_) => ObjectKind::Bool,
            Value::Int(_) => ObjectKind::Int,
            Value::Real(_) => ObjectKind::Real,
            Value::Name(_) => ObjectKind::Name,
            Value::String(_) => ObjectKind::String,
            Value::Array(_) => ObjectKind::Array,
            Value::Dict(_) => ObjectKind::Dict,
            Value::Stream { .. } => ObjectKind::Stream,
        }
    }

    fn as_name(&self) -> Option<&str> {
        match self.value.as_ref() {
            Value::Name(name) => Some(name),
            _ => None,
        }
    }

    fn as_array(&self) -> Option<Vec<Self>> {
        match self.value.as_ref() {
            Value::Array(items) => Some(items.clone()),
            _ => None,
        }
    }

    fn get(&self, key: &str) -> Option<Self> {
        match self.value.as_ref() {
            Value::Dict(dict) | Value::Stream { dict, .. } => dict.get(key).cloned(),
            _ => None,
        }
    }

    fn stream_bytes(&self) -> Option<Cow<'_, [u8]>> {
        match self.value.as_ref() {
            Value::Stream { data, .. } => Some(Cow::Borrowed(data)),
            _ => None,
        }
    }

    fn string_bytes(&self) -> Option<Cow<'_, [u8]>> {
        match self.value.as_ref() {
            Value::String(bytes) => Some(Cow::Borrowed(bytes)),
            _ => None,
        }
    }

    fn as_int(&self) -> Option<i64> {
        match self.value.as_ref() {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    fn as_real(&self) -> Option<f64> {
        match self.value.as_ref() {
            Value::Int(i) => Some(*i as f64),
            Value::Real(r) => Some(*r),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_keeps_identity() {
        let a = Object::names(&["Indexed"]);
        let b = a.clone();
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_equal_structure_distinct_identity() {
        let a = Object::name("DeviceRGB");
        let b = Object::name("DeviceRGB");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_stream_dictionary_lookup() {
        let stream = Object::stream([("N", Object::int(3))], vec![1, 2, 3]);
        assert_eq!(stream.kind(), ObjectKind::Stream);
        assert_eq!(stream.get("N").and_then(|n| n.as_int()), Some(3));
        assert_eq!(stream.stream_bytes().as_deref(), Some(&[1u8, 2, 3][..]));
        assert!(stream.get("Alternate").is_none());
    }

    #[test]
    fn test_real_widening() {
        assert_eq!(Object::int(2).as_real(), Some(2.0));
        assert_eq!(Object::real(0.5).as_int(), None);
    }
}
