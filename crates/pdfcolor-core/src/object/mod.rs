//! Host document object model interface
//!
//! The resolver never owns document objects. It reads them through the
//! [`PdfObject`] trait, which a host document model implements for its own
//! object handle type. Every handle must expose an identity that survives
//! cloning: the resolution cache is keyed on it.
//!
//! [`Object`] is a small in-memory implementation for embedders without a
//! model of their own, and for tests.

mod memory;

pub use memory::{Dictionary, Object, ObjectId, Value};

use std::borrow::Cow;
use std::fmt::Debug;
use std::hash::Hash;

/// Coarse type of a document object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Null,
    Bool,
    Int,
    Real,
    Name,
    String,
    Array,
    Dict,
    Stream,
}

/// Read-only query interface over a host document object
pub trait PdfObject: Clone {
    /// Identity handle, stable across clones of the same object
    type Id: Copy + Eq + Hash + Debug + Send + Sync;

    /// Identity of this object
    fn id(&self) -> Self::Id;

    /// Type of this object
    fn kind(&self) -> ObjectKind;

    /// Name value, without the leading slash
    fn as_name(&self) -> Option<&str>;

    /// Array elements
    fn as_array(&self) -> Option<Vec<Self>>;

    /// Dictionary entry; for streams, an entry of the stream dictionary
    fn get(&self, key: &str) -> Option<Self>;

    /// Decoded stream data
    fn stream_bytes(&self) -> Option<Cow<'_, [u8]>>;

    /// Bytes of a string object
    fn string_bytes(&self) -> Option<Cow<'_, [u8]>>;

    /// Integer value
    fn as_int(&self) -> Option<i64>;

    /// Real value; integers widen
    fn as_real(&self) -> Option<f64> {
        self.as_int().map(|i| i as f64)
    }

    fn is_null(&self) -> bool {
        self.kind() == ObjectKind::Null
    }

    /// Short human-readable rendering used in diagnostics
    fn describe(&self) -> String {
        match self.kind() {
            ObjectKind::Null => "null".to_string(),
            ObjectKind::Name => format!("/{}", self.as_name().unwrap_or_default()),
            ObjectKind::Int => self.as_int().map(|i| i.to_string()).unwrap_or_default(),
            ObjectKind::Real => self.as_real().map(|r| r.to_string()).unwrap_or_default(),
            ObjectKind::Array => {
                let len = self.as_array().map_or(0, |a| a.len());
                format!("[array of {}]", len)
            }
            ObjectKind::Dict => "<<dictionary>>".to_string(),
            ObjectKind::Stream => "<<stream>>".to_string(),
            ObjectKind::String => "(string)".to_string(),
            ObjectKind::Bool => "bool".to_string(),
        }
    }
}

/// Read a fixed number of numbers from an array object
pub(crate) fn number_array<O: PdfObject, const N: usize>(obj: &O) -> Option<[f64; N]> {
    let items = obj.as_array()?;
    if items.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items.iter()) {
        *slot = item.as_real()?;
    }
    Some(out)
}

/// Read a variable-length array of numbers
pub(crate) fn number_vec<O: PdfObject>(obj: &O) -> Option<Vec<f64>> {
    obj.as_array()?.iter().map(|item| item.as_real()).collect()
}
