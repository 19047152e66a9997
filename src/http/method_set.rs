//! Compact set of HTTP methods.

use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeSeq};

use super::Method;

/// A set of [`Method`]s stored as a bitmask.
///
/// Iteration and formatting always follow [`Method::ALL`] order regardless of insertion
/// order, so two equal sets render identically.
///
/// # Examples
///
/// ```
/// use routetree::http::{Method, MethodSet};
///
/// let set: MethodSet = [Method::Delete, Method::Get].into_iter().collect();
/// assert!(set.contains(Method::Get));
/// assert!(!set.contains(Method::Post));
/// assert_eq!(set.allow_header(), "GET, DELETE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MethodSet {
    bits: u16,
}

impl MethodSet {
    /// Creates an empty set.
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Adds `method` to the set.
    pub fn insert(&mut self, method: Method) {
        self.bits |= method.bit();
    }

    /// Returns `true` if `method` is in the set.
    pub fn contains(&self, method: Method) -> bool {
        self.bits & method.bit() != 0
    }

    /// Adds every method of `other` to this set.
    pub fn extend_from(&mut self, other: MethodSet) {
        self.bits |= other.bits;
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterates the members in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Method> + '_ {
        Method::ALL.into_iter().filter(|m| self.contains(*m))
    }

    /// Renders the set as the value of an `Allow` response header (RFC 9110 §10.2.1).
    pub fn allow_header(&self) -> String {
        self.to_string()
    }
}

impl FromIterator<Method> for MethodSet {
    fn from_iter<I: IntoIterator<Item = Method>>(iter: I) -> Self {
        let mut set = MethodSet::new();
        for method in iter {
            set.insert(method);
        }
        set
    }
}

impl fmt::Display for MethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, method) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(method.as_str())?;
        }
        Ok(())
    }
}

impl Serialize for MethodSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for method in self.iter() {
            seq.serialize_element(&method)?;
        }
        seq.end()
    }
}
