//! Symbol table: label name → absolute address.

use alloc::collections::btree_map;
use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::error::AsmError;

/// Mapping from label name to resolved absolute address.
///
/// Built by address assignment from a caller-supplied seed plus every
/// labeled instruction in the sequence; read-only while bytes are emitted.
///
/// # Examples
///
/// ```rust
/// use ppc_asm::SymbolTable;
///
/// let mut symbols = SymbolTable::new();
/// symbols.define("OSReport", 0x8000_6000);
/// assert_eq!(symbols.get("OSReport"), Some(0x8000_6000));
/// assert!(symbols.resolve("missing").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SymbolTable {
    entries: BTreeMap<String, u64>,
}

impl SymbolTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `address`, returning the previous binding if any.
    pub fn define(&mut self, name: &str, address: u64) -> Option<u64> {
        self.entries.insert(String::from(name), address)
    }

    /// Look up a label.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<u64> {
        self.entries.get(name).copied()
    }

    /// Look up a label, failing with [`AsmError::UndefinedLabel`].
    ///
    /// # Errors
    ///
    /// Returns [`AsmError::UndefinedLabel`] if `name` is not bound.
    pub fn resolve(&self, name: &str) -> Result<u64, AsmError> {
        self.get(name).ok_or_else(|| AsmError::UndefinedLabel {
            label: String::from(name),
        })
    }

    /// Whether `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Find a label other than `name` bound to `address`.
    pub(crate) fn alias_of(&self, name: &str, address: u64) -> Option<&str> {
        self.entries
            .iter()
            .find(|(other, addr)| **addr == address && other.as_str() != name)
            .map(|(other, _)| other.as_str())
    }

    /// Number of bound labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, address)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries.iter().map(|(name, &addr)| (name.as_str(), addr))
    }
}

impl From<BTreeMap<String, u64>> for SymbolTable {
    fn from(entries: BTreeMap<String, u64>) -> Self {
        Self { entries }
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<S: Into<String>> Extend<(S, u64)> for SymbolTable {
    fn extend<I: IntoIterator<Item = (S, u64)>>(&mut self, iter: I) {
        self.entries
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v)));
    }
}

impl IntoIterator for SymbolTable {
    type Item = (String, u64);
    type IntoIter = btree_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
