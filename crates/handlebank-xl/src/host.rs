//! Abstraction over the host application's defined-name facilities
//!
//! The repository never talks to a spreadsheet application directly; the few
//! host operations it needs (resolving and maintaining defined names) go
//! through [`CalcHost`]. Production bindings implement the trait against the
//! real host API; tests and demos use [`MockHost`].

use crate::reference::RangeReference;
use std::collections::BTreeMap;

/// The defined-name operations the calling-range tracker needs from the host
pub trait CalcHost {
    /// The defined name attached to exactly this reference, if any
    fn name_of(&self, reference: &RangeReference) -> Option<String>;

    /// Resolve a defined name to the range it currently refers to.
    /// Returns `None` when the name does not exist or no longer refers to a
    /// live range (the cell was deleted).
    fn resolve_name(&self, name: &str) -> Option<RangeReference>;

    /// Attach a (hidden) defined name to a reference
    fn define_name(&mut self, name: &str, reference: &RangeReference);

    /// Remove a defined name
    fn delete_name(&mut self, name: &str);
}

/// In-memory stand-in for a workbook's defined-name table.
///
/// Deleting cells does not remove the names attached to them; like a real
/// workbook's `#REF!` names they linger, defined but no longer resolving,
/// until something deletes them explicitly.
#[derive(Debug, Default)]
pub struct MockHost {
    names: BTreeMap<String, Option<RangeReference>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate deleting the cells a name refers to: every name pointing at
    /// a reference contained in `reference` stops resolving but stays
    /// defined.
    pub fn delete_cells(&mut self, reference: &RangeReference) {
        for target in self.names.values_mut() {
            if matches!(target, Some(r) if reference.contains(r)) {
                *target = None;
            }
        }
    }

    /// Number of defined names, dangling ones included
    pub fn name_count(&self) -> usize {
        self.names.len()
    }
}

impl CalcHost for MockHost {
    fn name_of(&self, reference: &RangeReference) -> Option<String> {
        self.names
            .iter()
            .find(|(_, target)| target.as_ref() == Some(reference))
            .map(|(name, _)| name.clone())
    }

    fn resolve_name(&self, name: &str) -> Option<RangeReference> {
        self.names.get(name).and_then(|target| target.clone())
    }

    fn define_name(&mut self, name: &str, reference: &RangeReference) {
        self.names.insert(name.to_string(), Some(reference.clone()));
    }

    fn delete_name(&mut self, name: &str) {
        self.names.remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_host_define_and_resolve() {
        let mut host = MockHost::new();
        let reference = RangeReference::parse("SHEET1!B2").unwrap();

        assert!(host.name_of(&reference).is_none());
        host.define_name("!hb00001", &reference);

        assert_eq!(host.name_of(&reference).as_deref(), Some("!hb00001"));
        assert_eq!(host.resolve_name("!hb00001"), Some(reference.clone()));

        host.delete_name("!hb00001");
        assert!(host.resolve_name("!hb00001").is_none());
    }

    #[test]
    fn test_mock_host_delete_cells_leaves_dangling_names() {
        let mut host = MockHost::new();
        let b2 = RangeReference::parse("SHEET1!B2").unwrap();
        let e5 = RangeReference::parse("SHEET1!E5").unwrap();
        host.define_name("!hb00001", &b2);
        host.define_name("!hb00002", &e5);

        host.delete_cells(&RangeReference::parse("SHEET1!A1:C3").unwrap());

        // The name over the deleted cells stops resolving but stays defined
        assert!(host.resolve_name("!hb00001").is_none());
        assert!(host.name_of(&b2).is_none());
        assert!(host.resolve_name("!hb00002").is_some());
        assert_eq!(host.name_count(), 2);

        host.delete_name("!hb00001");
        assert_eq!(host.name_count(), 1);
    }
}
