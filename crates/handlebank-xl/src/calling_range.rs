//! Tracked calling ranges
//!
//! Each worksheet cell that creates objects gets a hidden defined name; the
//! tracker entry for that name records which handle stubs the cell owns and
//! how many times it has recalculated. The ticket from the update counter is
//! appended to handles so each recalculation produces a fresh-looking handle
//! while resolving to the same stub.

use crate::reference::RangeReference;
use std::collections::BTreeSet;
use std::fmt;

/// One tracked spreadsheet range and the handle stubs it owns
#[derive(Debug, Clone)]
pub struct CallingRange {
    key: String,
    reference: RangeReference,
    update_count: u32,
    residents: BTreeSet<String>,
}

impl CallingRange {
    pub fn new(key: impl Into<String>, reference: RangeReference) -> Self {
        Self {
            key: key.into(),
            reference,
            update_count: 0,
            residents: BTreeSet::new(),
        }
    }

    /// The hidden defined-name key identifying this range
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The reference this range was created at
    pub fn reference(&self) -> &RangeReference {
        &self.reference
    }

    /// Number of recalculations observed so far
    pub fn update_count(&self) -> u32 {
        self.update_count
    }

    /// Bump the update counter and return the new ticket
    pub fn next_ticket(&mut self) -> u32 {
        self.update_count += 1;
        self.update_count
    }

    /// Record a handle stub as resident in this range
    pub fn register(&mut self, stub: &str) {
        self.residents.insert(stub.to_string());
    }

    /// Drop a handle stub from this range
    pub fn unregister(&mut self, stub: &str) {
        self.residents.remove(stub);
    }

    /// Whether no handle stubs remain resident
    pub fn is_empty(&self) -> bool {
        self.residents.is_empty()
    }

    pub fn resident_count(&self) -> usize {
        self.residents.len()
    }

    /// The resident stubs, in sorted order
    pub fn residents(&self) -> impl Iterator<Item = &String> {
        self.residents.iter()
    }
}

impl fmt::Display for CallingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - update count {} - residents:",
            self.key, self.reference, self.update_count
        )?;
        if self.residents.is_empty() {
            write!(f, " none")?;
        } else {
            for stub in &self.residents {
                write!(f, " {}", stub)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> CallingRange {
        CallingRange::new(
            "!hb00001",
            RangeReference::parse("SHEET1!B2").unwrap(),
        )
    }

    #[test]
    fn test_register_unregister() {
        let mut cr = range();
        assert!(cr.is_empty());

        cr.register("OBJ1");
        cr.register("OBJ2");
        cr.register("OBJ1"); // idempotent
        assert_eq!(cr.resident_count(), 2);

        cr.unregister("OBJ1");
        assert_eq!(cr.resident_count(), 1);
        cr.unregister("OBJ2");
        assert!(cr.is_empty());
    }

    #[test]
    fn test_tickets_increase() {
        let mut cr = range();
        assert_eq!(cr.next_ticket(), 1);
        assert_eq!(cr.next_ticket(), 2);
        assert_eq!(cr.update_count(), 2);
    }

    #[test]
    fn test_display() {
        let mut cr = range();
        assert_eq!(
            cr.to_string(),
            "!hb00001 - SHEET1!B2 - update count 0 - residents: none"
        );
        cr.register("OBJ1");
        assert!(cr.to_string().ends_with("residents: OBJ1"));
    }
}
