//! The spreadsheet-range-aware object repository

use crate::calling_range::CallingRange;
use crate::context::CallContext;
use crate::error::{Error, Result};
use crate::host::CalcHost;
use crate::reference::RangeReference;
use ahash::AHashMap;
use handlebank_core::{Repository, SharedObject};
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Split a full handle back into its stub, dropping any `#ticket` suffix
pub fn handle_stub(handle: &str) -> &str {
    match handle.find('#') {
        Some(pos) => &handle[..pos],
        None => handle,
    }
}

/// Who created a stored object. Objects made outside any cell are plain;
/// objects made by a worksheet formula are owned by a calling range.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Ownership {
    /// Created from a command, menu action or other non-cell context
    Tool,
    /// Created by a formula in a tracked calling range
    Cell {
        range_key: String,
        address: RangeReference,
    },
}

impl Ownership {
    fn caller_key(&self) -> &str {
        match self {
            Ownership::Tool => "tool",
            Ownership::Cell { range_key, .. } => range_key,
        }
    }

    fn location(&self) -> String {
        match self {
            Ownership::Tool => "(non-cell context)".to_string(),
            Ownership::Cell { address, .. } => address.to_string(),
        }
    }
}

struct ErrorEntry {
    reference: RangeReference,
    message: String,
}

/// Object repository extended with calling-range tracking and per-cell
/// error-message correlation.
///
/// Owns a plain [`Repository`] for the objects themselves plus, per handle
/// stub, a record of the calling range that created it. Constructed
/// explicitly and passed by reference; all host interaction goes through a
/// [`CalcHost`].
#[derive(Default)]
pub struct XlRepository {
    objects: Repository,
    owners: AHashMap<String, Ownership>,
    ranges: BTreeMap<String, CallingRange>,
    range_serial: u32,
    errors: BTreeMap<String, ErrorEntry>,
}

impl XlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an object under the given id and return the full handle.
    ///
    /// For cell calls the handle carries a `#ticket` suffix taken from the
    /// calling range's update counter, and the stub is registered as
    /// resident in that range. Re-storing a stub from a different calling
    /// range than the one that created it is a contract violation and fails
    /// with [`Error::HandleConflict`] naming both cell locations.
    pub fn store(
        &mut self,
        host: &mut dyn CalcHost,
        ctx: &CallContext,
        id: &str,
        object: SharedObject,
    ) -> Result<String> {
        let ownership = match ctx.cell_reference() {
            Some(reference) => {
                let range_key = self.resolve_calling_range(host, reference)?;
                Ownership::Cell {
                    range_key,
                    address: reference.clone(),
                }
            }
            None => Ownership::Tool,
        };

        if let Some(existing) = self.owners.get(id) {
            if existing.caller_key() != ownership.caller_key() {
                return Err(Error::HandleConflict {
                    id: id.to_string(),
                    new_caller: ownership.location(),
                    old_caller: existing.location(),
                });
            }
        }

        self.objects.store(id, object)?;

        let handle = match &ownership {
            Ownership::Cell { range_key, .. } => {
                // The range was resolved or fabricated just above
                match self.ranges.get_mut(range_key) {
                    Some(range) => {
                        range.register(id);
                        format!("{}#{:04x}", id, range.next_ticket())
                    }
                    None => id.to_string(),
                }
            }
            Ownership::Tool => id.to_string(),
        };
        self.owners.insert(id.to_string(), ownership);

        Ok(handle)
    }

    /// Retrieve an object by handle or stub
    pub fn retrieve(&self, id: &str) -> Result<SharedObject> {
        Ok(self.objects.retrieve(handle_stub(id))?)
    }

    /// Delete an object by handle or stub, unregistering it from the
    /// calling range that owns it
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let stub = handle_stub(id);
        self.objects.remove(stub)?;
        if let Some(Ownership::Cell { range_key, .. }) = self.owners.remove(stub) {
            if let Some(range) = self.ranges.get_mut(&range_key) {
                range.unregister(stub);
            }
        }
        Ok(())
    }

    /// Whether an object is stored under the given handle or stub
    pub fn contains(&self, id: &str) -> bool {
        self.objects.contains(handle_stub(id))
    }

    /// Number of stored objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// All stored stubs, sorted
    pub fn ids(&self) -> Vec<String> {
        self.objects.ids()
    }

    /// Number of tracked calling ranges
    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    /// Scan tracked ranges and reclaim those whose defined name no longer
    /// resolves. Resident objects of an invalid range are deleted, except
    /// permanent ones unless `delete_permanent` is set. A range record is
    /// dropped only once it is both invalid and empty, and dropping it also
    /// deletes the dangling hidden name from the host. Returns the number
    /// of range records dropped.
    pub fn collect_garbage(&mut self, host: &mut dyn CalcHost, delete_permanent: bool) -> usize {
        let keys: Vec<String> = self.ranges.keys().cloned().collect();
        let mut dropped = 0;

        for key in keys {
            if host.resolve_name(&key).is_some() {
                continue;
            }

            let residents: Vec<String> = match self.ranges.get(&key) {
                Some(range) => range.residents().cloned().collect(),
                None => continue,
            };
            for stub in residents {
                let permanent = self
                    .objects
                    .retrieve(&stub)
                    .map(|object| object.permanent())
                    .unwrap_or(false);
                if permanent && !delete_permanent {
                    continue;
                }
                let _ = self.objects.remove(&stub);
                self.owners.remove(&stub);
                if let Some(range) = self.ranges.get_mut(&key) {
                    range.unregister(&stub);
                }
            }

            if self.ranges.get(&key).map_or(false, |r| r.is_empty()) {
                log::debug!("dropping invalid calling range '{}'", key);
                // The dangling hidden name goes with the record; hosts keep
                // #REF! names around after cell deletion
                host.delete_name(&key);
                self.ranges.remove(&key);
                dropped += 1;
            }
        }

        dropped
    }

    /// Record an error raised by a cell-context operation against the
    /// caller's normalized reference, and emit it through the log facade.
    ///
    /// With `append` set, an existing message for the cell is extended
    /// instead of overwritten.
    pub fn log_error(&mut self, ctx: &CallContext, message: &str, append: bool) {
        match ctx.cell_reference() {
            Some(reference) => {
                let key = reference.key();
                let cell_message = format!("{} - {}", ctx.function(), message);
                log::error!("{} - {}", key, cell_message);

                match self.errors.get_mut(&key) {
                    Some(entry) if append => {
                        entry.message.push_str("; ");
                        entry.message.push_str(&cell_message);
                    }
                    Some(entry) => entry.message = cell_message,
                    None => {
                        self.errors.insert(
                            key,
                            ErrorEntry {
                                reference: reference.clone(),
                                message: cell_message,
                            },
                        );
                    }
                }
            }
            None => log::error!("{} - {}", ctx.function(), message),
        }
    }

    /// Look up the most recent error message for a range.
    ///
    /// Exact match on the normalized reference first, else a linear scan for
    /// a stored range containing the query. Empty string when nothing
    /// matches; [`Error::InvalidRangeReference`] when the query does not
    /// parse as a reference.
    pub fn retrieve_error(&self, text: &str) -> Result<String> {
        let query = RangeReference::parse(text)
            .map_err(|_| Error::InvalidRangeReference(text.to_string()))?;

        if let Some(entry) = self.errors.get(&query.key()) {
            return Ok(entry.message.clone());
        }

        for entry in self.errors.values() {
            if entry.reference.contains(&query) {
                return Ok(entry.message.clone());
            }
        }

        Ok(String::new())
    }

    /// Remove any recorded error for the calling cell
    pub fn clear_error(&mut self, ctx: &CallContext) {
        if let Some(reference) = ctx.cell_reference() {
            self.errors.remove(&reference.key());
        }
    }

    /// Number of cells with a recorded error message
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Plain-text listing of repository contents and tracked ranges
    pub fn dump(&self, out: &mut dyn Write) -> io::Result<()> {
        self.objects.dump(out)?;

        writeln!(out)?;
        write!(out, "calling ranges:")?;
        if self.ranges.is_empty() {
            writeln!(out, " none.")?;
        } else {
            writeln!(out)?;
            for range in self.ranges.values() {
                writeln!(out, "{}", range)?;
            }
        }
        Ok(())
    }

    /// Plain-text listing of a single object
    pub fn dump_object(&self, id: &str, out: &mut dyn Write) -> io::Result<()> {
        self.objects.dump_object(handle_stub(id), out)
    }

    /// Find the calling range the caller's reference belongs to, or
    /// fabricate one: generate a key, attach it to the cell as a defined
    /// name through the host, and start tracking it.
    fn resolve_calling_range(
        &mut self,
        host: &mut dyn CalcHost,
        reference: &RangeReference,
    ) -> Result<String> {
        if let Some(name) = host.name_of(reference) {
            if self.ranges.contains_key(&name) {
                return Ok(name);
            }
            return Err(Error::NameNotFound(name));
        }

        self.range_serial += 1;
        let key = format!("!hb{:05x}", self.range_serial);
        host.define_name(&key, reference);
        self.ranges
            .insert(key.clone(), CallingRange::new(&key, reference.clone()));
        Ok(key)
    }
}
