//! The handle-to-object repository

use crate::error::{Error, Result};
use crate::object::SharedObject;
use ahash::AHashMap;
use chrono::{DateTime, Local};
use std::io::{self, Write};

struct Entry {
    object: SharedObject,
    created: DateTime<Local>,
}

/// Process-wide map from string id to a reference-counted object.
///
/// Constructed explicitly and passed by reference to every operation that
/// needs it; there is no global instance. Single-threaded by design: the
/// host invokes add-in functions one at a time on its own thread.
#[derive(Default)]
pub struct Repository {
    objects: AHashMap<String, Entry>,
}

impl Repository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an object under the given id.
    ///
    /// Storing over an existing id replaces the object; the previous one is
    /// dropped once the last outstanding reference to it goes away.
    pub fn store(&mut self, id: impl Into<String>, object: SharedObject) -> Result<()> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::EmptyId);
        }
        log::debug!("storing object '{}' ({})", id, object.class_name());
        self.objects.insert(
            id,
            Entry {
                object,
                created: Local::now(),
            },
        );
        Ok(())
    }

    /// Retrieve the object stored under the given id
    pub fn retrieve(&self, id: &str) -> Result<SharedObject> {
        self.objects
            .get(id)
            .map(|entry| entry.object.clone())
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Remove the object stored under the given id
    pub fn remove(&mut self, id: &str) -> Result<()> {
        if self.objects.remove(id).is_none() {
            return Err(Error::NotFound(id.to_string()));
        }
        log::debug!("removed object '{}'", id);
        Ok(())
    }

    /// Whether an object is stored under the given id
    pub fn contains(&self, id: &str) -> bool {
        self.objects.contains_key(id)
    }

    /// Creation time of the object stored under the given id
    pub fn created(&self, id: &str) -> Option<DateTime<Local>> {
        self.objects.get(id).map(|entry| entry.created)
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the repository is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All stored ids, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.objects.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Remove every stored object
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Plain-text listing of the repository contents
    pub fn dump(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "objects in repository: {}", self.objects.len())?;
        for id in self.ids() {
            writeln!(out)?;
            self.dump_entry(&id, out)?;
        }
        Ok(())
    }

    /// Plain-text listing of a single object
    pub fn dump_object(&self, id: &str, out: &mut dyn Write) -> io::Result<()> {
        if self.objects.contains_key(id) {
            self.dump_entry(id, out)
        } else {
            writeln!(out, "no object in repository with id = {}", id)
        }
    }

    fn dump_entry(&self, id: &str, out: &mut dyn Write) -> io::Result<()> {
        // dump_entry is only called with ids taken from the map
        let entry = match self.objects.get(id) {
            Some(entry) => entry,
            None => return Ok(()),
        };
        writeln!(
            out,
            "{} - {} - created {}",
            id,
            entry.object.class_name(),
            entry.created.format("%Y-%m-%d %H:%M:%S"),
        )?;
        writeln!(out, "  permanent = {}", entry.object.permanent())?;
        for property in entry.object.properties() {
            writeln!(out, "  {} = {}", property.name, property.value)?;
        }
        Ok(())
    }
}
