//! # handlebank-core
//!
//! Generic object repository for spreadsheet add-ins.
//!
//! A [`Repository`] maps string handles to reference-counted opaque objects.
//! Add-in functions store an object under a caller-chosen id and hand the
//! resulting handle back to the host application as a cell value; later calls
//! resolve the handle to the live object. The spreadsheet-aware layer
//! (handlebank-xl) builds calling-range tracking and garbage collection on
//! top of this crate.
//!
//! ## Example
//!
//! ```rust
//! use handlebank_core::{Object, Repository};
//! use std::sync::Arc;
//!
//! struct Curve(f64);
//!
//! impl Object for Curve {
//!     fn class_name(&self) -> &'static str {
//!         "Curve"
//!     }
//! }
//!
//! let mut repo = Repository::new();
//! repo.store("CURVE1", Arc::new(Curve(0.05))).unwrap();
//! let object = repo.retrieve("CURVE1").unwrap();
//! assert_eq!(object.class_name(), "Curve");
//! ```

pub mod error;
pub mod object;
pub mod repository;

pub use error::{Error, Result};
pub use object::{Object, Property, PropertyValue, SharedObject};
pub use repository::Repository;
