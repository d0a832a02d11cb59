//! # handlebank
//!
//! A handle-based object repository for spreadsheet add-ins.
//!
//! Worksheet functions that build quantitative objects (correlation models,
//! historical rate analyses) cannot return the objects themselves to the
//! host; they return string handles. This crate ties the pieces together:
//!
//! - store an object, get a handle back, resolve the handle later
//! - track which cell created each handle, so recalculation overwrites and
//!   deleting cells eventually reclaims their objects
//! - correlate error messages with the cell that raised them, queryable
//!   with a "show last error" worksheet function
//!
//! ## Example
//!
//! ```rust
//! use handlebank::prelude::*;
//!
//! let mut host = MockHost::new();
//! let mut repo = XlRepository::new();
//!
//! // A formula in SHEET1!B2 creates a correlation model
//! let ctx = CallContext::cell(
//!     "hbLinearExponentialCorrelation",
//!     RangeReference::parse("SHEET1!B2").unwrap(),
//! );
//! let handle = hb_linear_exponential_correlation(
//!     &mut repo, &mut host, &ctx, "CORR", 10, 0.5, 0.2, 3, false,
//! )
//! .unwrap();
//!
//! // The handle resolves to the stored object
//! let object = repo.retrieve(&handle).unwrap();
//! assert_eq!(object.class_name(), "LinearExponentialCorrelation");
//! ```

pub mod functions;
pub mod prelude;

pub use functions::builtin_functions;

// Re-export the repository layers
pub use handlebank_core::{Error as CoreError, Object, Property, PropertyValue, SharedObject};
pub use handlebank_xl::{
    handle_stub, CalcHost, CallContext, Caller, CellAddress, CellRange, Error, FunctionDef,
    FunctionKind, FunctionRegistry, MockHost, RangeReference, Result, XlRepository,
};

// Re-export the wrapped domain objects
pub use handlebank_models::{
    ExponentialForwardCorrelation, HistoricalRatesAnalysis, LinearExponentialCorrelation,
    ModelError, TimeHomogeneousForwardCorrelation,
};
