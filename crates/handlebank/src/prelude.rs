//! Convenient glob import for add-in bindings
//!
//! ```rust
//! use handlebank::prelude::*;
//!
//! let mut host = MockHost::new();
//! let mut repo = XlRepository::new();
//! let ctx = CallContext::command("demo");
//! # let _ = (&mut host, &mut repo, &ctx);
//! ```

pub use handlebank_core::{Object, Property, PropertyValue, Repository, SharedObject};
pub use handlebank_models::{
    ExponentialForwardCorrelation, HistoricalRatesAnalysis, LinearExponentialCorrelation,
    TimeHomogeneousForwardCorrelation,
};
pub use handlebank_xl::{
    handle_stub, CalcHost, CallContext, Caller, CallingRange, CellAddress, CellRange,
    FunctionDef, FunctionKind, FunctionRegistry, MockHost, RangeReference, XlRepository,
};

pub use crate::functions::*;
