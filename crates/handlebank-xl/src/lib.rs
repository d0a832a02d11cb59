//! # handlebank-xl
//!
//! Spreadsheet-range-aware layer over the handlebank object repository.
//!
//! Worksheet formulas that create objects need more than a flat handle map:
//! the repository has to know which cell created each handle so that
//! recalculation overwrites instead of conflicting, so that deleting a cell
//! eventually reclaims its objects, and so that a "show last error" query
//! can find the message a formula raised. This crate provides:
//!
//! - [`RangeReference`] — normalized textual range addresses
//! - [`CalcHost`] — the few defined-name operations needed from the host,
//!   with [`MockHost`] for tests and demos
//! - [`CallContext`] — explicit per-invocation caller information
//! - [`CallingRange`] — one tracked range and its resident handles
//! - [`XlRepository`] — the repository with calling-range garbage
//!   collection and per-cell error correlation
//! - [`FunctionRegistry`] — worksheet-function registration metadata

pub mod calling_range;
pub mod context;
pub mod error;
pub mod host;
pub mod reference;
pub mod registry;
pub mod repository;

pub use calling_range::CallingRange;
pub use context::{CallContext, Caller};
pub use error::{Error, Result};
pub use host::{CalcHost, MockHost};
pub use reference::{CellAddress, CellRange, RangeReference, MAX_COLS, MAX_ROWS};
pub use registry::{FunctionDef, FunctionKind, FunctionRegistry};
pub use repository::{handle_stub, XlRepository};
