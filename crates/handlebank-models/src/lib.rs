//! # handlebank-models
//!
//! The quantitative domain objects stored through the handlebank
//! repository: LIBOR market-model forward-correlation structures and
//! historical forward-rate statistics. Every type implements
//! [`handlebank_core::Object`] so worksheet functions can store instances
//! and hand handles back to the host.
//!
//! Construction validates inputs and computes everything up front; stored
//! objects are immutable afterwards.

pub mod correlation;
pub mod error;
pub mod statistics;

pub use correlation::{
    ExponentialForwardCorrelation, LinearExponentialCorrelation,
    TimeHomogeneousForwardCorrelation,
};
pub use error::{ModelError, Result};
pub use statistics::HistoricalRatesAnalysis;
