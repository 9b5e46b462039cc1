//! Canonical and raw data types
//!
//! This module defines the canonical daily OHLCV schema used throughout the
//! crate, plus the untyped raw table providers hand to the normalizer.

mod frame;
mod record;

pub use frame::*;
pub use record::*;
