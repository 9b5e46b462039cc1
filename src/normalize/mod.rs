//! Raw-table normalization
//!
//! Turns a provider's [`RawFrame`](crate::schema::RawFrame) into canonical
//! [`KlineRecord`](crate::schema::KlineRecord) rows under a declarative
//! per-provider column mapping.

mod mapping;
mod normalizer;

pub use mapping::*;
pub use normalizer::*;
