//! Yahoo Finance daily kline provider

mod client;
mod types;

pub use client::*;
pub use types::*;
