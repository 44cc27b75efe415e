//! Core types: normalized symbols and ticker maps

pub mod symbol;
pub mod ticker;

pub use symbol::{accept_symbol, normalize_symbol};
pub use ticker::{merge, price_or, RawPrice, TickerMap};
