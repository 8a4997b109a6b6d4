//! Domain types and the pure split calculation.

pub mod money;
pub mod ports;
pub mod rule;
pub mod split;
pub mod validation;
