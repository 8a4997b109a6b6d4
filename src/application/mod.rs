//! Application layer orchestrating the rule store and the split engine.
//!
//! This module defines the `SplitSimulator`, the entry point a presentation
//! layer calls whenever the deposit amount or a rule changes.

pub mod simulator;
