//! Pin Collector: keep track of a personal pin collection.
//!
//! The library holds everything except the egui shell: the data layer
//! (import, normalization, filtering, export), configuration and the
//! per-session state.

pub mod config;
pub mod data;
pub mod state;
