//! Visualization module - graph rendering

pub mod plot;
