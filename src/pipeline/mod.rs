//! Pipeline module - end-to-end assembly

pub mod assemble;
