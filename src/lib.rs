pub mod core;
pub mod enrichment;
pub mod gui;
pub mod persistence;
