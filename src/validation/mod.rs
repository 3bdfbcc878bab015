//! Tabular data validation module

pub mod table_shape;

pub use table_shape::{ShapeReport, TableValidator};
