//! JSON/CSV conversion module
//!
//! This module contains the conversion dispatch, configuration, limits and statistics.

pub mod batch;
pub mod config;
pub mod engine;
pub mod limits;
pub mod stats;

pub use config::{parse_delimiter, ConversionConfig, DataFormat};

pub use engine::{
    convert_file, convert_source, convert_string, ConversionEngine, ConversionMetadata,
    ConvertedData,
};

pub use crate::error::ConversionResult;
