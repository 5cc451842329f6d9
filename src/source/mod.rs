//! Data source abstraction layer
//!
//! A source hands out a reader over one city's trip file. Parsing,
//! schema detection and filtering happen in `parser` and `loader`.

pub(crate) mod dir;
pub(crate) mod loader;
pub(crate) mod parser;

use std::io::Read;

use crate::core::City;
use crate::error::AppError;

/// Row provider for city trip data
pub(crate) trait Source: Send + Sync {
    /// Human readable location used in progress and error messages
    fn describe(&self, city: City) -> String;

    /// Open the raw CSV stream for a city
    fn open(&self, city: City) -> Result<Box<dyn Read>, AppError>;
}

pub(crate) use dir::DirSource;
pub(crate) use loader::{load, load_by_name};
