//! Directory-backed source: one CSV file per city

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use crate::core::City;
use crate::error::AppError;
use crate::source::Source;

/// Fixed city to file mapping
pub(crate) fn city_file(city: City) -> &'static str {
    match city {
        City::Chicago => "chicago.csv",
        City::NewYorkCity => "new_york_city.csv",
        City::Washington => "washington.csv",
    }
}

/// Reads `<data_dir>/<city file>`
#[derive(Debug, Clone)]
pub(crate) struct DirSource {
    data_dir: PathBuf,
}

impl DirSource {
    pub(crate) fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub(crate) fn path_for(&self, city: City) -> PathBuf {
        self.data_dir.join(city_file(city))
    }
}

impl Source for DirSource {
    fn describe(&self, city: City) -> String {
        self.path_for(city).display().to_string()
    }

    fn open(&self, city: City) -> Result<Box<dyn Read>, AppError> {
        let path = self.path_for(city);
        let file = File::open(&path)
            .map_err(|source| AppError::DataSourceUnavailable { path, source })?;
        Ok(Box::new(BufReader::new(file)))
    }
}
