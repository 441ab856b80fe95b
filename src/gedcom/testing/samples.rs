//! Curated sample files
//!
//! Samples live in `samples/<name>.ged` at the crate root.

use crate::gedcom::config::GedcomConfig;
use crate::gedcom::error::ReadError;
use crate::gedcom::parsing::Parsed;
use crate::gedcom::reader::GedcomReader;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("sample {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Read(#[from] ReadError),
}

pub struct Samples;

impl Samples {
    pub fn path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("samples")
            .join(format!("{name}.ged"))
    }

    /// Raw bytes of a sample.
    pub fn bytes(name: &str) -> Result<Vec<u8>, SampleError> {
        fs::read(Self::path(name)).map_err(|_| SampleError::NotFound(name.to_string()))
    }

    /// Read a sample with the default configuration.
    pub fn parse(name: &str) -> Result<Parsed, SampleError> {
        Self::parse_with(name, GedcomConfig::default())
    }

    pub fn parse_with(name: &str, config: GedcomConfig) -> Result<Parsed, SampleError> {
        let path = Self::path(name);
        if !path.exists() {
            return Err(SampleError::NotFound(name.to_string()));
        }
        Ok(GedcomReader::new(config).read(path)?)
    }
}
