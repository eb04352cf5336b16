// Processing module for projection, cleaning and exploration
// Author: Gabriel Demetrios Lafis

mod clean;
mod correlation;
mod histogram;
mod stats;
mod transform;

pub use clean::*;
pub use correlation::*;
pub use histogram::*;
pub use stats::*;
pub use transform::*;

use thiserror::Error;

use crate::data::{DataError, DataSet};

/// Represents a data processor that derives a new dataset
pub trait DataProcessor {
    /// Process a dataset and return a new dataset
    fn process(&self, input: &DataSet) -> Result<DataSet, ProcessingError>;

    /// Get the processor name
    fn name(&self) -> &str;
}

/// Represents a data processor that transforms data in place
pub trait InPlaceDataProcessor {
    /// Process a dataset in place, returning how many rows or cells changed
    fn process_in_place(&self, input: &mut DataSet) -> Result<usize, ProcessingError>;

    /// Get the processor name
    fn name(&self) -> &str;
}

/// Represents an error in the processing module
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Render error: {0}")]
    Render(String),
}
