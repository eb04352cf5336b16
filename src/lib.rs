// Data Sweeper
// Author: Gabriel Demetrios Lafis

//! # Data Sweeper
//!
//! A browser-facing tool that ingests a CSV or Excel file, lets the user
//! pick columns, clean the table, explore it and download the result.
//!
//! ## Features
//!
//! - CSV and xlsx ingestion with column type inference
//! - Column projection and in-place cleaning (duplicate removal, mean fill)
//! - Summary statistics, correlation heatmap and per-column histograms
//! - CSV and Excel export
//! - HTTP API with an embedded single-page UI
//!
//! ## Example
//!
//! ```rust
//! use data_sweeper::{
//!     data::{export, FileFormat},
//!     processing::CleaningOperation,
//!     Session,
//! };
//!
//! let bytes = b"id,score\n1,10\n2,\n2,\n";
//! let mut session = Session::from_upload("scores.csv", bytes).unwrap();
//!
//! session.apply(CleaningOperation::RemoveDuplicates).unwrap();
//! session.apply(CleaningOperation::FillMissingMean).unwrap();
//! assert_eq!(session.table().len(), 2);
//!
//! let buffer = export(session.table(), FileFormat::Csv).unwrap();
//! assert_eq!(buffer.file_name(), "processed_data.csv");
//! ```

pub mod api;
pub mod data;
pub mod processing;
pub mod render;
pub mod session;
pub mod storage;
pub mod utils;

// Re-export main types
pub use api::Server;
pub use data::{DataSet, DataType, Field, FileFormat, Row, Schema, Value};
pub use session::Session;
pub use storage::{ExpiringStorage, MemoryStorage, SessionStorage};
pub use utils::Config;
