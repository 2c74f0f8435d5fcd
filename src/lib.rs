//! Gridsheet - flatten gridded NetCDF reanalysis files into spreadsheets.
//!
//! Gridsheet reads time × latitude × longitude grids (ERA5 single-level and
//! wave products, for instance), writes one spreadsheet row per grid cell and
//! time step, and bundles a batch of outputs into a single zip archive.
//!
//! # Features
//!
//! - CF time decoding and CF unpacking of NetCDF variables
//! - Wind mode: speed and meteorological direction from `u10`/`v10`
//! - Single-variable mode for `sst`, `swh`, `mwd`, `hmax`, `shww`
//! - Per-input failure containment with user-facing messages
//! - One xlsx per input plus a zip of the whole batch
//!
//! # Example
//!
//! ```ignore
//! use gridsheet::batch::{process_batch, BatchResult};
//! use gridsheet::select::SelectionPolicy;
//! use std::path::PathBuf;
//!
//! let mut result = BatchResult::new();
//! process_batch(&[PathBuf::from("era5_wind.nc")], &SelectionPolicy::default(), &mut result)?;
//!
//! for failure in result.failures() {
//!     eprintln!("{}", failure.message);
//! }
//! println!("{}", result.summary());
//! let archive = result.package()?;
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod batch;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod flatten;
pub mod select;
pub mod wind;

pub use error::{FailureKind, GridsheetError, Result};
