//! Data reading and representation.
//!
//! This module handles reading NetCDF files and holding their
//! time × latitude × longitude grids in memory.

mod dataset;
mod reader;
pub mod time;

pub use dataset::GriddedDataset;
pub use reader::{DataReader, LATITUDE_NAMES, LONGITUDE_NAMES, TIME_NAMES};
