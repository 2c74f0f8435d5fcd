//! Grid flattening.
//!
//! Turns a [`GriddedDataset`] into one row per `(time, latitude, longitude)`
//! combination. Rows are emitted with time outermost and longitude innermost;
//! downstream output depends on this order.

use crate::data::GriddedDataset;
use crate::error::{GridsheetError, Result};
use crate::select::Selection;
use crate::wind::{wind_direction, wind_speed};
use chrono::{NaiveDateTime, Timelike};
use ndarray::Array3;

/// Leading columns of every table.
pub const BASE_COLUMNS: [&str; 4] = ["time", "hour", "latitude", "longitude"];

/// Measurement columns written in wind mode.
pub const WIND_COLUMNS: [&str; 4] = ["u_wind", "v_wind", "wind_speed", "wind_direction"];

/// One flattened grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    /// Timestamp of the time step.
    pub time: NaiveDateTime,
    /// Hour of day of `time`, 0 to 23.
    pub hour: u32,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Measurement values, in the table's measurement column order.
    pub values: Vec<f64>,
}

/// Flattened rows plus their measurement column names.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatTable {
    measurements: Vec<String>,
    rows: Vec<FlatRow>,
}

impl FlatTable {
    /// All column names, base columns first.
    pub fn columns(&self) -> Vec<&str> {
        BASE_COLUMNS
            .iter()
            .copied()
            .chain(self.measurements.iter().map(String::as_str))
            .collect()
    }

    /// Rows in output order.
    pub fn rows(&self) -> &[FlatRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Flatten a dataset according to a selection.
pub fn flatten(dataset: &GriddedDataset, selection: &Selection) -> Result<FlatTable> {
    match selection {
        Selection::Wind { u, v } => {
            let u_grid = grid(dataset, u)?;
            let v_grid = grid(dataset, v)?;
            let rows = build_rows(dataset, |idx| {
                let (u, v) = (u_grid[idx], v_grid[idx]);
                vec![u, v, wind_speed(u, v), wind_direction(u, v)]
            });
            Ok(FlatTable {
                measurements: WIND_COLUMNS.iter().map(|c| c.to_string()).collect(),
                rows,
            })
        }
        Selection::Single(name) => {
            let values = grid(dataset, name)?;
            let rows = build_rows(dataset, |idx| vec![values[idx]]);
            Ok(FlatTable {
                measurements: vec![name.clone()],
                rows,
            })
        }
        Selection::Unsupported => Err(GridsheetError::unsupported(dataset.source())),
    }
}

fn grid<'a>(dataset: &'a GriddedDataset, name: &str) -> Result<&'a Array3<f64>> {
    dataset
        .variable(name)
        .ok_or_else(|| GridsheetError::MissingVariable {
            name: name.to_string(),
        })
}

fn build_rows<F>(dataset: &GriddedDataset, mut measure: F) -> Vec<FlatRow>
where
    F: FnMut([usize; 3]) -> Vec<f64>,
{
    let mut rows = Vec::with_capacity(dataset.cell_count());
    for (t, &time) in dataset.times().iter().enumerate() {
        let hour = time.hour();
        for (i, &latitude) in dataset.latitude().iter().enumerate() {
            for (j, &longitude) in dataset.longitude().iter().enumerate() {
                rows.push(FlatRow {
                    time,
                    hour,
                    latitude,
                    longitude,
                    values: measure([t, i, j]),
                });
            }
        }
    }
    rows
}
