//! In-memory gridded dataset.

use crate::error::{GridsheetError, Result};
use chrono::NaiveDateTime;
use ndarray::Array3;
use std::collections::BTreeMap;

/// A time × latitude × longitude dataset.
///
/// Every variable is a 3-D array indexed `[time, latitude, longitude]` whose
/// shape matches the axis lengths; [`GriddedDataset::insert`] refuses
/// anything else, so a constructed dataset always satisfies this.
#[derive(Debug, Clone)]
pub struct GriddedDataset {
    source: String,
    times: Vec<NaiveDateTime>,
    latitude: Vec<f64>,
    longitude: Vec<f64>,
    variables: BTreeMap<String, Array3<f64>>,
}

impl GriddedDataset {
    /// Create a dataset with the given axes and no variables.
    ///
    /// `source` names the input the dataset came from and is used in
    /// user-facing errors.
    pub fn new(
        source: impl Into<String>,
        times: Vec<NaiveDateTime>,
        latitude: Vec<f64>,
        longitude: Vec<f64>,
    ) -> Self {
        Self {
            source: source.into(),
            times,
            latitude,
            longitude,
            variables: BTreeMap::new(),
        }
    }

    /// Add a variable, checking its shape against the axes.
    pub fn insert(&mut self, name: impl Into<String>, data: Array3<f64>) -> Result<()> {
        let name = name.into();
        let (nt, ny, nx) = self.shape();
        if data.dim() != (nt, ny, nx) {
            return Err(GridsheetError::shape_mismatch(
                name,
                vec![nt, ny, nx],
                data.shape().to_vec(),
            ));
        }
        self.variables.insert(name, data);
        Ok(())
    }

    /// Add a variable from values laid out in `[time, latitude, longitude]`
    /// row-major order.
    pub fn insert_flat(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        let (nt, ny, nx) = self.shape();
        let got = values.len();
        let data = Array3::from_shape_vec((nt, ny, nx), values).map_err(|_| {
            GridsheetError::shape_mismatch(name.clone(), vec![nt * ny * nx], vec![got])
        })?;
        self.insert(name, data)
    }

    /// Builder-style [`GriddedDataset::insert_flat`].
    pub fn with_variable(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        self.insert_flat(name, values)?;
        Ok(self)
    }

    /// Name of the input this dataset was read from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Axis lengths `(time, latitude, longitude)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.times.len(), self.latitude.len(), self.longitude.len())
    }

    /// Number of grid cells across all time steps.
    pub fn cell_count(&self) -> usize {
        let (nt, ny, nx) = self.shape();
        nt * ny * nx
    }

    /// Timestamps of the time axis.
    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    /// Latitude axis in degrees.
    pub fn latitude(&self) -> &[f64] {
        &self.latitude
    }

    /// Longitude axis in degrees.
    pub fn longitude(&self) -> &[f64] {
        &self.longitude
    }

    /// Look up a variable by exact name.
    pub fn variable(&self, name: &str) -> Option<&Array3<f64>> {
        self.variables.get(name)
    }

    /// Names of all variables held.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }
}
