//! Shared fixtures for integration tests.

#![allow(dead_code)]

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Excel serial number of 2024-01-01 00:00.
pub const SERIAL_2024_01_01: f64 = 45292.0;

/// Seconds from the Unix epoch to 2024-01-01 00:00.
pub const EPOCH_2024_01_01: i64 = 1_704_067_200;

/// A packed `i16` variable with CF scale and offset plus masking attributes.
struct Packed {
    name: String,
    raw: Vec<i16>,
    scale_factor: f64,
    add_offset: f64,
    masks: Vec<(String, Vec<i16>)>,
}

/// Builder for a minimal ERA5-style NetCDF file.
pub struct GridFixture {
    time_name: String,
    time_units: String,
    times: Vec<i64>,
    lats: Vec<f64>,
    lons: Vec<f64>,
    variables: Vec<(String, Vec<f64>)>,
    swapped: Vec<(String, Vec<f64>)>,
    packed: Option<Packed>,
    with_latitude: bool,
}

impl GridFixture {
    /// `nt` hourly steps from 2024-01-01 00:00, `ny` latitudes, `nx` longitudes.
    pub fn new(nt: usize, ny: usize, nx: usize) -> Self {
        Self {
            time_name: "valid_time".to_string(),
            time_units: "seconds since 1970-01-01".to_string(),
            times: (0..nt as i64).map(|t| EPOCH_2024_01_01 + t * 3600).collect(),
            lats: (0..ny).map(|i| 60.0 - 0.25 * i as f64).collect(),
            lons: (0..nx).map(|j| -10.0 + 0.25 * j as f64).collect(),
            variables: Vec::new(),
            swapped: Vec::new(),
            packed: None,
            with_latitude: true,
        }
    }

    pub fn len(&self) -> usize {
        self.times.len() * self.lats.len() * self.lons.len()
    }

    /// Replace the time axis.
    pub fn with_time(mut self, name: &str, units: &str, offsets: Vec<i64>) -> Self {
        self.time_name = name.to_string();
        self.time_units = units.to_string();
        self.times = offsets;
        self
    }

    pub fn with_lats(mut self, lats: Vec<f64>) -> Self {
        self.lats = lats;
        self
    }

    pub fn with_lons(mut self, lons: Vec<f64>) -> Self {
        self.lons = lons;
        self
    }

    /// Add a `[time, latitude, longitude]` variable.
    pub fn with_variable(mut self, name: &str, values: Vec<f64>) -> Self {
        assert_eq!(values.len(), self.len());
        self.variables.push((name.to_string(), values));
        self
    }

    /// Add a variable with values `0, 1, 2, ...` plus `base`.
    pub fn with_ramp(self, name: &str, base: f64) -> Self {
        let values = (0..self.len()).map(|k| base + k as f64).collect();
        self.with_variable(name, values)
    }

    /// Add a variable laid out `[time, longitude, latitude]`.
    pub fn with_swapped_variable(mut self, name: &str) -> Self {
        self.swapped.push((name.to_string(), vec![0.0; self.len()]));
        self
    }

    /// Add a packed `i16` variable with no fill attribute.
    pub fn with_packed(
        mut self,
        name: &str,
        raw: Vec<i16>,
        scale_factor: f64,
        add_offset: f64,
    ) -> Self {
        assert_eq!(raw.len(), self.len());
        self.packed = Some(Packed {
            name: name.to_string(),
            raw,
            scale_factor,
            add_offset,
            masks: Vec::new(),
        });
        self
    }

    /// Attach `_FillValue`, `missing_value`, `valid_range` or similar to the
    /// packed variable.
    pub fn with_packed_attribute(mut self, attribute: &str, values: Vec<i16>) -> Self {
        let packed = self.packed.as_mut().expect("with_packed first");
        packed.masks.push((attribute.to_string(), values));
        self
    }

    pub fn without_latitude(mut self) -> Self {
        self.with_latitude = false;
        self
    }

    /// Write the fixture into `dir` and return its path.
    pub fn write(&self, dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        let mut file = netcdf::create(&path).expect("failed to create NetCDF file");

        file.add_dimension(&self.time_name, self.times.len())
            .expect("add dim time");
        file.add_dimension("latitude", self.lats.len()).expect("add dim latitude");
        file.add_dimension("longitude", self.lons.len())
            .expect("add dim longitude");

        {
            let mut var = file
                .add_variable::<i64>(&self.time_name, &[self.time_name.as_str()])
                .expect("add var time");
            var.put_attribute("units", self.time_units.as_str())
                .expect("add time units");
            var.put_attribute("calendar", "proleptic_gregorian")
                .expect("add time calendar");
            var.put_values(&self.times, ..).expect("put time values");
        }
        if self.with_latitude {
            let mut var = file
                .add_variable::<f64>("latitude", &["latitude"])
                .expect("add var latitude");
            var.put_values(&self.lats, ..).expect("put latitude values");
        }
        {
            let mut var = file
                .add_variable::<f64>("longitude", &["longitude"])
                .expect("add var longitude");
            var.put_values(&self.lons, ..).expect("put longitude values");
        }

        let grid_dims = [self.time_name.as_str(), "latitude", "longitude"];
        for (name, values) in &self.variables {
            let mut var = file
                .add_variable::<f64>(name, &grid_dims)
                .expect("add grid var");
            var.put_values(values, ..).expect("put grid values");
        }

        let swapped_dims = [self.time_name.as_str(), "longitude", "latitude"];
        for (name, values) in &self.swapped {
            let mut var = file
                .add_variable::<f64>(name, &swapped_dims)
                .expect("add swapped var");
            var.put_values(values, ..).expect("put swapped values");
        }

        if let Some(packed) = &self.packed {
            let mut var = file
                .add_variable::<i16>(&packed.name, &grid_dims)
                .expect("add packed var");
            for (attribute, values) in &packed.masks {
                let added = match values.as_slice() {
                    [single] => var.put_attribute(attribute, *single),
                    _ => var.put_attribute(attribute, values.clone()),
                };
                added.expect("add mask attribute");
            }
            var.put_attribute("scale_factor", packed.scale_factor)
                .expect("add scale_factor");
            var.put_attribute("add_offset", packed.add_offset)
                .expect("add add_offset");
            var.put_values(&packed.raw, ..).expect("put packed values");
        }

        path
    }
}

/// Rows of the first worksheet of an xlsx file.
pub fn read_sheet(bytes: &[u8]) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> =
        open_workbook_from_rs(Cursor::new(bytes.to_vec())).expect("valid xlsx");
    let range = workbook.worksheet_range("Sheet1").expect("Sheet1 present");
    range.rows().map(|row| row.to_vec()).collect()
}

/// Header row as strings.
pub fn header(rows: &[Vec<Data>]) -> Vec<String> {
    rows[0].iter().map(|cell| cell.to_string()).collect()
}

/// Numeric value of a cell, including date-time cells as serial numbers.
pub fn number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(v) => Some(*v),
        Data::Int(v) => Some(*v as f64),
        Data::DateTime(dt) => Some(dt.as_f64()),
        _ => None,
    }
}
