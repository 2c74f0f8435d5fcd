//! NetCDF file reader.

use super::time::decode_axis;
use super::GriddedDataset;
use crate::error::{GridsheetError, Result};
use chrono::NaiveDateTime;
use ndarray::Array3;
use netcdf::types::{FloatType, IntType, NcVariableType};
use netcdf::AttributeValue;
use std::path::{Path, PathBuf};

/// Accepted names of the time coordinate, in lookup order.
pub const TIME_NAMES: &[&str] = &["valid_time", "time"];
/// Accepted names of the latitude coordinate.
pub const LATITUDE_NAMES: &[&str] = &["latitude"];
/// Accepted names of the longitude coordinate.
pub const LONGITUDE_NAMES: &[&str] = &["longitude"];

/// NetCDF data reader.
///
/// Holds the file open so the caller can inspect variable names before
/// deciding which grids to load. Dropping the reader closes the file.
pub struct DataReader {
    path: PathBuf,
    file: netcdf::File,
}

impl std::fmt::Debug for DataReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataReader").field("path", &self.path).finish()
    }
}

impl DataReader {
    /// Open a NetCDF file.
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::metadata(path)
            .map_err(|e| GridsheetError::file_open(path.to_path_buf(), e))?;
        let file = netcdf::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Base name of the opened file.
    pub fn source_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Names of every variable in the root group, in file order.
    pub fn variable_names(&self) -> Vec<String> {
        self.file.variables().map(|v| v.name()).collect()
    }

    /// Read the coordinate axes plus the named data variables.
    ///
    /// Each variable must be laid out `[time, latitude, longitude]` with
    /// lengths matching the coordinates.
    pub fn read_dataset(&self, variables: &[&str]) -> Result<GriddedDataset> {
        let times = self.read_times()?;
        let latitude = self.read_coordinate(LATITUDE_NAMES)?;
        let longitude = self.read_coordinate(LONGITUDE_NAMES)?;

        tracing::debug!(
            "{}: {} times, {} latitudes, {} longitudes",
            self.path.display(),
            times.len(),
            latitude.len(),
            longitude.len()
        );

        let mut dataset = GriddedDataset::new(self.source_name(), times, latitude, longitude);
        let expected = dataset.shape();
        for &name in variables {
            let grid = self.read_grid(name, expected)?;
            dataset.insert(name, grid)?;
        }
        Ok(dataset)
    }

    fn read_times(&self) -> Result<Vec<NaiveDateTime>> {
        let var = TIME_NAMES
            .iter()
            .find_map(|name| self.file.variable(name))
            .ok_or_else(|| GridsheetError::missing_coordinate(TIME_NAMES))?;
        let name = var.name();

        let units = attr_string(&var, "units").ok_or_else(|| {
            GridsheetError::invalid_time(format!(
                "time variable '{name}' has no 'units' attribute"
            ))
        })?;
        let calendar = attr_string(&var, "calendar");

        let offsets = read_values(&var, &name, 1)?;
        decode_axis(&offsets, &units, calendar.as_deref())
    }

    fn read_coordinate(&self, names: &[&str]) -> Result<Vec<f64>> {
        let var = names
            .iter()
            .find_map(|name| self.file.variable(name))
            .ok_or_else(|| GridsheetError::missing_coordinate(names))?;
        let name = var.name();
        read_values(&var, &name, 1)
    }

    fn read_grid(&self, name: &str, expected: (usize, usize, usize)) -> Result<Array3<f64>> {
        let var = self
            .file
            .variable(name)
            .ok_or_else(|| GridsheetError::MissingVariable {
                name: name.to_string(),
            })?;

        let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
        let (nt, ny, nx) = expected;
        if shape != [nt, ny, nx] {
            return Err(GridsheetError::shape_mismatch(name, vec![nt, ny, nx], shape));
        }

        let values = read_values(&var, name, 3)?;
        Array3::from_shape_vec(expected, values).map_err(|e| {
            GridsheetError::NetCDF(format!("Invalid shape/data size for '{name}': {e}"))
        })
    }
}

/// CF packing attributes of one variable.
#[derive(Debug, Clone, PartialEq)]
struct Packing {
    fill: Vec<f64>,
    valid_min: Option<f64>,
    valid_max: Option<f64>,
    scale_factor: f64,
    add_offset: f64,
}

impl Packing {
    fn of(var: &netcdf::Variable<'_>) -> Self {
        let mut fill = attr_numbers(var, "_FillValue");
        if fill.is_empty() {
            fill.extend(default_fill(&var.vartype()));
        }
        fill.extend(attr_numbers(var, "missing_value"));

        let (mut valid_min, mut valid_max) = match attr_numbers(var, "valid_range").as_slice() {
            &[lo, hi] => (Some(lo), Some(hi)),
            _ => (None, None),
        };
        if let Some(&lo) = attr_numbers(var, "valid_min").first() {
            valid_min = Some(lo);
        }
        if let Some(&hi) = attr_numbers(var, "valid_max").first() {
            valid_max = Some(hi);
        }

        Self {
            fill,
            valid_min,
            valid_max,
            scale_factor: attr_numbers(var, "scale_factor").first().copied().unwrap_or(1.0),
            add_offset: attr_numbers(var, "add_offset").first().copied().unwrap_or(0.0),
        }
    }

    /// Whether a raw value is a fill value or outside the valid range.
    fn is_masked(&self, v: f64) -> bool {
        self.fill.iter().any(|&f| f == v)
            || self.valid_min.is_some_and(|lo| v < lo)
            || self.valid_max.is_some_and(|hi| v > hi)
    }

    /// Mask invalid raw values to NaN, then apply scale and offset.
    fn unpack(&self, values: &mut [f64]) {
        let scaled = self.scale_factor != 1.0 || self.add_offset != 0.0;
        for v in values.iter_mut() {
            if self.is_masked(*v) {
                *v = f64::NAN;
            } else if scaled {
                *v = *v * self.scale_factor + self.add_offset;
            }
        }
    }
}

/// netCDF default fill value of a type, used when `_FillValue` is absent.
///
/// Byte types have no default mask.
fn default_fill(vartype: &NcVariableType) -> Option<f64> {
    match vartype {
        NcVariableType::Int(IntType::I16) => Some(-32_767.0),
        NcVariableType::Int(IntType::U16) => Some(65_535.0),
        NcVariableType::Int(IntType::I32) => Some(-2_147_483_647.0),
        NcVariableType::Int(IntType::U32) => Some(4_294_967_295.0),
        NcVariableType::Int(IntType::I64) => Some(-9_223_372_036_854_775_806_i64 as f64),
        NcVariableType::Int(IntType::U64) => Some(18_446_744_073_709_551_614_u64 as f64),
        NcVariableType::Float(FloatType::F32) => Some(f64::from(9.969_209_968_386_869e36_f32)),
        NcVariableType::Float(FloatType::F64) => Some(9.969_209_968_386_869e36),
        _ => None,
    }
}

/// Read every value of a numeric variable as f64, unpacked.
fn read_values(var: &netcdf::Variable<'_>, name: &str, ndim: usize) -> Result<Vec<f64>> {
    match var.vartype() {
        NcVariableType::Int(_) | NcVariableType::Float(_) => {}
        other => {
            return Err(GridsheetError::NetCDF(format!(
                "Variable '{name}' has non-numeric type {other:?}"
            )))
        }
    }

    let got: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    if got.len() != ndim {
        let expected = got.iter().take(ndim).copied().collect();
        return Err(GridsheetError::shape_mismatch(name, expected, got));
    }

    let mut values: Vec<f64> = var
        .get_values::<f64, _>(..)
        .map_err(|e| GridsheetError::NetCDF(format!("Failed to read '{name}': {e}")))?;
    Packing::of(var).unpack(&mut values);
    Ok(values)
}

fn attr_string(var: &netcdf::Variable<'_>, name: &str) -> Option<String> {
    match var.attribute_value(name)?.ok()? {
        AttributeValue::Str(s) => Some(s),
        AttributeValue::Strs(v) => v.into_iter().next(),
        _ => None,
    }
}

fn attr_numbers(var: &netcdf::Variable<'_>, name: &str) -> Vec<f64> {
    let Some(Ok(value)) = var.attribute_value(name) else {
        return Vec::new();
    };

    match value {
        AttributeValue::Uchar(v) => vec![f64::from(v)],
        AttributeValue::Schar(v) => vec![f64::from(v)],
        AttributeValue::Ushort(v) => vec![f64::from(v)],
        AttributeValue::Short(v) => vec![f64::from(v)],
        AttributeValue::Uint(v) => vec![f64::from(v)],
        AttributeValue::Int(v) => vec![f64::from(v)],
        AttributeValue::Ulonglong(v) => vec![v as f64],
        AttributeValue::Longlong(v) => vec![v as f64],
        AttributeValue::Float(v) => vec![f64::from(v)],
        AttributeValue::Double(v) => vec![v],
        AttributeValue::Uchars(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Schars(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Ushorts(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Shorts(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Uints(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Ints(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Ulonglongs(v) => v.into_iter().map(|x| x as f64).collect(),
        AttributeValue::Longlongs(v) => v.into_iter().map(|x| x as f64).collect(),
        AttributeValue::Floats(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Doubles(v) => v,
        AttributeValue::Str(_) | AttributeValue::Strs(_) => Vec::new(),
    }
}
