//! Variable selection.
//!
//! Decides, from the variable names a dataset exposes, whether it is exported
//! in wind mode, as a single measurement, or not at all.

/// Default eastward wind component.
pub const WIND_U: &str = "u10";
/// Default northward wind component.
pub const WIND_V: &str = "v10";
/// Default single-variable candidates, highest priority first.
pub const SINGLE_CANDIDATES: &[&str] = &["sst", "swh", "mwd", "hmax", "shww"];

/// Outcome of variable selection for one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Both wind components are present.
    Wind {
        /// Eastward component variable.
        u: String,
        /// Northward component variable.
        v: String,
    },
    /// The first present single-variable candidate.
    Single(String),
    /// Nothing exportable.
    Unsupported,
}

impl Selection {
    /// Variables that must be loaded to export this selection.
    pub fn variables(&self) -> Vec<&str> {
        match self {
            Self::Wind { u, v } => vec![u.as_str(), v.as_str()],
            Self::Single(name) => vec![name.as_str()],
            Self::Unsupported => Vec::new(),
        }
    }

    /// Tag used in the output file name: `wind` or the variable name.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Wind { .. } => Some("wind"),
            Self::Single(name) => Some(name),
            Self::Unsupported => None,
        }
    }
}

/// Fixed-priority selection rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Wind component pair `(u, v)`.
    pub wind: (String, String),
    /// Single-variable candidates, highest priority first.
    pub candidates: Vec<String>,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            wind: (WIND_U.to_string(), WIND_V.to_string()),
            candidates: SINGLE_CANDIDATES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SelectionPolicy {
    /// Replace the single-variable candidate list.
    pub fn with_candidates<I, S>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidates = candidates.into_iter().map(Into::into).collect();
        self
    }

    /// Pick the export mode for a set of variable names.
    ///
    /// The wind pair wins over any candidate; among candidates the first in
    /// priority order wins. Matching is case-sensitive.
    pub fn select<'a, I>(&self, names: I) -> Selection
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<&str> = names.into_iter().collect();
        let (u, v) = &self.wind;

        if names.contains(&u.as_str()) && names.contains(&v.as_str()) {
            return Selection::Wind {
                u: u.clone(),
                v: v.clone(),
            };
        }

        self.candidates
            .iter()
            .find(|c| names.contains(&c.as_str()))
            .map(|c| Selection::Single(c.clone()))
            .unwrap_or(Selection::Unsupported)
    }
}
