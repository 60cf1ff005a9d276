use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// The closed set of supported color transforms
///
/// Filters are mutually exclusive: the booth applies exactly one of these to
/// the captured frame. Parsing from a name or from the legacy integer index
/// is the only place an unknown filter can appear, and both report it as a
/// [`FilterError`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// No transformation, the frame is stored as captured
    #[default]
    None,
    /// Channel-average grayscale
    Grayscale,
    /// Warm sepia tone mix
    Sepia,
    /// Inverted colors
    Negative,
}

impl FilterKind {
    /// All filters, in selection-index order
    pub const ALL: [FilterKind; 4] = [
        FilterKind::None,
        FilterKind::Grayscale,
        FilterKind::Sepia,
        FilterKind::Negative,
    ];

    /// Returns the unique name of this filter
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::None => "none",
            FilterKind::Grayscale => "grayscale",
            FilterKind::Sepia => "sepia",
            FilterKind::Negative => "negative",
        }
    }

    /// Returns a human-readable description of this filter
    pub fn description(&self) -> &'static str {
        match self {
            FilterKind::None => "Original colors, no transformation",
            FilterKind::Grayscale => "Neutral gray from the channel average",
            FilterKind::Sepia => "Warm brown tone of early photography",
            FilterKind::Negative => "Inverted colors, film-negative look",
        }
    }

    /// Selection index of this filter
    pub fn index(&self) -> i32 {
        match self {
            FilterKind::None => 0,
            FilterKind::Grayscale => 1,
            FilterKind::Sepia => 2,
            FilterKind::Negative => 3,
        }
    }

    /// Resolve a filter from its selection index
    ///
    /// UI layers that address filters by button position use this; anything
    /// outside `0..=3` is an unknown filter.
    pub fn from_index(index: i32) -> Result<Self, FilterError> {
        match index {
            0 => Ok(FilterKind::None),
            1 => Ok(FilterKind::Grayscale),
            2 => Ok(FilterKind::Sepia),
            3 => Ok(FilterKind::Negative),
            _ => Err(FilterError::UnknownIndex { index }),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.to_ascii_lowercase();
        FilterKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| FilterError::UnknownKind {
                name: s.to_string(),
            })
    }
}
