use crate::error::{Result, S2CoverError};
use crate::index::MAX_LEVEL;
use serde::{Deserialize, Serialize};

/// Cell budget used when the caller does not pick one.
pub const DEFAULT_MAX_CELLS: usize = 100;

/// Hard ceiling on cells returned by a single covering.
pub const ABSOLUTE_MAX_CELLS: usize = 500;

/// Default covering level (cells roughly 600 m across).
pub const DEFAULT_LEVEL: u8 = 14;

/// Parameters for a covering run.
///
/// # Example
///
/// ```
/// use s2cover_rs::CoveringOptions;
///
/// let options = CoveringOptions::new(12).max_cells(50);
/// assert_eq!(options.level, 12);
/// assert_eq!(options.max_cells, 50);
/// assert_eq!(options.absolute_max_cells, 500);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoveringOptions {
    /// Level of every returned cell (0-30).
    pub level: u8,
    /// Maximum number of tokens returned.
    pub max_cells: usize,
    /// Ceiling for `max_cells` and for the pre-flight estimate.
    pub absolute_max_cells: usize,
}

impl Default for CoveringOptions {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            max_cells: DEFAULT_MAX_CELLS,
            absolute_max_cells: ABSOLUTE_MAX_CELLS,
        }
    }
}

impl CoveringOptions {
    pub fn new(level: u8) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    pub fn absolute_max_cells(mut self, absolute_max_cells: usize) -> Self {
        self.absolute_max_cells = absolute_max_cells;
        self
    }

    /// Parses options from JSON. Missing fields take their default values.
    ///
    /// ```
    /// use s2cover_rs::CoveringOptions;
    ///
    /// let options = CoveringOptions::from_json(r#"{ "level": 10 }"#).unwrap();
    /// assert_eq!(options, CoveringOptions::new(10));
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self =
            serde_json::from_str(json).map_err(|e| S2CoverError::InvalidConfig(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Checks the level and the cell budget.
    pub fn validate(&self) -> Result<()> {
        if self.level > MAX_LEVEL {
            return Err(S2CoverError::InvalidLevel(self.level));
        }
        if self.absolute_max_cells == 0 {
            return Err(S2CoverError::InvalidConfig(
                "absolute_max_cells must be at least 1".to_string(),
            ));
        }
        if self.max_cells < 1 || self.max_cells > self.absolute_max_cells {
            return Err(S2CoverError::InvalidMaxCells {
                max_cells: self.max_cells,
                limit: self.absolute_max_cells,
            });
        }
        Ok(())
    }
}
