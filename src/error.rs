use thiserror::Error;

/// Error type for s2cover-rs operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum S2CoverError {
    /// The cell level is outside the valid range (0-30).
    #[error("Invalid level: {0} (expected 0-30)")]
    InvalidLevel(u8),

    /// The token is empty, not hex, too long, or does not name a valid cell.
    #[error("Invalid token: {0:?}")]
    InvalidToken(String),

    /// Latitude or longitude is out of range or not finite.
    #[error("Invalid coordinate: latitude={latitude}, longitude={longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// The requested cell budget is below 1 or above the absolute limit.
    #[error("Invalid max cells: {max_cells} (expected 1-{limit})")]
    InvalidMaxCells { max_cells: usize, limit: usize },

    /// Search radius must be finite and positive.
    #[error("Invalid radius: {0} km")]
    InvalidRadius(f64),

    /// Covering options could not be parsed or are inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A level-0 cell has no parent.
    #[error("Cell {0} is at level 0 and has no parent")]
    NoParent(String),

    /// A level-30 cell has no children.
    #[error("Cell {0} is at level 30 and has no children")]
    NoChildren(String),

    /// The pre-flight estimate says the covering would exceed the hard cell cap.
    #[error(
        "Covering at level {level} would need about {estimate} cells, more than the limit of {limit}. \
         Use a coarser level, a smaller radius or box, or store items at two resolutions \
         and query the coarse one for large regions"
    )]
    CoveringTooLarge { estimate: u64, limit: usize, level: u8 },

    /// Building an Arrow or GeoJSON representation failed.
    #[error("Export error: {0}")]
    Export(String),
}

impl S2CoverError {
    /// True for errors caused by a bad argument from the caller.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            S2CoverError::InvalidLevel(_)
                | S2CoverError::InvalidToken(_)
                | S2CoverError::InvalidCoordinate { .. }
                | S2CoverError::InvalidMaxCells { .. }
                | S2CoverError::InvalidRadius(_)
                | S2CoverError::InvalidConfig(_)
        )
    }

    /// True for operations that cannot be performed on otherwise valid input.
    pub fn is_invalid_operation(&self) -> bool {
        matches!(
            self,
            S2CoverError::NoParent(_)
                | S2CoverError::NoChildren(_)
                | S2CoverError::CoveringTooLarge { .. }
        )
    }
}

/// Result type for s2cover-rs operations.
pub type Result<T> = std::result::Result<T, S2CoverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(S2CoverError::InvalidLevel(31).is_argument_error());
        assert!(S2CoverError::InvalidToken("zz".into()).is_argument_error());
        assert!(!S2CoverError::InvalidToken("zz".into()).is_invalid_operation());
        assert!(S2CoverError::NoParent("1".into()).is_invalid_operation());
        assert!(
            S2CoverError::CoveringTooLarge {
                estimate: 9000,
                limit: 500,
                level: 20
            }
            .is_invalid_operation()
        );
    }

    #[test]
    fn test_covering_too_large_message_has_remediation() {
        let err = S2CoverError::CoveringTooLarge {
            estimate: 123456,
            limit: 500,
            level: 30,
        };
        let msg = err.to_string();
        assert!(msg.contains("123456"));
        assert!(msg.contains("coarser level"));
        assert!(msg.contains("smaller radius"));
    }
}
