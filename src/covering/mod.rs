//! Region coverings: turn a circle or a bounding box into a bounded list of
//! cell tokens, nearest first.
//!
//! A covering runs in three steps. The options are validated, a cheap area
//! estimate rejects requests that would need more than `absolute_max_cells`
//! cells, and a flood fill from the region's center collects intersecting
//! cells. Boxes that cross the antimeridian are split and each half is filled
//! separately.
//!
//! ```
//! use s2cover_rs::{CoveringOptions, Geolocation, cells_for_radius};
//!
//! # fn main() -> Result<(), s2cover_rs::S2CoverError> {
//! let center = Geolocation::new(40.7128, -74.0060)?;
//! let tokens = cells_for_radius(&center, 5.0, &CoveringOptions::new(12).max_cells(20))?;
//! assert!(!tokens.is_empty() && tokens.len() <= 20);
//! # Ok(())
//! # }
//! ```

mod flood;
mod options;
mod region;

pub use options::{ABSOLUTE_MAX_CELLS, CoveringOptions, DEFAULT_LEVEL, DEFAULT_MAX_CELLS};
pub use region::{CELL_EDGE_KM_LEVEL_0, Region, cell_edge_km, estimate_cell_count};

use crate::cell::Cell;
use crate::coord::Geolocation;
use crate::error::{Result, S2CoverError};
use crate::geom::BoundingBox;
use crate::index::{CellId, cell_center};
use flood::{Termination, flood_fill, visited_cap};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Level above which near-pole coverings log an advisory.
const POLE_ADVISORY_LEVEL: u8 = 14;

/// Minimum budget for each half of a date-line split.
const MIN_SPLIT_BUDGET: usize = 10;

/// A covering cell with its distance from the query center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoveredCell {
    pub token: String,
    /// Great-circle distance from the query center to the cell center.
    pub distance_km: f64,
}

impl CoveredCell {
    pub fn cell(&self) -> Result<Cell> {
        Cell::from_token(&self.token)
    }
}

/// Covering of a circle, nearest cells first.
pub fn cover_radius(
    center: &Geolocation,
    radius_km: f64,
    options: &CoveringOptions,
) -> Result<Vec<CoveredCell>> {
    // Option errors take precedence over a bad radius
    options.validate()?;
    cover_region(&Region::circle(*center, radius_km)?, options)
}

/// Covering of a bounding box, nearest to the box center first.
pub fn cover_bounding_box(
    bbox: &BoundingBox,
    options: &CoveringOptions,
) -> Result<Vec<CoveredCell>> {
    cover_region(&Region::Rect(*bbox), options)
}

/// Covering of any [`Region`].
///
/// # Errors
///
/// - [`S2CoverError::InvalidLevel`] / [`S2CoverError::InvalidMaxCells`] - bad options
/// - [`S2CoverError::InvalidCoordinate`] / [`S2CoverError::InvalidRadius`] - bad region
/// - [`S2CoverError::CoveringTooLarge`] - the estimate exceeds `absolute_max_cells`;
///   no flood fill is attempted
pub fn cover_region(region: &Region, options: &CoveringOptions) -> Result<Vec<CoveredCell>> {
    options.validate()?;
    region.validate()?;

    let level = options.level;
    let estimate = estimate_cell_count(region, level);
    if estimate > options.absolute_max_cells as u64 {
        return Err(S2CoverError::CoveringTooLarge {
            estimate,
            limit: options.absolute_max_cells,
            level,
        });
    }

    let origin = region.center();
    if origin.is_near_pole() && level > POLE_ADVISORY_LEVEL {
        tracing::warn!(
            latitude = origin.latitude,
            level,
            "Near-pole covering at a fine level; cell count grows quickly toward the pole"
        );
    }

    let bbox = region.bounding_box()?;
    let ids = match bbox.split_at_date_line() {
        Some((western, eastern)) => {
            let budget = (options.max_cells / 2).max(MIN_SPLIT_BUDGET);
            let mut seen = HashSet::new();
            let mut ids = Vec::new();
            for half in [western, eastern] {
                for id in fill(&half, &half.center(), level, budget)? {
                    if seen.insert(id) {
                        ids.push(id);
                    }
                }
            }
            ids
        }
        None => fill(&bbox, &origin, level, options.max_cells)?,
    };

    let mut cells: Vec<CoveredCell> = ids
        .into_iter()
        .map(|id| CoveredCell {
            token: id.to_token(),
            distance_km: distance_to_center(id, &origin),
        })
        .collect();

    cells.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.token.cmp(&b.token))
    });
    cells.truncate(options.max_cells);

    tracing::debug!(level, estimate, returned = cells.len(), "Covering complete");
    Ok(cells)
}

/// Tokens covering the circle around `center`, nearest first.
pub fn cells_for_radius(
    center: &Geolocation,
    radius_km: f64,
    options: &CoveringOptions,
) -> Result<Vec<String>> {
    Ok(into_tokens(cover_radius(center, radius_km, options)?))
}

/// Tokens covering `bbox`, nearest to its center first.
pub fn cells_for_bounding_box(
    bbox: &BoundingBox,
    options: &CoveringOptions,
) -> Result<Vec<String>> {
    Ok(into_tokens(cover_bounding_box(bbox, options)?))
}

fn fill(region: &BoundingBox, seed: &Geolocation, level: u8, budget: usize) -> Result<Vec<CellId>> {
    let result = flood_fill(region, seed, level, budget, visited_cap(budget))?;
    tracing::debug!(
        level,
        accepted = result.accepted.len(),
        visited = result.visited,
        exhausted = result.termination == Termination::QueueEmpty,
        capped = result.termination == Termination::VisitedCap,
        "Flood fill finished"
    );
    Ok(result.accepted)
}

fn distance_to_center(id: CellId, origin: &Geolocation) -> f64 {
    let (latitude, longitude) = cell_center(id);
    origin.distance_km(&Geolocation {
        latitude,
        longitude,
    })
}

fn into_tokens(cells: Vec<CoveredCell>) -> Vec<String> {
    cells.into_iter().map(|c| c.token).collect()
}
