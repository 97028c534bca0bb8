//! Breadth-first flood fill over same-level cells.

use crate::coord::Geolocation;
use crate::error::Result;
use crate::geom::BoundingBox;
use crate::index::{CellId, cell_bounds, encode_id, neighbor_ids};
use std::collections::{HashSet, VecDeque};

/// Lower bound on the visited-node safety cap.
pub(crate) const MIN_VISITED_CAP: usize = 10_000;

/// Visited cells allowed per requested cell before the fill gives up.
pub(crate) const VISITED_PER_CELL: usize = 50;

pub(crate) fn visited_cap(max_cells: usize) -> usize {
    max_cells.saturating_mul(VISITED_PER_CELL).max(MIN_VISITED_CAP)
}

/// Why a fill stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Termination {
    QueueEmpty,
    BudgetReached,
    VisitedCap,
}

#[derive(Debug)]
pub(crate) struct FloodFill {
    pub accepted: Vec<CellId>,
    pub visited: usize,
    pub termination: Termination,
}

/// Accepts cells at `level` whose bounds overlap `region`, expanding outward
/// from the cell containing `seed`. At most `max_cells` cells are accepted and
/// at most `visited_limit` cells are ever enqueued.
pub(crate) fn flood_fill(
    region: &BoundingBox,
    seed: &Geolocation,
    level: u8,
    max_cells: usize,
    visited_limit: usize,
) -> Result<FloodFill> {
    let start = encode_id(seed.latitude, seed.longitude, level)?;

    let mut queue = VecDeque::from([start]);
    let mut visited = HashSet::from([start]);
    let mut accepted = Vec::new();
    let mut termination = Termination::QueueEmpty;

    while let Some(id) = queue.pop_front() {
        // Backstop: with `visited_cap` limits the budget check below stops first
        if visited.len() >= visited_limit {
            tracing::warn!(
                level,
                visited = visited.len(),
                accepted = accepted.len(),
                "Flood fill hit the visited-cell safety cap"
            );
            termination = Termination::VisitedCap;
            break;
        }

        if !cell_bounds(id).intersects_box(region) {
            continue;
        }

        accepted.push(id);
        if accepted.len() >= max_cells {
            termination = Termination::BudgetReached;
            break;
        }

        for neighbor in neighbor_ids(id) {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    Ok(FloodFill {
        accepted,
        visited: visited.len(),
        termination,
    })
}
