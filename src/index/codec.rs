//! Encoding lat/lon points to cell tokens and decoding tokens back to geometry.

use crate::coord::validate_lat_lon;
use crate::error::{Result, S2CoverError};
use crate::geom::CellBounds;
use crate::index::constants::{FACE_BOUNDS, MAX_LEVEL, MAX_SIZE, POLE_BOUNDS_LATITUDE};
use crate::index::identifier::CellId;
use crate::index::projection::{
    face_si_ti_to_xyz, lat_lon_to_face_ij, si_to_st, st_to_uv, face_uv_to_xyz, xyz_to_face_ij,
    xyz_to_lat_lon,
};

/// `(di, dj)` steps to the eight same-level neighbors, in face-local terms.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Encodes a latitude/longitude (degrees) as the token of the cell at `level`
/// that contains it.
///
/// # Example
/// ```
/// use s2cover_rs::{decode, encode};
///
/// # fn main() -> Result<(), s2cover_rs::S2CoverError> {
/// let token = encode(40.7128, -74.0060, 12)?;
/// let (lat, lon) = decode(&token)?;
/// assert!((lat - 40.7128).abs() < 0.05);
/// assert!((lon + 74.0060).abs() < 0.05);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - [`S2CoverError::InvalidLevel`] - `level` is above 30
/// - [`S2CoverError::InvalidCoordinate`] - latitude or longitude out of range
pub fn encode(lat: f64, lon: f64, level: u8) -> Result<String> {
    Ok(encode_id(lat, lon, level)?.to_token())
}

/// Same as [`encode`] but returns the numeric identifier.
pub fn encode_id(lat: f64, lon: f64, level: u8) -> Result<CellId> {
    if level > MAX_LEVEL {
        return Err(S2CoverError::InvalidLevel(level));
    }
    validate_lat_lon(lat, lon)?;

    let (face, i, j) = lat_lon_to_face_ij(lat, lon);
    Ok(CellId::from_face_ij(face, i, j).truncate(level))
}

/// Decodes a token to the latitude/longitude of its cell center.
///
/// # Errors
///
/// [`S2CoverError::InvalidToken`] for empty, non-hex or otherwise malformed tokens.
pub fn decode(token: &str) -> Result<(f64, f64)> {
    Ok(cell_center(CellId::from_token(token)?))
}

/// Center of a cell as `(lat, lon)` degrees.
///
/// The bits of a non-leaf identifier spell out a leaf next to the true center;
/// the parity of `i` against bit 2 of the identifier says whether the center is
/// that leaf's lower-left or upper-right corner.
pub(crate) fn cell_center(id: CellId) -> (f64, f64) {
    let (face, i, j) = id.to_face_ij();
    let delta = if id.is_leaf() {
        1
    } else if ((i as u64 ^ (id.id() >> 2)) & 1) != 0 {
        2
    } else {
        0
    };
    xyz_to_lat_lon(face_si_ti_to_xyz(face, 2 * i + delta, 2 * j + delta))
}

/// Decodes a token to the latitude/longitude rectangle enclosing its cell.
///
/// # Errors
///
/// [`S2CoverError::InvalidToken`] for malformed tokens.
pub fn decode_bounds(token: &str) -> Result<CellBounds> {
    Ok(cell_bounds(CellId::from_token(token)?))
}

pub(crate) fn cell_bounds(id: CellId) -> CellBounds {
    let level = id.level();
    if level == 0 {
        let [min_lat, max_lat, min_lon, max_lon] = FACE_BOUNDS[id.face() as usize];
        return CellBounds::new(min_lat, max_lat, min_lon, max_lon);
    }

    let (face, i, j) = id.to_face_ij();
    let size = cell_size(level);
    let (i0, j0) = (i & -size, j & -size);
    let (si_lo, si_hi) = (2 * i0, 2 * (i0 + size));
    let (ti_lo, ti_hi) = (2 * j0, 2 * (j0 + size));

    // Cyclic order so consecutive entries share an edge
    let corners = [
        (si_lo, ti_lo),
        (si_hi, ti_lo),
        (si_hi, ti_hi),
        (si_lo, ti_hi),
    ]
    .map(|(si, ti)| xyz_to_lat_lon(face_si_ti_to_xyz(face, si, ti)));

    let mut min_lat = corners.iter().map(|c| c.0).fold(f64::INFINITY, f64::min);
    let mut max_lat = corners.iter().map(|c| c.0).fold(f64::NEG_INFINITY, f64::max);

    let touches_pole = max_lat > POLE_BOUNDS_LATITUDE || min_lat < -POLE_BOUNDS_LATITUDE;
    if touches_pole {
        if max_lat > POLE_BOUNDS_LATITUDE {
            max_lat = 90.0;
        }
        if min_lat < -POLE_BOUNDS_LATITUDE {
            min_lat = -90.0;
        }
        return CellBounds::new(min_lat, max_lat, -180.0, 180.0);
    }

    // A jump of more than half the globe between adjacent corners means the cell
    // straddles the antimeridian. Widening to the full span is lossy but safe for
    // overlap tests.
    let wraps = (0..4).any(|k| (corners[k].1 - corners[(k + 1) % 4].1).abs() > 180.0);
    if wraps {
        return CellBounds::new(min_lat, max_lat, -180.0, 180.0);
    }

    let min_lon = corners.iter().map(|c| c.1).fold(f64::INFINITY, f64::min);
    let max_lon = corners.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max);
    CellBounds::new(min_lat, max_lat, min_lon, max_lon)
}

/// Tokens of the eight same-level cells around `token`.
///
/// Neighbors across a cube edge are found by re-projecting onto the adjacent
/// face. At the eight cube corners only seven distinct cells touch, so one token
/// is repeated.
///
/// # Errors
///
/// [`S2CoverError::InvalidToken`] for malformed tokens.
pub fn get_neighbors(token: &str) -> Result<[String; 8]> {
    Ok(neighbor_ids(CellId::from_token(token)?).map(|id| id.to_token()))
}

pub(crate) fn neighbor_ids(id: CellId) -> [CellId; 8] {
    let level = id.level();
    let (face, i, j) = id.to_face_ij();
    let size = cell_size(level);
    let (i0, j0) = (i & -size, j & -size);

    NEIGHBOR_OFFSETS.map(|(di, dj)| {
        let (ni, nj) = (i0 + di * size, j0 + dj * size);
        let leaf = if (0..MAX_SIZE).contains(&ni) && (0..MAX_SIZE).contains(&nj) {
            CellId::from_face_ij(face, ni, nj)
        } else {
            from_face_ij_wrap(face, ni, nj)
        };
        leaf.truncate(level)
    })
}

/// Leaf cell for `(i, j)` positions just off the edge of `face`. The point is
/// pushed through xyz so it lands on whichever face actually owns it; adjacent
/// faces are rotated relative to each other, so (i, j) arithmetic alone is wrong.
fn from_face_ij_wrap(face: u8, i: i64, j: i64) -> CellId {
    let i = i.clamp(-1, MAX_SIZE);
    let j = j.clamp(-1, MAX_SIZE);
    let u = st_to_uv(si_to_st(2 * i + 1));
    let v = st_to_uv(si_to_st(2 * j + 1));
    let (new_face, ni, nj) = xyz_to_face_ij(face_uv_to_xyz(face, u, v));
    CellId::from_face_ij(new_face, ni, nj)
}

/// Edge length of a level's cells in leaf units.
fn cell_size(level: u8) -> i64 {
    1i64 << (MAX_LEVEL - level)
}
