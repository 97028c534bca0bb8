//! Sphere ↔ cube-face coordinate transforms.
//!
//! The chain used by the codec is
//! `(lat, lon) → (x, y, z) → face, (u, v) → (s, t) → (i, j)` and back.
//! `u, v, s, t` all live in `[-1, 1]`; `i, j` are leaf-cell indices in `[0, 2^30)`.

use crate::index::constants::MAX_SIZE;

/// A point in 3-space. Not necessarily unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

pub(crate) fn lat_lon_to_xyz(lat_deg: f64, lon_deg: f64) -> Xyz {
    let lat = lat_deg.to_radians();
    let lon = lon_deg.to_radians();
    let cos_lat = lat.cos();
    Xyz {
        x: cos_lat * lon.cos(),
        y: cos_lat * lon.sin(),
        z: lat.sin(),
    }
}

/// Back to degrees. atan2 for latitude stays well conditioned near the poles.
pub(crate) fn xyz_to_lat_lon(p: Xyz) -> (f64, f64) {
    let lat = p.z.atan2((p.x * p.x + p.y * p.y).sqrt());
    let lon = p.y.atan2(p.x);
    (lat.to_degrees().clamp(-90.0, 90.0), lon.to_degrees().clamp(-180.0, 180.0))
}

/// Face whose axis has the largest absolute component; ties go to x, then y.
pub(crate) fn xyz_to_face(p: Xyz) -> u8 {
    let (ax, ay, az) = (p.x.abs(), p.y.abs(), p.z.abs());
    let (axis, component) = if ax >= ay && ax >= az {
        (0, p.x)
    } else if ay >= az {
        (1, p.y)
    } else {
        (2, p.z)
    };
    if component < 0.0 { axis + 3 } else { axis }
}

/// Projects `p` onto the plane of `face`. `p` must belong to that face (or lie
/// just beyond its edge).
pub(crate) fn face_xyz_to_uv(face: u8, p: Xyz) -> (f64, f64) {
    match face {
        0 => (p.y / p.x, p.z / p.x),
        1 => (-p.x / p.y, p.z / p.y),
        2 => (-p.x / p.z, -p.y / p.z),
        3 => (p.z / p.x, p.y / p.x),
        4 => (p.z / p.y, -p.x / p.y),
        _ => (-p.y / p.z, -p.x / p.z),
    }
}

pub(crate) fn face_uv_to_xyz(face: u8, u: f64, v: f64) -> Xyz {
    let (x, y, z) = match face {
        0 => (1.0, u, v),
        1 => (-u, 1.0, v),
        2 => (-u, -v, 1.0),
        3 => (-1.0, -v, -u),
        4 => (v, -1.0, -u),
        _ => (v, u, -1.0),
    };
    Xyz { x, y, z }
}

/// Quadratic warp from face-plane to cell-space coordinates.
pub(crate) fn uv_to_st(u: f64) -> f64 {
    if u >= 0.0 {
        (1.0 + 3.0 * u).sqrt() - 1.0
    } else {
        1.0 - (1.0 - 3.0 * u).sqrt()
    }
}

/// Inverse of [`uv_to_st`].
pub(crate) fn st_to_uv(s: f64) -> f64 {
    if s >= 0.0 {
        ((1.0 + s) * (1.0 + s) - 1.0) / 3.0
    } else {
        (1.0 - (1.0 - s) * (1.0 - s)) / 3.0
    }
}

/// Leaf index containing `s`, clamped to the face.
pub(crate) fn st_to_ij(s: f64) -> i64 {
    let m = (MAX_SIZE / 2) as f64;
    let ij = (m * s + (m - 0.5)).round();
    (ij as i64).clamp(0, MAX_SIZE - 1)
}

/// Cell-space coordinate of a position measured in half-leaf units
/// (`si = 2 * i + delta`), so leaf edges and leaf centers are both exact.
pub(crate) fn si_to_st(si: i64) -> f64 {
    si as f64 / MAX_SIZE as f64 - 1.0
}

pub(crate) fn face_si_ti_to_xyz(face: u8, si: i64, ti: i64) -> Xyz {
    face_uv_to_xyz(face, st_to_uv(si_to_st(si)), st_to_uv(si_to_st(ti)))
}

/// Face and leaf indices of a lat/lon point.
pub(crate) fn lat_lon_to_face_ij(lat: f64, lon: f64) -> (u8, i64, i64) {
    xyz_to_face_ij(lat_lon_to_xyz(lat, lon))
}

pub(crate) fn xyz_to_face_ij(p: Xyz) -> (u8, i64, i64) {
    let face = xyz_to_face(p);
    let (u, v) = face_xyz_to_uv(face, p);
    (face, st_to_ij(uv_to_st(u)), st_to_ij(uv_to_st(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_centers() {
        assert_eq!(xyz_to_face(lat_lon_to_xyz(0.0, 0.0)), 0);
        assert_eq!(xyz_to_face(lat_lon_to_xyz(0.0, 90.0)), 1);
        assert_eq!(xyz_to_face(lat_lon_to_xyz(90.0, 0.0)), 2);
        assert_eq!(xyz_to_face(lat_lon_to_xyz(0.0, 180.0)), 3);
        assert_eq!(xyz_to_face(lat_lon_to_xyz(0.0, -90.0)), 4);
        assert_eq!(xyz_to_face(lat_lon_to_xyz(-90.0, 0.0)), 5);
    }

    #[test]
    fn test_ties_prefer_x_then_y() {
        assert_eq!(xyz_to_face(Xyz { x: 1.0, y: 1.0, z: 1.0 }), 0);
        assert_eq!(xyz_to_face(Xyz { x: 0.5, y: -1.0, z: 1.0 }), 4);
    }

    #[test]
    fn test_uv_xyz_round_trip_every_face() {
        for face in 0..6 {
            let p = face_uv_to_xyz(face, 0.3, -0.7);
            assert_eq!(xyz_to_face(p), face);
            let (u, v) = face_xyz_to_uv(face, p);
            assert!((u - 0.3).abs() < 1e-15);
            assert!((v + 0.7).abs() < 1e-15);
        }
    }

    #[test]
    fn test_quadratic_warp() {
        for &u in &[-1.0, -0.5, -0.1, 0.0, 0.2, 0.75, 1.0] {
            let s = uv_to_st(u);
            assert!((-1.0..=1.0).contains(&s));
            assert!((st_to_uv(s) - u).abs() < 1e-15);
        }
        assert_eq!(uv_to_st(1.0), 1.0);
        assert_eq!(uv_to_st(-1.0), -1.0);
        // Warp expands the face center relative to a linear mapping
        assert!(uv_to_st(0.1) > 0.1);
    }

    #[test]
    fn test_st_to_ij_clamps() {
        assert_eq!(st_to_ij(-1.0), 0);
        assert_eq!(st_to_ij(-2.0), 0);
        assert_eq!(st_to_ij(1.0), MAX_SIZE - 1);
        assert_eq!(st_to_ij(0.0), MAX_SIZE / 2);
    }

    #[test]
    fn test_lat_lon_round_trip() {
        for &(lat, lon) in &[(0.0, 0.0), (51.5, -0.12), (-33.9, 151.2), (89.99, 45.0)] {
            let (lat2, lon2) = xyz_to_lat_lon(lat_lon_to_xyz(lat, lon));
            assert!((lat - lat2).abs() < 1e-9);
            assert!((lon - lon2).abs() < 1e-9);
        }
    }
}
