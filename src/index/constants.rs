/// Maximum subdivision level; level-30 cells are roughly 1 cm across
pub const MAX_LEVEL: u8 = 30;

/// Number of cube faces
pub const NUM_FACES: u8 = 6;

/// Bits used for the face number at the top of an identifier
pub(crate) const FACE_BITS: u32 = 3;

/// Bits below the face: 2 per level plus the sentinel
pub(crate) const POS_BITS: u32 = 2 * MAX_LEVEL as u32 + 1;

/// Leaf cells per face edge
pub(crate) const MAX_SIZE: i64 = 1 << MAX_LEVEL;

/// Bits of i (and of j) consumed per Hilbert table lookup
pub(crate) const LOOKUP_BITS: u32 = 4;

/// Orientation flag: i and j are swapped
pub(crate) const SWAP_MASK: u32 = 0x01;

/// Orientation flag: i and j are inverted
pub(crate) const INVERT_MASK: u32 = 0x02;

/// Hex characters in a zero-padded token
pub const TOKEN_LENGTH: usize = 16;

/// Cell corners above (below the negative of) this latitude are treated as touching the pole
pub const POLE_BOUNDS_LATITUDE: f64 = 89.9;

/// Level-0 face rectangles as `[min_lat, max_lat, min_lon, max_lon]`.
///
/// Faces 2 and 5 are the polar caps; face 3 straddles the antimeridian and so is
/// given the full longitude span.
pub const FACE_BOUNDS: [[f64; 4]; 6] = [
    [-45.0, 45.0, -45.0, 45.0],
    [-45.0, 45.0, 45.0, 135.0],
    [35.264389682754654, 90.0, -180.0, 180.0],
    [-45.0, 45.0, -180.0, 180.0],
    [-45.0, 45.0, -135.0, -45.0],
    [-90.0, -35.264389682754654, -180.0, 180.0],
];
