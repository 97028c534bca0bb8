//! Hilbert-curve interleaving of `(face, i, j)` into a 64-bit identifier.
//!
//! Each lookup consumes 4 bits of `i` and 4 bits of `j` together with the current
//! curve orientation, and yields 8 bits of curve position plus the orientation to
//! use for the next, finer, block of bits.

use crate::index::constants::{
    FACE_BITS, INVERT_MASK, LOOKUP_BITS, MAX_LEVEL, POS_BITS, SWAP_MASK,
};
use std::sync::LazyLock;

const TABLE_SIZE: usize = 1 << (2 * LOOKUP_BITS + 2);

/// Sub-quadrant `(i << 1 | j)` visited at each curve position, per orientation.
const POS_TO_IJ: [[u32; 4]; 4] = [
    [0, 1, 3, 2], // canonical
    [0, 2, 3, 1], // swapped
    [3, 2, 0, 1], // inverted
    [3, 1, 0, 2], // swapped and inverted
];

/// Orientation change applied when descending into each curve position.
const POS_TO_ORIENTATION: [u32; 4] = [SWAP_MASK, 0, 0, INVERT_MASK | SWAP_MASK];

struct LookupTables {
    /// `(ij << 2 | orientation)` → `(pos << 2 | orientation)`
    pos: [u16; TABLE_SIZE],
    /// `(pos << 2 | orientation)` → `(ij << 2 | orientation)`
    ij: [u16; TABLE_SIZE],
}

static TABLES: LazyLock<LookupTables> = LazyLock::new(build_tables);

fn build_tables() -> LookupTables {
    let mut tables = LookupTables {
        pos: [0; TABLE_SIZE],
        ij: [0; TABLE_SIZE],
    };
    for orientation in [0, SWAP_MASK, INVERT_MASK, SWAP_MASK | INVERT_MASK] {
        fill_lookup_cell(&mut tables, 0, 0, 0, orientation, 0, orientation);
    }
    tables
}

fn fill_lookup_cell(
    tables: &mut LookupTables,
    level: u32,
    i: u32,
    j: u32,
    orig_orientation: u32,
    pos: u32,
    orientation: u32,
) {
    if level == LOOKUP_BITS {
        let ij = (i << LOOKUP_BITS) + j;
        tables.pos[((ij << 2) + orig_orientation) as usize] = ((pos << 2) + orientation) as u16;
        tables.ij[((pos << 2) + orig_orientation) as usize] = ((ij << 2) + orientation) as u16;
        return;
    }

    let r = POS_TO_IJ[orientation as usize];
    for (index, &quadrant) in r.iter().enumerate() {
        fill_lookup_cell(
            tables,
            level + 1,
            (i << 1) + (quadrant >> 1),
            (j << 1) + (quadrant & 1),
            orig_orientation,
            (pos << 2) + index as u32,
            orientation ^ POS_TO_ORIENTATION[index],
        );
    }
}

/// Leaf-cell identifier for `(face, i, j)`.
pub(crate) fn face_ij_to_id(face: u8, i: i64, j: i64) -> u64 {
    let tables = &*TABLES;
    let mask = (1u64 << LOOKUP_BITS) - 1;
    let (i, j) = (i as u64, j as u64);

    let mut n = (face as u64) << (POS_BITS - 1);
    let mut bits = (face as u32 & SWAP_MASK) as u64;

    for k in (0..8u32).rev() {
        bits += ((i >> (k * LOOKUP_BITS)) & mask) << (LOOKUP_BITS + 2);
        bits += ((j >> (k * LOOKUP_BITS)) & mask) << 2;
        bits = tables.pos[bits as usize] as u64;
        n |= (bits >> 2) << (k * 2 * LOOKUP_BITS);
        bits &= (SWAP_MASK | INVERT_MASK) as u64;
    }

    n * 2 + 1
}

/// Face and the `(i, j)` of the leaf cell the identifier's bits spell out.
///
/// For a non-leaf identifier this is a leaf adjacent to the cell center; the
/// sentinel bit is read as an ordinary curve bit.
pub(crate) fn id_to_face_ij(id: u64) -> (u8, i64, i64) {
    let tables = &*TABLES;
    let face = (id >> (POS_BITS)) as u8;
    let lookup_mask = (1u64 << LOOKUP_BITS) - 1;

    let mut bits = (face as u32 & SWAP_MASK) as u64;
    let mut i = 0u64;
    let mut j = 0u64;

    for k in (0..8u32).rev() {
        let nbits = if k == 7 {
            MAX_LEVEL as u32 - 7 * LOOKUP_BITS
        } else {
            LOOKUP_BITS
        };
        bits += ((id >> (k * 2 * LOOKUP_BITS + 1)) & ((1u64 << (2 * nbits)) - 1)) << 2;
        bits = tables.ij[bits as usize] as u64;
        i += (bits >> (LOOKUP_BITS + 2)) << (k * LOOKUP_BITS);
        j += ((bits >> 2) & lookup_mask) << (k * LOOKUP_BITS);
        bits &= (SWAP_MASK | INVERT_MASK) as u64;
    }

    debug_assert!(face < (1 << FACE_BITS));
    (face, i as i64, j as i64)
}
