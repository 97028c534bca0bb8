use crate::error::{Result, S2CoverError};
use crate::index::constants::{MAX_LEVEL, NUM_FACES, POS_BITS, TOKEN_LENGTH};
use crate::index::hilbert::{face_ij_to_id, id_to_face_ij};
use std::fmt;
use std::str::FromStr;

/// Mask of every even bit position a sentinel may occupy.
const SENTINEL_POSITIONS: u64 = 0x1555_5555_5555_5555;

/// A 64-bit hierarchical cell identifier.
///
/// # Binary Format
///
/// | Bits      | Field    | Description                                              |
/// |-----------|----------|----------------------------------------------------------|
/// | 63..61    | Face     | Cube face (0-5)                                          |
/// | 60..      | Position | Hilbert curve position, 2 bits per level, coarse first   |
/// | 2×(30−L)  | Sentinel | Single set bit marking level `L`                         |
/// | below     | Zero     | Always clear                                             |
///
/// Sorting identifiers numerically walks the Hilbert curve, so cells that are
/// close on the ground usually get close identifiers. All leaf identifiers under
/// a cell fall in `range_min()..=range_max()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(u64);

impl CellId {
    /// Wraps a raw value, rejecting anything that is not a valid cell.
    pub fn new(id: u64) -> Result<Self> {
        let cell = Self(id);
        if cell.is_valid() {
            Ok(cell)
        } else {
            Err(S2CoverError::InvalidToken(format!("{:016x}", id)))
        }
    }

    pub(crate) fn from_face_ij(face: u8, i: i64, j: i64) -> Self {
        Self(face_ij_to_id(face, i, j))
    }

    /// Parses a token: 1-16 hex characters, implicitly right-padded with zeros.
    ///
    /// # Example
    /// ```
    /// use s2cover_rs::CellId;
    ///
    /// let id = CellId::from_token("89c25").unwrap();
    /// assert_eq!(id.id(), 0x89c2_5000_0000_0000);
    /// assert_eq!(id.to_token(), "89c25");
    /// ```
    ///
    /// # Errors
    ///
    /// [`S2CoverError::InvalidToken`] when the token is empty, longer than 16
    /// characters, contains a non-hex character, or does not decode to a valid cell.
    pub fn from_token(token: &str) -> Result<Self> {
        let invalid = || S2CoverError::InvalidToken(token.to_string());

        if token.is_empty()
            || token.len() > TOKEN_LENGTH
            || !token.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(invalid());
        }

        let digits = u64::from_str_radix(token, 16).map_err(|_| invalid())?;
        let id = digits << (4 * (TOKEN_LENGTH - token.len()) as u32);
        CellId::new(id).map_err(|_| invalid())
    }

    /// Lowercase hex with trailing zeros stripped.
    pub fn to_token(&self) -> String {
        let padded = format!("{:016x}", self.0);
        padded.trim_end_matches('0').to_string()
    }

    pub fn id(&self) -> u64 {
        self.0
    }

    /// Face bits in range, and exactly one sentinel at an even position.
    pub fn is_valid(&self) -> bool {
        self.face() < NUM_FACES && (self.lsb() & SENTINEL_POSITIONS) != 0
    }

    pub fn face(&self) -> u8 {
        (self.0 >> POS_BITS) as u8
    }

    /// Lowest set bit, i.e. the sentinel.
    pub fn lsb(&self) -> u64 {
        self.0 & self.0.wrapping_neg()
    }

    pub fn level(&self) -> u8 {
        MAX_LEVEL - (self.0.trailing_zeros() / 2) as u8
    }

    pub fn is_leaf(&self) -> bool {
        self.0 & 1 != 0
    }

    pub fn is_face(&self) -> bool {
        self.level() == 0
    }

    /// Ancestor at `level`, found by moving the sentinel up.
    ///
    /// `level` must not exceed this cell's level.
    pub fn parent(&self, level: u8) -> Result<Self> {
        if level > self.level() {
            return Err(S2CoverError::InvalidLevel(level));
        }
        Ok(self.truncate(level))
    }

    /// Ancestor at `level` without the range check; callers guarantee
    /// `level <= self.level()`.
    pub(crate) fn truncate(self, level: u8) -> Self {
        let new_lsb = lsb_for_level(level);
        Self((self.0 & new_lsb.wrapping_neg()) | new_lsb)
    }

    /// Smallest leaf identifier under this cell.
    pub fn range_min(&self) -> Self {
        Self(self.0 - (self.lsb() - 1))
    }

    /// Largest leaf identifier under this cell.
    pub fn range_max(&self) -> Self {
        Self(self.0 + (self.lsb() - 1))
    }

    /// True if `other` is this cell or one of its descendants.
    pub fn contains(&self, other: &CellId) -> bool {
        other.0 >= self.range_min().0 && other.0 <= self.range_max().0
    }

    /// Face and the leaf `(i, j)` this identifier spells out.
    pub(crate) fn to_face_ij(self) -> (u8, i64, i64) {
        id_to_face_ij(self.0)
    }
}

/// Sentinel bit for cells at `level`.
fn lsb_for_level(level: u8) -> u64 {
    1u64 << (2 * (MAX_LEVEL - level) as u32)
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_token())
    }
}

impl FromStr for CellId {
    type Err = S2CoverError;

    fn from_str(s: &str) -> Result<Self> {
        CellId::from_token(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_cells() -> Result<()> {
        let tokens = ["1", "3", "5", "7", "9", "b"];
        for (face, token) in tokens.iter().enumerate() {
            let id = CellId::from_token(token)?;
            assert_eq!(id.face(), face as u8);
            assert_eq!(id.level(), 0);
            assert!(id.is_face());
            assert_eq!(id.to_token(), *token);
        }
        Ok(())
    }

    #[test]
    fn test_token_padding_round_trip() -> Result<()> {
        let raw = 0x89c2_5a31_0000_0000u64;
        let id = CellId::new(raw)?;
        let token = id.to_token();
        assert_eq!(token, "89c25a31");

        let padded = format!("{:0<16}", token);
        assert_eq!(u64::from_str_radix(&padded, 16).unwrap(), raw);
        assert_eq!(CellId::from_token(&token)?, id);
        Ok(())
    }

    #[test]
    fn test_uppercase_token_is_accepted_and_canonicalised() -> Result<()> {
        let id = CellId::from_token("89C25")?;
        assert_eq!(id.to_token(), "89c25");
        Ok(())
    }

    #[test]
    fn test_invalid_tokens() {
        for bad in ["", "xyz", "0", "c", "f", "89c25 ", "1234567890abcdef0", "-1"] {
            let result = CellId::from_token(bad);
            assert!(
                matches!(result, Err(S2CoverError::InvalidToken(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_sentinel_must_sit_on_even_bit() {
        // 0x2 puts the lowest set bit at position 1
        assert!(CellId::new(0x2).is_err());
        assert!(CellId::new(0x1).is_ok());
        assert!(CellId::new(0x4).is_ok());
    }

    #[test]
    fn test_level_from_sentinel() -> Result<()> {
        let leaf = CellId::from_face_ij(3, 123, 456);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.level(), 30);

        for level in [0u8, 1, 10, 29, 30] {
            let p = leaf.parent(level)?;
            assert_eq!(p.level(), level);
            assert_eq!(p.face(), 3);
            assert!(p.contains(&leaf));
        }
        Ok(())
    }

    #[test]
    fn test_parent_rejects_finer_level() -> Result<()> {
        let cell = CellId::from_token("89c25")?;
        assert!(matches!(
            cell.parent(cell.level() + 1),
            Err(S2CoverError::InvalidLevel(_))
        ));
        Ok(())
    }

    #[test]
    fn test_range_bounds() -> Result<()> {
        let face = CellId::from_token("1")?;
        assert_eq!(face.range_min().id(), 1);
        assert_eq!(face.range_max().id(), (1u64 << 61) - 1);
        assert!(face.range_min().is_leaf());
        assert!(face.range_max().is_leaf());
        Ok(())
    }

    #[test]
    fn test_display_and_from_str() -> Result<()> {
        let id: CellId = "89c25".parse()?;
        assert_eq!(id.to_string(), "89c25");
        Ok(())
    }
}
