pub mod constants;
mod codec;
mod hilbert;
mod identifier;
mod projection;

pub use codec::{decode, decode_bounds, encode, encode_id, get_neighbors};
pub(crate) use codec::{cell_bounds, cell_center, neighbor_ids};
pub use constants::{MAX_LEVEL, NUM_FACES, POLE_BOUNDS_LATITUDE, TOKEN_LENGTH};
pub use identifier::CellId;
