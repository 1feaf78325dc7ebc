pub mod analyzer;
pub mod codec;
pub mod differential;
pub mod error;
pub mod gc_balance;
pub mod mapping;
pub mod rll;
pub mod symbol;
pub mod vt;

pub use codec::{decode, encode, Params};
pub use error::{EditKind, HelixError};
