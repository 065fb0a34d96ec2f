//! Deterministic, coordination-free selection of `n` identifiers per round.
//!
//! Every participant that agrees on a `(name, seed, sequence)` triple derives
//! the same fingerprint, ranks candidates by their XOR distance to it and
//! therefore arrives at the same ordered subset without exchanging messages.
//!
//! ```
//! use seedselect_core::{derive_fingerprint, select};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fingerprint = derive_fingerprint("test", b"seed", 1);
//!     assert_eq!(fingerprint.len(), 32);
//!
//!     let peers = vec!["peer1", "peer2", "peer3", "peer4", "peer5"];
//!     let leaders = select("test", b"test-seed", 1, 3, &peers)?;
//!     assert_eq!(leaders, vec!["peer5", "peer4", "peer1"]);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod distance;
mod error;
mod hash;
mod options;
mod seed;
mod select;
mod top_n;

pub use distance::{xor_bytes, xor_distance_low64, WideDistance};
pub use error::{HashError, SeedError, SelectionError};
pub use hash::{derive_fingerprint, derive_fingerprint_with, Fingerprint, FingerprintHasher};
pub use options::{KeyWidth, SelectionOptions};
pub use seed::generate_seed;
pub use select::{rank, select, select_with};
pub use top_n::BoundedTopN;

/// Returns the semantic version of the `seedselect-core` crate.
///
/// ```
/// assert!(!seedselect_core::version().is_empty());
/// ```
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
