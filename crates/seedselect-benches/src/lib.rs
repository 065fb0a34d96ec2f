//! Benchmark helpers for `seedselect-core`.
//!
//! Peer sets are made of hex-encoded 32-byte identifiers drawn from the OS
//! random source, mirroring how validator or builder IDs are usually passed
//! around.
//!
//! # Examples
//!
//! ```
//! let peers = seedselect_benches::generate_peerset(4)?;
//! assert_eq!(peers.len(), 4);
//! assert!(peers.iter().all(|peer| peer.len() == 64));
//! # Ok::<(), anyhow::Error>(())
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use anyhow::Context;

/// Width in bytes of a generated peer identifier before hex encoding.
pub const PEER_ID_BYTES: usize = 32;

/// `(n, p)` pairs benchmarked by default: select `n` out of `p` peers.
pub const SCENARIOS: &[(usize, usize)] = &[
    (10, 100),
    (10, 1_000),
    (10, 10_000),
    (10, 100_000),
    (100, 1_000),
    (100, 10_000),
    (100, 100_000),
];

/// Generates `count` random hex-encoded peer identifiers.
pub fn generate_peerset(count: usize) -> anyhow::Result<Vec<String>> {
    (0..count)
        .map(|_| {
            seedselect_core::generate_seed(PEER_ID_BYTES)
                .map(hex::encode)
                .context("failed to generate peer id")
        })
        .collect()
}

/// Deterministic peer identifiers, useful when benchmark inputs must be stable.
///
/// ```
/// let peers = seedselect_benches::sequential_peerset(3);
/// assert_eq!(peers, vec!["peer0", "peer1", "peer2"]);
/// ```
#[must_use]
pub fn sequential_peerset(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("peer{i}")).collect()
}
