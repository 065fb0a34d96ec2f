use rand::rngs::OsRng;
use rand::RngCore;

use crate::SeedError;

/// Generates `size` bytes of seed material from the operating system CSPRNG.
///
/// ```
/// let seed = seedselect_core::generate_seed(32)?;
/// assert_eq!(seed.len(), 32);
/// # Ok::<(), seedselect_core::SeedError>(())
/// ```
pub fn generate_seed(size: usize) -> Result<Vec<u8>, SeedError> {
    let mut seed = vec![0u8; size];
    OsRng.try_fill_bytes(&mut seed)?;
    tracing::trace!(size, "generated seed from OS random source");
    Ok(seed)
}
