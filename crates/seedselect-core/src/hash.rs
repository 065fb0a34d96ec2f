use std::cell::RefCell;
use std::fmt;

use sha2::digest::{Digest, FixedOutputReset};
use sha2::Sha256;

use crate::HashError;

/// Streaming hash capability used to derive round fingerprints.
///
/// Any [`Digest`] that can finalize and reset in place implements this
/// trait infallibly, so `sha2::Sha256`, `sha2::Sha512` and friends can be
/// handed to [`derive_fingerprint_with`] directly.
///
/// ```
/// # use seedselect_core::derive_fingerprint_with;
/// let mut hasher = sha2::Sha512::default();
/// let fingerprint = derive_fingerprint_with(&mut hasher, "test", b"seed", 1)?;
/// assert_eq!(fingerprint.len(), 64);
/// # Ok::<(), seedselect_core::HashError>(())
/// ```
pub trait FingerprintHasher {
    /// Feeds `data` into the running hash state.
    fn update(&mut self, data: &[u8]) -> Result<(), HashError>;

    /// Produces the digest and returns the hasher to its initial state.
    fn finalize_reset(&mut self) -> Result<Vec<u8>, HashError>;
}

impl<D> FingerprintHasher for D
where
    D: Digest + FixedOutputReset,
{
    fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        Digest::update(self, data);
        Ok(())
    }

    fn finalize_reset(&mut self) -> Result<Vec<u8>, HashError> {
        Ok(Digest::finalize_reset(self).to_vec())
    }
}

thread_local! {
    static POOLED_SHA256: RefCell<Sha256> = RefCell::new(Sha256::new());
}

/// Digest anchoring the XOR-distance ranking of a single round.
///
/// The fingerprint depends only on the `(name, seed, sequence)` triple; it is
/// interpreted as an unsigned big-endian integer when computing distances.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(Vec<u8>);

impl Fingerprint {
    /// Wraps raw digest bytes.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the digest width in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for a zero-width digest.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hexadecimal rendering of the digest.
    ///
    /// ```
    /// # use seedselect_core::derive_fingerprint;
    /// let fingerprint = derive_fingerprint("test", b"seed", 1);
    /// assert_eq!(
    ///     fingerprint.to_hex(),
    ///     "468460ee3c32ca9574f91f213853d0b0aece116aa74b71ab66bb7a9c558b2b7c"
    /// );
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Consumes the fingerprint and returns the digest bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for Fingerprint {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Fingerprint").field(&self.to_hex()).finish()
    }
}

/// Derives the round fingerprint with the pooled SHA-256 hasher.
///
/// Hashes `name || seed || decimal(sequence)` with no delimiters. Each thread
/// keeps one SHA-256 instance that is finalized and reset on every call, so
/// no state is shared between concurrent callers.
///
/// ```
/// # use seedselect_core::derive_fingerprint;
/// let fingerprint = derive_fingerprint("", b"seed", 1);
/// assert_eq!(
///     fingerprint.to_hex(),
///     "df9ecf4c79e5ad77701cfc88c196632b353149d85810a381f469f8fc05dc1b92"
/// );
/// ```
#[must_use]
pub fn derive_fingerprint(name: &str, seed: &[u8], sequence: u64) -> Fingerprint {
    POOLED_SHA256.with(|cell| {
        let mut hasher = cell.borrow_mut();
        Digest::update(&mut *hasher, name.as_bytes());
        Digest::update(&mut *hasher, seed);
        Digest::update(&mut *hasher, sequence.to_string().as_bytes());
        Fingerprint(Digest::finalize_reset(&mut *hasher).to_vec())
    })
}

/// Derives the round fingerprint with a caller-supplied hasher.
///
/// The hasher is used exclusively for this call. On success it is left reset;
/// on failure the error is returned unchanged and the hasher's state is
/// whatever the implementation left behind.
pub fn derive_fingerprint_with<H>(
    hasher: &mut H,
    name: &str,
    seed: &[u8],
    sequence: u64,
) -> Result<Fingerprint, HashError>
where
    H: FingerprintHasher + ?Sized,
{
    hasher.update(name.as_bytes())?;
    hasher.update(seed)?;
    hasher.update(sequence.to_string().as_bytes())?;
    let digest = hasher.finalize_reset()?;
    tracing::trace!(width = digest.len(), "derived fingerprint with caller hasher");
    Ok(Fingerprint(digest))
}
