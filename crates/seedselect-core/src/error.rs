use thiserror::Error;

/// Failure reported by a [`FingerprintHasher`](crate::FingerprintHasher).
///
/// The built-in SHA-256 hasher never fails. Caller-supplied hashers (for
/// example ones backed by a hardware module) use this to surface their
/// failures instead of panicking.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("hash computation failed: {message}")]
pub struct HashError {
    message: String,
}

impl HashError {
    /// Creates a new error carrying a human readable description.
    ///
    /// ```
    /// # use seedselect_core::HashError;
    /// let err = HashError::new("device unavailable");
    /// assert_eq!(err.to_string(), "hash computation failed: device unavailable");
    /// ```
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// Returns the description supplied by the hasher.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors returned by the selection entry points.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// The fingerprint could not be derived because the hasher failed.
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Errors emitted while generating a random seed.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The operating system random source could not be read.
    #[error("failed to read from the OS random source: {0}")]
    Rng(#[from] rand::Error),
}
