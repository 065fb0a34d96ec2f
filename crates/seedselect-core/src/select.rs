use crate::{
    derive_fingerprint, derive_fingerprint_with, xor_distance_low64, BoundedTopN, Fingerprint,
    FingerprintHasher, KeyWidth, SelectionError, SelectionOptions, WideDistance,
};

/// Selects the `n` candidates closest to the round fingerprint.
///
/// Uses the pooled SHA-256 hasher and default [`SelectionOptions`]. A ranked
/// result is ordered closest first and does not depend on the order of
/// `candidates`.
///
/// * An empty candidate list yields an empty result.
/// * When `n >= candidates.len()` the candidates are returned unchanged, in
///   input order, without computing any distance.
/// * `n == 0` yields an empty result.
///
/// ```
/// # use seedselect_core::select;
/// let peers = ["peer1", "peer2", "peer3", "peer4", "peer5"];
/// let selected = select("test", b"test-seed", 1, 3, &peers)?;
/// assert_eq!(selected, vec!["peer5", "peer4", "peer1"]);
/// # Ok::<(), seedselect_core::SelectionError>(())
/// ```
pub fn select<T>(
    name: &str,
    seed: &[u8],
    sequence: u64,
    n: usize,
    candidates: &[T],
) -> Result<Vec<T>, SelectionError>
where
    T: AsRef<[u8]> + Clone,
{
    if let Some(shortcut) = degenerate(n, candidates) {
        return Ok(shortcut);
    }
    let fingerprint = derive_fingerprint(name, seed, sequence);
    Ok(rank(&fingerprint, &SelectionOptions::default(), n, candidates))
}

/// Like [`select`], with an explicit hasher and options.
///
/// The hasher is only touched when ranking is actually required; a hasher
/// failure aborts the call and no partial result is produced.
///
/// ```
/// # use seedselect_core::{select_with, KeyWidth, SelectionOptions};
/// let mut hasher = sha2::Sha256::default();
/// let opts = SelectionOptions::default().with_key_width(KeyWidth::Full);
/// let peers = ["peer1", "peer2", "peer3", "peer4", "peer5"];
/// let selected = select_with(&mut hasher, &opts, "test", b"test-seed", 1, 3, &peers)?;
/// assert_eq!(selected.len(), 3);
/// # Ok::<(), seedselect_core::SelectionError>(())
/// ```
pub fn select_with<H, T>(
    hasher: &mut H,
    options: &SelectionOptions,
    name: &str,
    seed: &[u8],
    sequence: u64,
    n: usize,
    candidates: &[T],
) -> Result<Vec<T>, SelectionError>
where
    H: FingerprintHasher + ?Sized,
    T: AsRef<[u8]> + Clone,
{
    if let Some(shortcut) = degenerate(n, candidates) {
        return Ok(shortcut);
    }
    let fingerprint = derive_fingerprint_with(hasher, name, seed, sequence)?;
    Ok(rank(&fingerprint, options, n, candidates))
}

/// Ranks every candidate against an already derived fingerprint.
///
/// Unlike [`select`] this never short-circuits: even when `n` covers the whole
/// list the result comes back sorted by distance.
///
/// ```
/// # use seedselect_core::{derive_fingerprint, rank, SelectionOptions};
/// let fingerprint = derive_fingerprint("test", b"test-seed", 1);
/// let peers = ["peer1", "peer2", "peer3"];
/// let ranked = rank(&fingerprint, &SelectionOptions::default(), 3, &peers);
/// assert_eq!(ranked, vec!["peer1", "peer3", "peer2"]);
/// ```
#[must_use]
pub fn rank<T>(
    fingerprint: &Fingerprint,
    options: &SelectionOptions,
    n: usize,
    candidates: &[T],
) -> Vec<T>
where
    T: AsRef<[u8]> + Clone,
{
    tracing::debug!(
        fingerprint = %fingerprint,
        candidates = candidates.len(),
        n,
        key_width = %options.key_width(),
        "ranking candidates"
    );
    let fp = fingerprint.as_bytes();
    match options.key_width() {
        KeyWidth::Low64 => {
            collect_top(n, candidates, |candidate| xor_distance_low64(fp, candidate))
        }
        KeyWidth::Full => {
            collect_top(n, candidates, |candidate| WideDistance::between(fp, candidate))
        }
    }
}

fn collect_top<K, T, F>(n: usize, candidates: &[T], distance: F) -> Vec<T>
where
    K: Ord,
    T: AsRef<[u8]> + Clone,
    F: Fn(&[u8]) -> K,
{
    let mut top = BoundedTopN::new(n.min(candidates.len()));
    for candidate in candidates {
        let key = distance(candidate.as_ref());
        if let Some((worst, _)) = top.peek_worst() {
            if top.len() == top.capacity() && key > *worst {
                continue;
            }
        }
        top.offer(key, candidate.clone());
    }
    top.into_sorted()
}

fn degenerate<T: Clone>(n: usize, candidates: &[T]) -> Option<Vec<T>> {
    if candidates.is_empty() || n == 0 {
        return Some(Vec::new());
    }
    if n >= candidates.len() {
        tracing::trace!(candidates = candidates.len(), n, "selection covers every candidate");
        return Some(candidates.to_vec());
    }
    None
}
