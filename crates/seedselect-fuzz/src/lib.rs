//! Fuzzing harnesses for `seedselect-core`.
//!
//! Each public function accepts raw bytes, decodes a selection request out of
//! them with [`arbitrary`] and checks the invariants every selection must
//! uphold. Violations panic so that `cargo fuzz` records them as crashes;
//! inputs too short to decode are ignored.
//!
//! # Examples
//!
//! ```
//! seedselect_fuzz::fuzz_select(b"some fuzz input bytes");
//! ```
//!
//! ```
//! seedselect_fuzz::fuzz_top_n(&[3, 1, 4, 1, 5, 9, 2, 6]);
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use arbitrary::{Arbitrary, Unstructured};
use seedselect_core::{
    derive_fingerprint, rank, select, xor_distance_low64, BoundedTopN, KeyWidth,
    SelectionOptions, WideDistance,
};

const MAX_CANDIDATES: u8 = 32;
const MAX_CANDIDATE_LEN: u8 = 40;
const MAX_N: u8 = 40;

#[derive(Debug)]
struct Request {
    name: String,
    seed: Vec<u8>,
    sequence: u64,
    n: usize,
    candidates: Vec<Vec<u8>>,
}

impl<'a> Arbitrary<'a> for Request {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let name = String::arbitrary(u)?;
        let seed = Vec::<u8>::arbitrary(u)?;
        let sequence = u.arbitrary()?;
        let n = usize::from(u.int_in_range::<u8>(0..=MAX_N)?);
        let count = usize::from(u.int_in_range::<u8>(0..=MAX_CANDIDATES)?);
        let mut candidates = Vec::with_capacity(count);
        for _ in 0..count {
            let len = usize::from(u.int_in_range::<u8>(0..=MAX_CANDIDATE_LEN)?);
            candidates.push(u.bytes(len)?.to_vec());
        }
        Ok(Self { name, seed, sequence, n, candidates })
    }
}

/// Runs a decoded selection request and asserts the selection invariants.
///
/// Checks the size contract, pass-through behavior, membership of every
/// selected item, determinism across calls and independence from input order.
///
/// ```
/// seedselect_fuzz::fuzz_select(b"selection");
/// ```
pub fn fuzz_select(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Ok(request) = Request::arbitrary(&mut unstructured) else {
        return;
    };
    let Request { name, seed, sequence, n, candidates } = request;

    let selected =
        select(&name, &seed, sequence, n, &candidates).expect("pooled hasher is infallible");
    assert_eq!(selected.len(), n.min(candidates.len()));
    if n >= candidates.len() {
        assert_eq!(selected, candidates);
        return;
    }
    for item in &selected {
        assert!(candidates.contains(item), "selected item was not a candidate");
    }

    let again =
        select(&name, &seed, sequence, n, &candidates).expect("pooled hasher is infallible");
    assert_eq!(again, selected);

    let mut reversed = candidates.clone();
    reversed.reverse();
    let shuffled =
        select(&name, &seed, sequence, n, &reversed).expect("pooled hasher is infallible");
    assert_eq!(shuffled, selected);
}

/// Compares [`BoundedTopN`] against a full sort for arbitrary keyed items.
///
/// ```
/// seedselect_fuzz::fuzz_top_n(b"heap");
/// ```
pub fn fuzz_top_n(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Ok(capacity) = unstructured.int_in_range::<u8>(0..=MAX_N) else {
        return;
    };
    let Ok(keys) = Vec::<u16>::arbitrary(&mut unstructured) else {
        return;
    };
    let items: Vec<(u16, [u8; 4])> =
        keys.into_iter().enumerate().map(|(i, key)| (key, (i as u32).to_be_bytes())).collect();

    let mut top = BoundedTopN::new(usize::from(capacity));
    for (key, item) in &items {
        top.offer(*key, *item);
    }
    let mut expected = items;
    expected.sort_unstable();
    expected.truncate(usize::from(capacity));
    assert_eq!(top.into_sorted_entries(), expected);
}

/// Checks that both key widths yield ascending distances.
///
/// ```
/// seedselect_fuzz::fuzz_ranking(b"ranking");
/// ```
pub fn fuzz_ranking(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Ok(request) = Request::arbitrary(&mut unstructured) else {
        return;
    };
    let fingerprint =
        derive_fingerprint(&request.name, &request.seed, request.sequence);
    let fp = fingerprint.as_bytes();

    let narrow = rank(&fingerprint, &SelectionOptions::default(), request.n, &request.candidates);
    let keys: Vec<u64> = narrow.iter().map(|c| xor_distance_low64(fp, c)).collect();
    assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));

    let options = SelectionOptions::default().with_key_width(KeyWidth::Full);
    let wide = rank(&fingerprint, &options, request.n, &request.candidates);
    let keys: Vec<WideDistance> = wide.iter().map(|c| WideDistance::between(fp, c)).collect();
    assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_harness_runs() {
        fuzz_select(b"select harness input with enough bytes to decode a few candidates");
    }

    #[test]
    fn top_n_harness_runs() {
        fuzz_top_n(&[4, 9, 0, 3, 0, 7, 0, 1, 0, 3, 0]);
    }

    #[test]
    fn ranking_harness_runs() {
        fuzz_ranking(b"ranking harness input");
    }

    #[test]
    fn empty_input_is_ignored() {
        fuzz_select(&[]);
        fuzz_top_n(&[]);
        fuzz_ranking(&[]);
    }
}
