use std::cmp::Ordering;

/// XORs two big-endian integers of arbitrary width.
///
/// The shorter operand is padded with leading zero bytes, so the result is as
/// wide as the longer operand.
///
/// ```
/// # use seedselect_core::xor_bytes;
/// assert_eq!(xor_bytes(&[0xff, 0x00], &[0x0f]), vec![0xff, 0x0f]);
/// ```
#[must_use]
pub fn xor_bytes(lhs: &[u8], rhs: &[u8]) -> Vec<u8> {
    let width = lhs.len().max(rhs.len());
    let mut out = vec![0u8; width];
    for (slot, byte) in out.iter_mut().rev().zip(lhs.iter().rev()) {
        *slot = *byte;
    }
    for (slot, byte) in out.iter_mut().rev().zip(rhs.iter().rev()) {
        *slot ^= *byte;
    }
    out
}

/// Low-order 64 bits of the big-endian XOR of `fingerprint` and `candidate`.
///
/// Only the trailing eight bytes of either operand can influence the result,
/// which keeps the computation allocation free.
///
/// ```
/// # use seedselect_core::xor_distance_low64;
/// assert_eq!(xor_distance_low64(&[0xaa; 32], &[0xaa; 32]), 0);
/// assert_eq!(xor_distance_low64(&[0x00, 0x01], b"\x03"), 2);
/// ```
#[must_use]
pub fn xor_distance_low64(fingerprint: &[u8], candidate: &[u8]) -> u64 {
    low64(fingerprint) ^ low64(candidate)
}

fn low64(bytes: &[u8]) -> u64 {
    let tail = &bytes[bytes.len().saturating_sub(8)..];
    let mut buf = [0u8; 8];
    buf[8 - tail.len()..].copy_from_slice(tail);
    u64::from_be_bytes(buf)
}

/// Full-width XOR distance, ordered as an unsigned big-endian integer.
///
/// Leading zero bytes are stripped on construction so that operands of
/// different widths compare numerically.
///
/// ```
/// # use seedselect_core::WideDistance;
/// let near = WideDistance::between(&[0x10, 0x00], &[0x10, 0x01]);
/// let far = WideDistance::between(&[0x10, 0x00], &[0x01, 0x10, 0x00]);
/// assert!(near < far);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WideDistance(Vec<u8>);

impl WideDistance {
    /// Computes the distance between a fingerprint and a candidate.
    #[must_use]
    pub fn between(fingerprint: &[u8], candidate: &[u8]) -> Self {
        let mut xor = xor_bytes(fingerprint, candidate);
        let leading = xor.iter().take_while(|byte| **byte == 0).count();
        xor.drain(..leading);
        Self(xor)
    }

    /// Significant bytes of the distance (no leading zeros).
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns `true` when fingerprint and candidate are numerically equal.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }
}

impl Ord for WideDistance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.len().cmp(&other.0.len()).then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for WideDistance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::{collection::vec, prelude::*};

    fn to_u128(bytes: &[u8]) -> u128 {
        bytes.iter().fold(0u128, |acc, byte| (acc << 8) | u128::from(*byte))
    }

    #[test]
    fn xor_pads_shorter_operand() {
        assert_eq!(xor_bytes(&[], &[1, 2, 3]), vec![1, 2, 3]);
        assert_eq!(xor_bytes(&[1, 2, 3], &[]), vec![1, 2, 3]);
        assert_eq!(xor_bytes(&[0xf0, 0x0f], &[0xff, 0xff]), vec![0x0f, 0xf0]);
        assert!(xor_bytes(&[], &[]).is_empty());
    }

    #[test]
    fn low64_keeps_trailing_bytes_only() {
        let fingerprint = [0xffu8; 32];
        let mut candidate = [0xffu8; 32];
        candidate[0] = 0x00;
        assert_eq!(xor_distance_low64(&fingerprint, &candidate), 0);

        candidate[31] = 0xfe;
        assert_eq!(xor_distance_low64(&fingerprint, &candidate), 1);
    }

    #[test]
    fn low64_of_short_candidate() {
        let fingerprint = hex_bytes("0cd06b1d938c77d8118a523d58173976cdd9ae436a7868664cb9abdfc4f8d29d");
        assert_eq!(xor_distance_low64(&fingerprint, b"peer1"), 0x4cb9_abaf_a19d_a0ac);
        assert_eq!(xor_distance_low64(&fingerprint, b"peer5"), 0x4cb9_abaf_a19d_a0a8);
    }

    #[test]
    fn wide_distance_strips_leading_zeros() {
        let distance = WideDistance::between(&[0xab, 0x01], &[0xab, 0x00]);
        assert_eq!(distance.as_bytes(), &[0x01]);
        assert!(WideDistance::between(b"same", b"same").is_zero());
    }

    fn hex_bytes(text: &str) -> Vec<u8> {
        hex::decode(text).unwrap()
    }

    proptest! {
        #[test]
        fn low64_matches_integer_xor(a in vec(any::<u8>(), 0..8), b in vec(any::<u8>(), 0..8)) {
            let expected = (to_u128(&a) ^ to_u128(&b)) as u64;
            prop_assert_eq!(xor_distance_low64(&a, &b), expected);
        }

        #[test]
        fn wide_order_matches_integer_order(
            fp in vec(any::<u8>(), 0..16),
            a in vec(any::<u8>(), 0..16),
            b in vec(any::<u8>(), 0..16),
        ) {
            let lhs = to_u128(&fp) ^ to_u128(&a);
            let rhs = to_u128(&fp) ^ to_u128(&b);
            prop_assert_eq!(
                WideDistance::between(&fp, &a).cmp(&WideDistance::between(&fp, &b)),
                lhs.cmp(&rhs)
            );
        }
    }
}
