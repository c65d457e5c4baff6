//! Seat identifiers and per-seat occupancy.
//!
//! Seats are laid out in a single row. Index `i` (zero-based) is addressed as
//! `"A{i+1}"`; the row letter is matched case-insensitively when decoding.

use serde::{Deserialize, Serialize};

/// Row letter of the single seating row.
pub const ROW_LETTER: char = 'A';

/// Occupancy of one seat.
///
/// Transitions are monotonic: `Free -> Taken`, never back.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatState {
    #[default]
    Free,
    Taken,
}

impl SeatState {
    pub fn is_free(self) -> bool {
        matches!(self, SeatState::Free)
    }
}

/// Zero-based seat index to its identifier (`0 -> "A1"`).
pub fn encode(index: usize) -> String {
    format!("{ROW_LETTER}{}", index + 1)
}

/// Seat identifier to its zero-based index, or `None` when the identifier is
/// malformed or outside `1..=capacity`.
///
/// The suffix must be ASCII digits only: no sign, no whitespace.
pub fn decode(id: &str, capacity: usize) -> Option<usize> {
    let mut chars = id.chars();
    let row = chars.next()?;
    if !row.eq_ignore_ascii_case(&ROW_LETTER) {
        return None;
    }

    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Overflowing numbers fail to parse and are rejected like any other.
    let number: usize = digits.parse().ok()?;
    if number == 0 || number > capacity {
        return None;
    }
    Some(number - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encode_is_one_based() {
        assert_eq!(encode(0), "A1");
        assert_eq!(encode(5), "A6");
        assert_eq!(encode(19), "A20");
    }

    #[test]
    fn decode_accepts_lowercase_row() {
        assert_eq!(decode("a3", 6), Some(2));
        assert_eq!(decode("A3", 6), Some(2));
    }

    #[test]
    fn decode_rejects_malformed_tokens() {
        for bad in ["", "A", "B1", "1", "A0", "A-1", "A+1", "A 1", "A1x", "AA1", "A7"] {
            assert_eq!(decode(bad, 6), None, "{bad:?} should be rejected");
        }
    }

    #[test]
    fn decode_rejects_overflowing_numbers() {
        assert_eq!(decode("A99999999999999999999999999", usize::MAX), None);
    }

    #[test]
    fn decode_tolerates_leading_zeros() {
        assert_eq!(decode("A01", 6), Some(0));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: every valid index survives encode/decode.
        #[test]
        fn valid_indices_round_trip(capacity in 1usize..500, seed in any::<usize>()) {
            let index = seed % capacity;
            prop_assert_eq!(decode(&encode(index), capacity), Some(index));
        }

        /// Property: indices at or beyond capacity never decode.
        #[test]
        fn out_of_range_is_rejected(capacity in 1usize..500, extra in 0usize..500) {
            prop_assert_eq!(decode(&encode(capacity + extra), capacity), None);
        }

        /// Property: arbitrary input never panics and only yields in-range indices.
        #[test]
        fn arbitrary_input_is_total(id in ".{0,12}", capacity in 1usize..64) {
            if let Some(index) = decode(&id, capacity) {
                prop_assert!(index < capacity);
            }
        }
    }
}
