//! Shared helpers for the integration test suites.

use srt_core::sequence::SeqNumber;

/// Shorthand for building sequence numbers in tests.
pub fn seq(n: u32) -> SeqNumber {
    SeqNumber::new(n)
}

/// Assert that a loss list is fully drained: zero length and no pops left.
pub fn assert_drained(list: &srt_core::loss::SenderLossList) {
    assert_eq!(list.len(), 0);
    assert_eq!(list.pop_front(), None);
    assert!(list.is_empty());
}
