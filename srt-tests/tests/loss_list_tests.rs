//! Scenario tests for the sender loss list
//!
//! Exercises insert/pop/remove across every structural case: coalescing,
//! splitting, acknowledged prefixes, capacity limits, and sequence ranges
//! far from (and across) the wrap point.

use srt_core::loss::SenderLossList;
use srt_tests::{assert_drained, seq};

const SIZE: usize = 256;

fn new_list() -> SenderLossList {
    SenderLossList::new(SIZE)
}

#[test]
fn fresh_list_is_empty() {
    let list = new_list();
    assert_eq!(list.capacity(), SIZE);
    assert_drained(&list);
}

//
// insert and pop
//

#[test]
fn insert_pop_one_element() {
    let list = new_list();
    assert_eq!(list.insert(seq(1), seq(1)), 1);
    assert_eq!(list.len(), 1);
    assert_eq!(list.pop_front(), Some(seq(1)));
    assert_drained(&list);
}

#[test]
fn insert_pop_range_element_by_element() {
    let list = new_list();
    assert_eq!(list.insert(seq(1), seq(2)), 2);
    assert_eq!(list.len(), 2);
    assert_eq!(list.pop_front(), Some(seq(1)));
    assert_eq!(list.len(), 1);
    assert_eq!(list.pop_front(), Some(seq(2)));
    assert_drained(&list);
}

#[test]
fn insert_pop_two_separated_elements() {
    let list = new_list();
    assert_eq!(list.insert(seq(1), seq(1)), 1);
    assert_eq!(list.insert(seq(4), seq(4)), 1);
    assert_eq!(list.len(), 2);
    assert_eq!(list.pop_front(), Some(seq(1)));
    assert_eq!(list.len(), 1);
    assert_eq!(list.pop_front(), Some(seq(4)));
    assert_drained(&list);
}

#[test]
fn insert_pop_two_serial_elements() {
    let list = new_list();
    assert_eq!(list.insert(seq(1), seq(1)), 1);
    assert_eq!(list.insert(seq(2), seq(2)), 1);
    assert_eq!(list.len(), 2);
    assert_eq!(list.pop_front(), Some(seq(1)));
    assert_eq!(list.pop_front(), Some(seq(2)));
    assert_drained(&list);
}

#[test]
fn insert_pop_range_and_single() {
    let list = new_list();
    assert_eq!(list.insert(seq(1), seq(2)), 2);
    assert_eq!(list.insert(seq(4), seq(4)), 1);
    assert_eq!(list.len(), 3);
    assert_eq!(list.pop_front(), Some(seq(1)));
    assert_eq!(list.pop_front(), Some(seq(2)));
    assert_eq!(list.pop_front(), Some(seq(4)));
    assert_drained(&list);
}

#[test]
fn out_of_order_inserts_pop_sorted() {
    let list = new_list();
    assert_eq!(list.insert(seq(1), seq(1)), 1);
    assert_eq!(list.insert(seq(4), seq(4)), 1);
    assert_eq!(list.insert(seq(0), seq(0)), 1);
    assert_eq!(list.insert(seq(2), seq(2)), 1);
    assert_eq!(list.len(), 4);
    for expected in [0, 1, 2, 4] {
        assert_eq!(list.pop_front(), Some(seq(expected)));
    }
    assert_drained(&list);
}

#[test]
fn insert_fills_gap_and_coalesces() {
    let list = new_list();
    assert_eq!(list.insert(seq(1), seq(2)), 2);
    assert_eq!(list.insert(seq(4), seq(4)), 1);
    assert_eq!(list.insert(seq(3), seq(3)), 1);
    assert_eq!(list.len(), 4);
    for expected in 1..=4 {
        assert_eq!(list.pop_front(), Some(seq(expected)));
        assert_eq!(list.len(), 4 - expected as usize);
    }
    assert_drained(&list);
}

//
// remove up to an acknowledged sequence number
//

#[test]
fn remove_covering_all_ranges_empties_list() {
    let list = new_list();
    list.insert(seq(1), seq(2));
    list.insert(seq(4), seq(4));
    assert_eq!(list.len(), 3);
    list.remove_up_to(seq(4));
    assert_drained(&list);
}

#[test]
fn remove_at_start_of_trailing_range() {
    let list = new_list();
    list.insert(seq(1), seq(2));
    list.insert(seq(4), seq(5));
    assert_eq!(list.len(), 4);
    list.remove_up_to(seq(4));
    assert_eq!(list.len(), 1);
    assert_eq!(list.pop_front(), Some(seq(5)));
    assert_drained(&list);
}

#[test]
fn remove_between_ranges_keeps_later_single() {
    let list = new_list();
    list.insert(seq(1), seq(2));
    list.insert(seq(4), seq(4));
    list.insert(seq(8), seq(8));
    assert_eq!(list.len(), 4);
    list.remove_up_to(seq(4));
    assert_eq!(list.len(), 1);
    assert_eq!(list.pop_front(), Some(seq(8)));
    assert_drained(&list);
}

#[test]
fn remove_splits_middle_range() {
    let list = new_list();
    list.insert(seq(1), seq(2));
    list.insert(seq(4), seq(6));
    list.insert(seq(8), seq(8));
    assert_eq!(list.len(), 6);
    list.remove_up_to(seq(4));
    assert_eq!(list.len(), 3);
    assert_eq!(list.pop_front(), Some(seq(5)));
    assert_eq!(list.pop_front(), Some(seq(6)));
    assert_eq!(list.pop_front(), Some(seq(8)));
    assert_drained(&list);
}

#[test]
fn remove_at_end_of_trailing_range() {
    let list = new_list();
    list.insert(seq(1), seq(2));
    list.insert(seq(4), seq(5));
    assert_eq!(list.len(), 4);
    list.remove_up_to(seq(5));
    assert_drained(&list);
}

#[test]
fn remove_in_middle_list_position() {
    let list = new_list();
    list.insert(seq(1), seq(2));
    list.insert(seq(4), seq(5));
    list.insert(seq(8), seq(8));
    assert_eq!(list.len(), 5);
    list.remove_up_to(seq(5));
    assert_eq!(list.len(), 1);
    assert_eq!(list.pop_front(), Some(seq(8)));
    assert_drained(&list);
}

#[test]
fn remove_inside_long_range() {
    let list = new_list();
    list.insert(seq(1), seq(2));
    list.insert(seq(4), seq(8));
    assert_eq!(list.len(), 7);
    list.remove_up_to(seq(5));
    assert_eq!(list.len(), 3);
    assert_eq!(list.pop_front(), Some(seq(6)));
    assert_eq!(list.pop_front(), Some(seq(7)));
    assert_eq!(list.pop_front(), Some(seq(8)));
    assert_drained(&list);
}

#[test]
fn remove_inside_long_range_keeps_later_range() {
    let list = new_list();
    list.insert(seq(1), seq(2));
    list.insert(seq(4), seq(8));
    list.insert(seq(10), seq(12));
    assert_eq!(list.len(), 10);
    list.remove_up_to(seq(5));
    assert_eq!(list.len(), 6);
    for expected in [6, 7, 8, 10, 11, 12] {
        assert_eq!(list.pop_front(), Some(seq(expected)));
    }
    assert_drained(&list);
}

#[test]
fn remove_in_gap_drops_earlier_ranges() {
    let list = new_list();
    list.insert(seq(1), seq(2));
    list.insert(seq(4), seq(8));
    list.insert(seq(10), seq(12));
    assert_eq!(list.len(), 10);
    list.remove_up_to(seq(9));
    assert_eq!(list.len(), 3);
    for expected in [10, 11, 12] {
        assert_eq!(list.pop_front(), Some(seq(expected)));
    }
    assert_drained(&list);
}

#[test]
fn remove_past_everything_empties_list() {
    let list = new_list();
    list.insert(seq(1), seq(2));
    list.insert(seq(4), seq(8));
    list.insert(seq(10), seq(12));
    assert_eq!(list.len(), 10);
    list.remove_up_to(seq(50));
    assert_drained(&list);
}

#[test]
fn remove_from_modular_past_is_noop() {
    let list = new_list();
    list.insert(seq(1), seq(2));
    list.insert(seq(4), seq(8));
    list.insert(seq(10), seq(12));
    assert_eq!(list.len(), 10);
    // 50 below the head wraps to the far end of the sequence space
    list.remove_up_to(seq(1) - 51);
    assert_eq!(list.len(), 10);
    for expected in [1, 2, 4, 5, 6, 7, 8, 10, 11, 12] {
        assert_eq!(list.pop_front(), Some(seq(expected)));
    }
    assert_drained(&list);
}

#[test]
fn remove_then_remove_rest() {
    let list = new_list();
    list.insert(seq(1), seq(2));
    list.insert(seq(5), seq(6));
    assert_eq!(list.len(), 4);
    list.remove_up_to(seq(5));
    assert_eq!(list.len(), 1);
    list.remove_up_to(seq(6));
    assert_drained(&list);
}

#[test]
fn reinsert_below_removed_point_then_remove_again() {
    let list = new_list();
    list.insert(seq(1), seq(2));
    list.insert(seq(5), seq(6));
    assert_eq!(list.len(), 4);
    list.remove_up_to(seq(5));
    assert_eq!(list.len(), 1);
    list.insert(seq(1), seq(2));
    list.remove_up_to(seq(6));
    assert_drained(&list);
}

#[test]
fn reinsert_then_remove_past_reinserted_range() {
    let list = new_list();
    list.insert(seq(1), seq(2));
    list.insert(seq(5), seq(6));
    list.insert(seq(10), seq(10));
    assert_eq!(list.len(), 5);
    list.remove_up_to(seq(5));
    assert_eq!(list.len(), 2);
    list.insert(seq(1), seq(2));
    list.remove_up_to(seq(7));
    assert_eq!(list.len(), 1);
    assert_eq!(list.pop_front(), Some(seq(10)));
    assert_drained(&list);
}

#[test]
fn reinsert_then_remove_everything() {
    let list = new_list();
    list.insert(seq(1), seq(2));
    list.insert(seq(5), seq(6));
    assert_eq!(list.len(), 4);
    list.remove_up_to(seq(5));
    assert_eq!(list.len(), 1);
    list.insert(seq(1), seq(2));
    list.remove_up_to(seq(7));
    assert_drained(&list);
}

//
// insertions at and before the list head
//

#[test]
fn insert_before_head_pops_first() {
    let list = new_list();
    list.insert(seq(10_000_000), seq(10_000_000));
    list.insert(seq(10_000_001), seq(10_000_001));
    assert_eq!(list.len(), 2);
    list.insert(seq(1), seq(1));
    assert_eq!(list.len(), 3);
    assert_eq!(list.pop_front(), Some(seq(1)));
    assert_eq!(list.len(), 2);
    assert_eq!(list.pop_front(), Some(seq(10_000_000)));
    assert_eq!(list.len(), 1);
    assert_eq!(list.pop_front(), Some(seq(10_000_001)));
    assert_drained(&list);
}

#[test]
fn growing_head_range_stays_sorted() {
    let list = new_list();
    list.insert(seq(1), seq(1));
    assert_eq!(list.len(), 1);
    list.insert(seq(2), seq(2));
    assert_eq!(list.len(), 2);
    assert_eq!(list.pop_front(), Some(seq(1)));
    assert_eq!(list.pop_front(), Some(seq(2)));
    assert_drained(&list);
}

#[test]
fn overlapping_insert_extends_through_existing_ranges() {
    let list = new_list();
    list.insert(seq(1), seq(5));
    assert_eq!(list.len(), 5);
    list.insert(seq(6), seq(8));
    assert_eq!(list.len(), 8);
    list.insert(seq(2), seq(10));
    assert_eq!(list.len(), 10);
    for i in 1..=10 {
        assert_eq!(list.pop_front(), Some(seq(i)));
        assert_eq!(list.len(), 10 - i as usize);
    }
    assert_drained(&list);
}

#[test]
fn fully_covered_insert_adds_nothing() {
    let list = new_list();
    list.insert(seq(1), seq(5));
    assert_eq!(list.len(), 5);
    list.insert(seq(6), seq(8));
    assert_eq!(list.len(), 8);
    list.insert(seq(2), seq(7));
    assert_eq!(list.len(), 8);
    for i in 1..=8 {
        assert_eq!(list.pop_front(), Some(seq(i)));
        assert_eq!(list.len(), 8 - i as usize);
    }
    assert_drained(&list);
}

//
// capacity limits
//

#[test]
fn full_list_rejects_further_inserts() {
    let list = new_list();
    for i in 1..=SIZE as u32 {
        list.insert(seq(i), seq(i));
    }
    assert_eq!(list.len(), SIZE);
    assert_eq!(list.insert(seq(SIZE as u32 + 1), seq(SIZE as u32 + 1)), 0);
    assert_eq!(list.len(), SIZE);
    for i in 1..=SIZE as u32 {
        assert_eq!(list.pop_front(), Some(seq(i)));
        assert_eq!(list.len(), SIZE - i as usize);
    }
    assert_drained(&list);
}

#[test]
fn full_list_rejects_insert_before_head() {
    let list = new_list();
    for i in 10_000_000..10_000_000 + SIZE as u32 {
        list.insert(seq(i), seq(i));
    }
    assert_eq!(list.len(), SIZE);
    assert_eq!(list.insert(seq(1), seq(SIZE as u32 + 1)), 0);
    assert_eq!(list.len(), SIZE);
    for i in 10_000_000..10_000_000 + SIZE as u32 {
        assert_eq!(list.pop_front(), Some(seq(i)));
    }
    assert_drained(&list);
}

//
// idempotency around removed prefixes
//

#[test]
fn reinsert_of_trimmed_range_adds_nothing() {
    let list = new_list();
    list.insert(seq(0), seq(1));
    list.insert(seq(3), seq(5));
    list.remove_up_to(seq(3));
    assert_eq!(list.insert(seq(4), seq(5)), 0);
    assert_eq!(list.len(), 2);
    assert_eq!(list.pop_front(), Some(seq(4)));
    assert_eq!(list.pop_front(), Some(seq(5)));
    assert_drained(&list);
}

#[test]
fn covered_subrange_adds_nothing() {
    let list = new_list();
    list.insert(seq(1), seq(5));
    assert_eq!(list.len(), 5);
    list.insert(seq(6), seq(8));
    assert_eq!(list.len(), 8);
    assert_eq!(list.insert(seq(2), seq(5)), 0);
    assert_eq!(list.len(), 8);
}

#[test]
fn extending_insert_counts_only_new_elements() {
    let list = new_list();
    list.insert(seq(1), seq(5));
    assert_eq!(list.len(), 5);
    assert_eq!(list.insert(seq(1), seq(8)), 3);
    assert_eq!(list.len(), 8);
    assert_eq!(list.insert(seq(2), seq(5)), 0);
    assert_eq!(list.len(), 8);
}

//
// behavior across the 31-bit wrap point
//

#[test]
fn ranges_straddling_wrap_pop_in_modular_order() {
    let top = seq(srt_core::MAX_SEQ_NUMBER);
    let list = new_list();
    assert_eq!(list.insert(top - 2, top), 3);
    assert_eq!(list.insert(seq(0), seq(2)), 3);
    assert_eq!(list.len(), 6);
    for expected in [top - 2, top - 1, top, seq(0), seq(1), seq(2)] {
        assert_eq!(list.pop_front(), Some(expected));
    }
    assert_drained(&list);
}

#[test]
fn remove_across_wrap_trims_prefix() {
    let top = seq(srt_core::MAX_SEQ_NUMBER);
    let list = new_list();
    list.insert(top - 1, seq(3));
    assert_eq!(list.len(), 6);
    list.remove_up_to(seq(1));
    assert_eq!(list.len(), 2);
    assert_eq!(list.pop_front(), Some(seq(2)));
    assert_eq!(list.pop_front(), Some(seq(3)));
    assert_drained(&list);
}
