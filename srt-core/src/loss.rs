//! Sender loss list
//!
//! When the receiver reports losses (NAK) the sender records them here and
//! retransmits from the front; a cumulative ACK drops everything up to the
//! acknowledged point. The list stores disjoint closed ranges of sequence
//! numbers in ascending modular order, coalescing on insert and splitting
//! on partial removal.
//!
//! Storage is an arena: a fixed slot array plus a free-index stack, with
//! ranges chained through `next` indices. The capacity bounds the number of
//! *sequence numbers* tracked (normally sized to the send buffer's packet
//! count), and a report that would exceed it is dropped without touching
//! the list.

use crate::sequence::SeqNumber;
use srt_sync::Mutex;
use tracing::warn;

/// A maximal run of contiguous lost sequence numbers `[lo, hi]`.
#[derive(Debug, Clone, Copy)]
struct Range {
    lo: SeqNumber,
    hi: SeqNumber,
    next: Option<usize>,
}

impl Range {
    const fn vacant() -> Self {
        Range {
            lo: SeqNumber::new(0),
            hi: SeqNumber::new(0),
            next: None,
        }
    }
}

/// Number of sequence numbers shared by two closed ranges.
fn overlap_len(a_lo: SeqNumber, a_hi: SeqNumber, b_lo: SeqNumber, b_hi: SeqNumber) -> usize {
    let lo = if a_lo.after(b_lo) { a_lo } else { b_lo };
    let hi = if a_hi.before(b_hi) { a_hi } else { b_hi };
    if hi.before(lo) {
        0
    } else {
        lo.span_to(hi)
    }
}

/// The unsynchronized range chain. All access goes through the list mutex.
struct RangeChain {
    slots: Vec<Range>,
    free: Vec<usize>,
    /// Slot of the range with the smallest sequence number.
    head: Option<usize>,
    /// Slot of the most recently inserted range. A hint only: validated on
    /// every use and repointed whenever a removal could have freed it.
    last_insert: Option<usize>,
    /// Total tracked sequence numbers across all ranges.
    len: usize,
}

impl RangeChain {
    fn with_capacity(capacity: usize) -> Self {
        RangeChain {
            slots: vec![Range::vacant(); capacity],
            free: (0..capacity).rev().collect(),
            head: None,
            last_insert: None,
            len: 0,
        }
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn alloc(&mut self, lo: SeqNumber, hi: SeqNumber, next: Option<usize>) -> Option<usize> {
        let idx = self.free.pop()?;
        self.slots[idx] = Range { lo, hi, next };
        Some(idx)
    }

    fn release(&mut self, idx: usize) {
        if self.last_insert == Some(idx) {
            self.last_insert = None;
        }
        self.free.push(idx);
    }

    /// Count how many numbers of `[lo, hi]` are already tracked, walking
    /// the chain from `start` until past `hi`.
    fn present_in(&self, start: usize, lo: SeqNumber, hi: SeqNumber) -> usize {
        let mut present = 0;
        let mut cur = Some(start);
        while let Some(i) = cur {
            let r = self.slots[i];
            if hi.before(r.lo) {
                break;
            }
            present += overlap_len(lo, hi, r.lo, r.hi);
            cur = r.next;
        }
        present
    }

    /// Grow the range at `idx` to cover `[lo, hi]`, swallowing successors
    /// the widened bounds now reach. `[lo, hi]` must overlap or touch the
    /// range at `idx`.
    fn merge_into(&mut self, idx: usize, lo: SeqNumber, hi: SeqNumber) {
        if lo.before(self.slots[idx].lo) {
            self.slots[idx].lo = lo;
        }
        let mut new_hi = if self.slots[idx].hi.after(hi) {
            self.slots[idx].hi
        } else {
            hi
        };
        while let Some(n) = self.slots[idx].next {
            let r = self.slots[n];
            if new_hi.next().before(r.lo) {
                break;
            }
            if r.hi.after(new_hi) {
                new_hi = r.hi;
            }
            self.slots[idx].next = r.next;
            self.release(n);
        }
        self.slots[idx].hi = new_hi;
    }

    fn insert(&mut self, lo: SeqNumber, hi: SeqNumber) -> usize {
        debug_assert!(lo.before_eq(hi), "inverted loss range");
        let span = lo.span_to(hi);

        let Some(head_idx) = self.head else {
            if span > self.capacity() {
                return self.reject(lo, hi);
            }
            let Some(idx) = self.alloc(lo, hi, None) else {
                return self.reject(lo, hi);
            };
            self.head = Some(idx);
            self.last_insert = Some(idx);
            self.len = span;
            return span;
        };

        let head_lo = self.slots[head_idx].lo;

        if lo.before(head_lo) {
            // the report reaches back before everything currently tracked
            if hi.next().before(head_lo) {
                if self.len + span > self.capacity() {
                    return self.reject(lo, hi);
                }
                let Some(idx) = self.alloc(lo, hi, Some(head_idx)) else {
                    return self.reject(lo, hi);
                };
                self.head = Some(idx);
                self.last_insert = Some(idx);
                self.len += span;
                return span;
            }
            let added = span - self.present_in(head_idx, lo, hi);
            if self.len + added > self.capacity() {
                return self.reject(lo, hi);
            }
            self.merge_into(head_idx, lo, hi);
            self.last_insert = Some(head_idx);
            self.len += added;
            return added;
        }

        // Find the last range starting at or before `lo`. Loss reports
        // normally arrive in roughly ascending order, so the walk starts
        // from the previous insertion point whenever that is still behind
        // the new range.
        let mut at = match self.last_insert {
            Some(cached) if self.slots[cached].lo.before_eq(lo) => cached,
            _ => head_idx,
        };
        while let Some(n) = self.slots[at].next {
            if self.slots[n].lo.before_eq(lo) {
                at = n;
            } else {
                break;
            }
        }

        if !self.slots[at].hi.next().before(lo) {
            // lands inside `at`, or directly extends it
            let added = span - self.present_in(at, lo, hi);
            if added == 0 {
                self.last_insert = Some(at);
                return 0;
            }
            if self.len + added > self.capacity() {
                return self.reject(lo, hi);
            }
            self.merge_into(at, lo, hi);
            self.last_insert = Some(at);
            self.len += added;
            return added;
        }

        let next = self.slots[at].next;
        if let Some(n) = next {
            if !hi.next().before(self.slots[n].lo) {
                // bridges the gap up to the successor: grow it downward
                let added = span - self.present_in(n, lo, hi);
                if self.len + added > self.capacity() {
                    return self.reject(lo, hi);
                }
                self.merge_into(n, lo, hi);
                self.last_insert = Some(n);
                self.len += added;
                return added;
            }
        }

        // disjoint from every tracked range
        if self.len + span > self.capacity() {
            return self.reject(lo, hi);
        }
        let Some(idx) = self.alloc(lo, hi, next) else {
            return self.reject(lo, hi);
        };
        self.slots[at].next = Some(idx);
        self.last_insert = Some(idx);
        self.len += span;
        span
    }

    fn reject(&self, lo: SeqNumber, hi: SeqNumber) -> usize {
        warn!(
            %lo,
            %hi,
            len = self.len,
            capacity = self.capacity(),
            "sender loss list full, loss report dropped"
        );
        0
    }

    fn pop_front(&mut self) -> Option<SeqNumber> {
        let head_idx = self.head?;
        let r = self.slots[head_idx];
        if r.lo == r.hi {
            self.head = r.next;
            self.release(head_idx);
        } else {
            self.slots[head_idx].lo = r.lo.next();
        }
        self.len -= 1;
        Some(r.lo)
    }

    fn remove_up_to(&mut self, seq: SeqNumber) {
        let Some(head_idx) = self.head else {
            return;
        };
        // an acknowledgement from the modular past of the list is stale
        if seq.before(self.slots[head_idx].lo) {
            return;
        }
        let mut cur = Some(head_idx);
        while let Some(i) = cur {
            let r = self.slots[i];
            if r.hi.before_eq(seq) {
                self.len -= r.lo.span_to(r.hi);
                self.head = r.next;
                self.release(i);
                cur = r.next;
            } else if r.lo.before_eq(seq) {
                self.len -= r.lo.span_to(seq);
                self.slots[i].lo = seq.next();
                break;
            } else {
                break;
            }
        }
        // anything the cache pointed at may be gone; repoint at the head
        self.last_insert = self.head;
    }

    fn ranges(&self) -> Vec<(SeqNumber, SeqNumber)> {
        let mut out = Vec::new();
        let mut cur = self.head;
        while let Some(i) = cur {
            let r = self.slots[i];
            out.push((r.lo, r.hi));
            cur = r.next;
        }
        out
    }
}

/// The sender's list of outstanding lost sequence numbers.
///
/// One send worker pops candidates for retransmission, control-receive
/// threads insert NAK-reported ranges, and the ACK handler trims the
/// acknowledged prefix; every operation takes the list's internal mutex, so
/// the list is shared by reference across those threads.
///
/// All failures are in-band: [`insert`](Self::insert) returns `0` when
/// nothing new was recorded (including capacity rejection) and
/// [`pop_front`](Self::pop_front) returns `None` when the list is empty.
pub struct SenderLossList {
    inner: Mutex<RangeChain>,
}

impl SenderLossList {
    /// Create a list tracking at most `capacity` sequence numbers.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "loss list capacity must be positive");
        SenderLossList {
            inner: Mutex::new(RangeChain::with_capacity(capacity)),
        }
    }

    /// Record the closed range `[lo, hi]` as lost.
    ///
    /// Overlapping and adjacent ranges are coalesced. Returns the number of
    /// sequence numbers that were not already tracked; `0` is a valid
    /// result meaning nothing new. If recording the range would push the
    /// tracked count above the capacity, the report is dropped and the list
    /// is left unchanged.
    ///
    /// `lo` must be at or before `hi` in modular order; the protocol layer
    /// validates ranges before they reach the list.
    pub fn insert(&self, lo: SeqNumber, hi: SeqNumber) -> usize {
        self.inner.lock().insert(lo, hi)
    }

    /// Remove and return the smallest tracked sequence number, or `None`
    /// if the list is empty.
    pub fn pop_front(&self) -> Option<SeqNumber> {
        self.inner.lock().pop_front()
    }

    /// Drop every tracked sequence number at or before `seq`, as when a
    /// cumulative acknowledgement arrives.
    ///
    /// A `seq` modularly before the current head is stale and ignored.
    pub fn remove_up_to(&self, seq: SeqNumber) {
        self.inner.lock().remove_up_to(seq)
    }

    /// Number of sequence numbers currently tracked.
    pub fn len(&self) -> usize {
        self.inner.lock().len
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The fixed capacity chosen at construction.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Snapshot of the tracked ranges in ascending order, for diagnostics.
    pub fn ranges(&self) -> Vec<(SeqNumber, SeqNumber)> {
        self.inner.lock().ranges()
    }
}
