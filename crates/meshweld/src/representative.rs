//! Representative Selector: one surviving original index per class.
//!
//! Rule: the member maximising `(importance, index)`. Without importance levels
//! every member ties on importance, so the survivor is the largest original
//! index in its class. The choice is a function of class membership only; the
//! union order that produced the partition has no influence.

use crate::equivalence::Partition;

/// `rep[i]` = representative of the class containing `i`.
///
/// `importance`, when given, must have `partition.len()` entries (checked by the
/// orchestrator).
pub fn select_representatives(partition: &Partition, importance: Option<&[i64]>) -> Vec<usize> {
    let n = partition.len();
    let rank = |i: usize| (importance.map_or(0, |lv| lv[i]), i);
    // best[class id] = best member seen so far; class ids are roots in [0, n).
    let mut best = vec![usize::MAX; n];
    for i in 0..n {
        let c = partition.class_of(i);
        if best[c] == usize::MAX || rank(i) > rank(best[c]) {
            best[c] = i;
        }
    }
    (0..n).map(|i| best[partition.class_of(i)]).collect()
}

/// `true` iff `i` survives (is its own class's representative).
#[inline]
pub fn is_representative(rep: &[usize], i: usize) -> bool {
    rep[i] == i
}
