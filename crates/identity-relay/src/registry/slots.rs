//! Slot reuse and compaction for the active sequence.
//!
//! The contract applies membership changes in place: removed slots are
//! refilled with new identities in ascending slot order, surplus new
//! identities are appended, and surplus removed slots are filled by pulling
//! live elements off the tail. The resulting slot order is part of what the
//! contract stores, so it has to match exactly.

/// Apply a membership change to `slots`.
///
/// `removed` must be sorted ascending, distinct, and in bounds. Returns the
/// evicted occupants in ascending slot order.
pub fn reassign_slots<T: Clone>(slots: &mut Vec<T>, removed: &[usize], incoming: Vec<T>) -> Vec<T> {
    debug_assert!(removed.windows(2).all(|w| w[0] < w[1]));

    let mut evicted = Vec::with_capacity(removed.len());
    let mut empties = Vec::new();
    let mut incoming = incoming.into_iter();
    for &pos in removed {
        match incoming.next() {
            Some(replacement) => evicted.push(std::mem::replace(&mut slots[pos], replacement)),
            None => {
                evicted.push(slots[pos].clone());
                empties.push(pos);
            }
        }
    }

    let surplus: Vec<T> = incoming.collect();
    if surplus.is_empty() {
        compact(slots, &empties);
    } else {
        slots.extend(surplus);
    }
    evicted
}

/// Fill `empties` (ascending) with live elements pulled from the tail, then
/// shrink `slots` to the live length.
///
/// `head` walks the empties from the front, `live_end` is one past the last
/// element still in play. Tail slots that are themselves empty are dropped
/// instead of moved. Every unresolved empty stays below `live_end`.
pub fn compact<T>(slots: &mut Vec<T>, empties: &[usize]) {
    let mut live_end = slots.len();
    let mut head = 0;
    let mut tail = empties.len();
    while head < tail {
        while tail > head && live_end - 1 == empties[tail - 1] {
            live_end -= 1;
            tail -= 1;
        }
        if head == tail {
            break;
        }
        slots.swap(empties[head], live_end - 1);
        live_end -= 1;
        head += 1;
    }
    slots.truncate(live_end);
}
