//! Bounded binary search over ordered sequences with boundary modes.
//!
//! The search runs in two phases:
//!
//! 1. [`descend`] narrows `[lo, hi)` around the target using only three-way
//!    comparisons at the midpoint, for at most [`MAX_SEARCH_STEPS`] steps.
//! 2. [`refine`] walks one element at a time from the settled midpoint to
//!    the exact boundary the [`SearchMode`] asks for.
//!
//! Elements are never accessed directly. Each search site passes a closure
//! `compare(i)` returning how element `i` orders against the target. Masked
//! comparisons collapse many elements to `Equal`, so the sequence is only
//! non-decreasing under `compare`, never strictly increasing; both phases
//! tolerate such plateaus.

use std::cmp::Ordering;

/// Hard cap on descent iterations.
pub const MAX_SEARCH_STEPS: usize = 200;

/// Which element a search should resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Any element equal to the target.
    Eq,
    /// The rightmost element strictly less than the target.
    Lt,
    /// The leftmost element strictly greater than the target.
    Gt,
    /// The rightmost element less than or equal to the target.
    Le,
    /// The leftmost element greater than or equal to the target.
    Ge,
}

impl SearchMode {
    /// Whether an element ordering as `ord` against the target satisfies the mode.
    pub fn accepts(self, ord: Ordering) -> bool {
        match self {
            SearchMode::Eq => ord == Ordering::Equal,
            SearchMode::Lt => ord == Ordering::Less,
            SearchMode::Gt => ord == Ordering::Greater,
            SearchMode::Le => ord != Ordering::Greater,
            SearchMode::Ge => ord != Ordering::Less,
        }
    }
}

/// Coarse phase: returns a midpoint inside `[lo, hi)` near the target.
///
/// Stops early on an exact `Equal`, when the window shrinks to one element,
/// or after [`MAX_SEARCH_STEPS`] iterations. Requires `lo < hi`.
pub fn descend<F>(lo: usize, hi: usize, compare: &mut F) -> usize
where
    F: FnMut(usize) -> Ordering,
{
    debug_assert!(lo < hi);
    let mut ia = lo;
    let mut ib = hi;
    let mut ic = ia + (ib - ia) / 2;

    for _ in 0..MAX_SEARCH_STEPS {
        match compare(ic) {
            Ordering::Equal => break,
            Ordering::Greater => ib = ic,
            Ordering::Less if ia < ic => ia = ic,
            Ordering::Less if ia + 1 < ib => ia += 1,
            Ordering::Less => {}
        }

        ic = ia + (ib - ia) / 2;

        if ia + 1 >= ib {
            break;
        }
    }

    ic
}

/// Fine phase: walks from `start` to the boundary element for `mode`.
///
/// The walk is clamped to `[lo, hi)`. Returns `None` if the element it stops
/// on does not satisfy the mode, e.g. `Ge` when every element is below the
/// target.
pub fn refine<F>(start: usize, lo: usize, hi: usize, mode: SearchMode, compare: &mut F) -> Option<usize>
where
    F: FnMut(usize) -> Ordering,
{
    debug_assert!(lo <= start && start < hi);
    let mut ic = start;

    match mode {
        SearchMode::Eq => {}
        SearchMode::Ge => {
            while compare(ic) != Ordering::Less && ic > lo {
                ic -= 1;
            }
            while compare(ic) == Ordering::Less && ic + 1 < hi {
                ic += 1;
            }
        }
        SearchMode::Le => {
            while compare(ic) != Ordering::Greater && ic + 1 < hi {
                ic += 1;
            }
            while compare(ic) == Ordering::Greater && ic > lo {
                ic -= 1;
            }
        }
        SearchMode::Gt => {
            while compare(ic) == Ordering::Greater && ic > lo {
                ic -= 1;
            }
            while compare(ic) != Ordering::Greater && ic + 1 < hi {
                ic += 1;
            }
        }
        SearchMode::Lt => {
            while compare(ic) == Ordering::Less && ic + 1 < hi {
                ic += 1;
            }
            while compare(ic) != Ordering::Less && ic > lo {
                ic -= 1;
            }
        }
    }

    mode.accepts(compare(ic)).then_some(ic)
}

/// Searches `[lo, hi)` for the element selected by `mode`.
pub fn search_range<F>(lo: usize, hi: usize, mode: SearchMode, mut compare: F) -> Option<usize>
where
    F: FnMut(usize) -> Ordering,
{
    if lo >= hi {
        return None;
    }
    let mid = descend(lo, hi, &mut compare);
    refine(mid, lo, hi, mode, &mut compare)
}

/// Searches `[0, len)` for the element selected by `mode`.
pub fn search<F>(len: usize, mode: SearchMode, compare: F) -> Option<usize>
where
    F: FnMut(usize) -> Ordering,
{
    search_range(0, len, mode, compare)
}

/// Searches a slice by a key extracted from each element.
pub fn search_by_key<T, K, E>(items: &[T], target: &K, mut extract: E, mode: SearchMode) -> Option<usize>
where
    K: Ord,
    E: FnMut(&T) -> K,
{
    search(items.len(), mode, |i| extract(&items[i]).cmp(target))
}
