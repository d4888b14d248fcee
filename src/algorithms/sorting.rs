//! Sorting family: six step-instrumented sorts
//!
//! All six share one contract: the slots are reordered ascending by value,
//! the value multiset is unchanged, and every slot ends annotated
//! [`Annotation::Sorted`]. Compared slots are annotated
//! [`Annotation::Comparing`] for the duration of one checkpoint, then
//! reverted unless they became permanently sorted.
//!
//! Counters: every comparison increments `comparisons`; every swap (and,
//! for merge sort, every placement) increments `swaps`. Cancellation may
//! leave the array partially ordered and partially annotated; a subsequent
//! array reset discards that state.

use crate::model::array::{mark_all_sorted, Annotation, ArraySlot};
use crate::step::{StepContext, StepResult};
use crate::types::SortAlgorithm;

/// Run one sorting algorithm over `slots` to completion or cancellation
pub fn run(algo: SortAlgorithm, slots: &mut [ArraySlot], ctx: &mut StepContext) -> StepResult {
    if slots.len() <= 1 {
        mark_all_sorted(slots);
        return ctx.yield_array(slots);
    }
    match algo {
        SortAlgorithm::Bubble => bubble(slots, ctx),
        SortAlgorithm::Selection => selection(slots, ctx),
        SortAlgorithm::Insertion => insertion(slots, ctx),
        SortAlgorithm::Merge => merge_sort(slots, ctx),
        SortAlgorithm::Quick => quick_sort(slots, ctx),
        SortAlgorithm::Heap => heap_sort(slots, ctx),
    }
}

/// Adjacent-pair comparisons; the inner loop shrinks by one each outer
/// pass, fixing the largest remaining element at the back.
fn bubble(slots: &mut [ArraySlot], ctx: &mut StepContext) -> StepResult {
    let n = slots.len();
    for i in 0..n {
        for j in 0..n - i - 1 {
            slots[j].annotation = Annotation::Comparing;
            slots[j + 1].annotation = Annotation::Comparing;
            ctx.count_comparison();
            ctx.yield_array(slots)?;
            if slots[j].value > slots[j + 1].value {
                slots.swap(j, j + 1);
                ctx.count_swap();
            }
            slots[j].annotation = Annotation::Default;
            slots[j + 1].annotation = Annotation::Default;
        }
        slots[n - i - 1].annotation = Annotation::Sorted;
        ctx.yield_array(slots)?;
    }
    Ok(())
}

/// Running-minimum scan; at most one swap per outer iteration.
fn selection(slots: &mut [ArraySlot], ctx: &mut StepContext) -> StepResult {
    let n = slots.len();
    for i in 0..n {
        let mut min = i;
        slots[min].annotation = Annotation::Pivot;
        for j in i + 1..n {
            slots[j].annotation = Annotation::Comparing;
            ctx.count_comparison();
            ctx.yield_array(slots)?;
            if slots[j].value < slots[min].value {
                slots[min].annotation = Annotation::Default;
                min = j;
                slots[min].annotation = Annotation::Pivot;
            } else {
                slots[j].annotation = Annotation::Default;
            }
        }
        if min != i {
            slots.swap(i, min);
            ctx.count_swap();
            slots[min].annotation = Annotation::Default;
        }
        slots[i].annotation = Annotation::Sorted;
        ctx.yield_array(slots)?;
    }
    Ok(())
}

/// The element being placed is the pivot; predecessors shift right one
/// comparison at a time until its slot is found.
fn insertion(slots: &mut [ArraySlot], ctx: &mut StepContext) -> StepResult {
    let n = slots.len();
    for i in 1..n {
        let key = slots[i].value;
        slots[i].annotation = Annotation::Pivot;
        let mut j = i;
        while j > 0 {
            slots[j - 1].annotation = Annotation::Comparing;
            ctx.count_comparison();
            ctx.yield_array(slots)?;
            if slots[j - 1].value > key {
                slots[j].value = slots[j - 1].value;
                slots[j].annotation = Annotation::Default;
                ctx.count_swap();
                j -= 1;
                slots[j].annotation = Annotation::Pivot;
            } else {
                slots[j - 1].annotation = Annotation::Default;
                break;
            }
        }
        slots[j].value = key;
        slots[j].annotation = Annotation::Default;
    }
    mark_all_sorted(slots);
    ctx.yield_array(slots)
}

fn merge_sort(slots: &mut [ArraySlot], ctx: &mut StepContext) -> StepResult {
    let n = slots.len();
    merge_rec(slots, 0, n, ctx)?;
    mark_all_sorted(slots);
    ctx.yield_array(slots)
}

/// Sort the half-open range `[lo, hi)`
fn merge_rec(
    slots: &mut [ArraySlot],
    lo: usize,
    hi: usize,
    ctx: &mut StepContext,
) -> StepResult {
    if hi - lo <= 1 {
        return Ok(());
    }
    let mid = lo + (hi - lo) / 2;
    merge_rec(slots, lo, mid, ctx)?;
    merge_rec(slots, mid, hi, ctx)?;
    merge_halves(slots, lo, mid, hi, ctx)
}

/// Merge `[lo, mid)` and `[mid, hi)` back into the shared array in place.
///
/// Compares head elements one at a time; every placement counts as a swap.
fn merge_halves(
    slots: &mut [ArraySlot],
    lo: usize,
    mid: usize,
    hi: usize,
    ctx: &mut StepContext,
) -> StepResult {
    let left: Vec<u32> = slots[lo..mid].iter().map(|s| s.value).collect();
    let right: Vec<u32> = slots[mid..hi].iter().map(|s| s.value).collect();

    let (mut i, mut j, mut k) = (0, 0, lo);
    while i < left.len() && j < right.len() {
        ctx.count_comparison();
        let value = if left[i] <= right[j] {
            i += 1;
            left[i - 1]
        } else {
            j += 1;
            right[j - 1]
        };
        place(slots, k, value, ctx)?;
        k += 1;
    }
    while i < left.len() {
        place(slots, k, left[i], ctx)?;
        i += 1;
        k += 1;
    }
    while j < right.len() {
        place(slots, k, right[j], ctx)?;
        j += 1;
        k += 1;
    }
    Ok(())
}

/// One merge placement: write the value, flash the target slot for one
/// checkpoint.
fn place(slots: &mut [ArraySlot], k: usize, value: u32, ctx: &mut StepContext) -> StepResult {
    slots[k].value = value;
    slots[k].annotation = Annotation::Comparing;
    ctx.count_swap();
    ctx.yield_array(slots)?;
    slots[k].annotation = Annotation::Default;
    Ok(())
}

fn quick_sort(slots: &mut [ArraySlot], ctx: &mut StepContext) -> StepResult {
    let n = slots.len();
    quick_rec(slots, 0, n - 1, ctx)?;
    mark_all_sorted(slots);
    ctx.yield_array(slots)
}

/// Sort the inclusive range `[lo, hi]`
fn quick_rec(
    slots: &mut [ArraySlot],
    lo: usize,
    hi: usize,
    ctx: &mut StepContext,
) -> StepResult {
    if lo >= hi {
        slots[lo].annotation = Annotation::Sorted;
        return Ok(());
    }
    let p = partition(slots, lo, hi, ctx)?;
    if p > lo {
        quick_rec(slots, lo, p - 1, ctx)?;
    }
    if p < hi {
        quick_rec(slots, p + 1, hi, ctx)?;
    }
    Ok(())
}

/// Lomuto partition with the last element as pivot. The boundary element
/// is annotated sorted once fixed.
fn partition(
    slots: &mut [ArraySlot],
    lo: usize,
    hi: usize,
    ctx: &mut StepContext,
) -> Result<usize, crate::step::Cancelled> {
    slots[hi].annotation = Annotation::Pivot;
    let pivot = slots[hi].value;
    let mut i = lo;
    for j in lo..hi {
        slots[j].annotation = Annotation::Comparing;
        ctx.count_comparison();
        ctx.yield_array(slots)?;
        if slots[j].value < pivot {
            slots.swap(i, j);
            ctx.count_swap();
            slots[i].annotation = Annotation::Default;
            i += 1;
        }
        slots[j].annotation = Annotation::Default;
    }
    slots.swap(i, hi);
    ctx.count_swap();
    if i != hi {
        slots[hi].annotation = Annotation::Default;
    }
    slots[i].annotation = Annotation::Sorted;
    ctx.yield_array(slots)?;
    Ok(i)
}

fn heap_sort(slots: &mut [ArraySlot], ctx: &mut StepContext) -> StepResult {
    let n = slots.len();
    // build the max-heap bottom-up
    for i in (0..n / 2).rev() {
        sift_down(slots, i, n, ctx)?;
    }
    for end in (1..n).rev() {
        slots.swap(0, end);
        ctx.count_swap();
        slots[end].annotation = Annotation::Sorted;
        ctx.yield_array(slots)?;
        sift_down(slots, 0, end, ctx)?;
    }
    slots[0].annotation = Annotation::Sorted;
    ctx.yield_array(slots)
}

/// Restore the max-heap property for the subtree rooted at `root`,
/// considering only `slots[..end]`.
fn sift_down(
    slots: &mut [ArraySlot],
    mut root: usize,
    end: usize,
    ctx: &mut StepContext,
) -> StepResult {
    loop {
        let left = 2 * root + 1;
        if left >= end {
            return Ok(());
        }
        let mut child = left;
        let right = left + 1;
        if right < end {
            slots[left].annotation = Annotation::Comparing;
            slots[right].annotation = Annotation::Comparing;
            ctx.count_comparison();
            ctx.yield_array(slots)?;
            slots[left].annotation = Annotation::Default;
            slots[right].annotation = Annotation::Default;
            if slots[right].value > slots[left].value {
                child = right;
            }
        }
        slots[root].annotation = Annotation::Selected;
        slots[child].annotation = Annotation::Comparing;
        ctx.count_comparison();
        ctx.yield_array(slots)?;
        slots[root].annotation = Annotation::Default;
        slots[child].annotation = Annotation::Default;
        if slots[child].value > slots[root].value {
            slots.swap(root, child);
            ctx.count_swap();
            root = child;
        } else {
            return Ok(());
        }
    }
}
