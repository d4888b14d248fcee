//! Annotated bar array for the sorting family
//!
//! An array slot pairs a bar value with a transient visual annotation.
//! Annotations never affect ordering decisions; the value multiset is
//! conserved by every algorithm run, and a completed run leaves every slot
//! annotated [`Annotation::Sorted`] with values non-decreasing.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Smallest array a reset may produce
pub const MIN_ARRAY_SIZE: usize = 10;

/// Largest array a reset may produce
pub const MAX_ARRAY_SIZE: usize = 100;

/// Default bar value range for random arrays
pub const DEFAULT_VALUE_RANGE: std::ops::RangeInclusive<u32> = 5..=500;

/// Transient visual tag on an array slot, distinct from its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Annotation {
    /// Not currently part of any highlighted operation
    #[default]
    Default,
    /// One of the slots being compared right now
    Comparing,
    /// In its final position
    Sorted,
    /// Pivot / key element of the current pass
    Pivot,
    /// Element selected for an auxiliary role (e.g. sift target)
    Selected,
}

/// A single bar in the sorting visualization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArraySlot {
    /// Bar height
    pub value: u32,
    /// Current visual annotation
    pub annotation: Annotation,
}

impl ArraySlot {
    /// Create a slot with the default annotation
    pub fn new(value: u32) -> Self {
        Self {
            value,
            annotation: Annotation::Default,
        }
    }
}

/// Generate a fresh random array of `size` slots.
///
/// `size` is clamped to [`MIN_ARRAY_SIZE`]..=[`MAX_ARRAY_SIZE`].
pub fn random_array(
    size: usize,
    values: std::ops::RangeInclusive<u32>,
    rng: &mut impl Rng,
) -> Vec<ArraySlot> {
    let size = size.clamp(MIN_ARRAY_SIZE, MAX_ARRAY_SIZE);
    (0..size)
        .map(|_| ArraySlot::new(rng.gen_range(values.clone())))
        .collect()
}

/// Extract the bar values of `slots`
pub fn values(slots: &[ArraySlot]) -> Vec<u32> {
    slots.iter().map(|s| s.value).collect()
}

/// Check that bar values are non-decreasing
pub fn is_sorted(slots: &[ArraySlot]) -> bool {
    slots.windows(2).all(|w| w[0].value <= w[1].value)
}

/// Annotate every slot as sorted
pub fn mark_all_sorted(slots: &mut [ArraySlot]) {
    for slot in slots {
        slot.annotation = Annotation::Sorted;
    }
}
