/// A numeric value permanently held within `[min, max]`.
///
/// All mutation goes through `set`, `increment`, or `swap`, each of which
/// clamps, so the invariant `min <= value <= max` holds at all times.
/// There are no error states: out-of-range input saturates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangedValue {
    value: i64,
    min: i64,
    max: i64,
}

impl RangedValue {
    /// Create a value clamped into `[min, max]`.
    pub fn new(value: i64, min: i64, max: i64) -> Self {
        let mut rv = Self { value: min, min, max };
        rv.set(value);
        rv
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Store `value`, clamped into range.
    pub fn set(&mut self, value: i64) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Add `delta`, saturating at the range bounds.
    ///
    /// Returns the delta actually applied, which may be smaller in
    /// magnitude than `delta` (or 0 when already pinned at a bound).
    pub fn increment(&mut self, delta: i64) -> i64 {
        let applied = if delta > 0 {
            delta.min(self.max - self.value)
        } else {
            delta.max(self.min - self.value)
        };
        self.value += applied;
        applied
    }

    /// Exchange values with `other`.
    ///
    /// Each value is re-clamped into its new owner's range, so swapping
    /// across differently-ranged values is well defined.
    pub fn swap(&mut self, other: &mut RangedValue) {
        let mine = self.value;
        let theirs = other.value;
        self.set(theirs);
        other.set(mine);
    }
}
