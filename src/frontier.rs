//! Open set for best-first search.
//!
//! An unordered bag with linear-time operations. The state spaces searched
//! here are small, so a scan for the minimum is cheaper to reason about than
//! keeping a heap consistent with priorities that change in place.

/// Unordered collection of search-node handles.
///
/// Entries are compared by `==`, so with `VertexId` handles membership is by
/// vertex identity. Insertion order is preserved until an entry is removed,
/// which is what makes `pop_min_by` break ties in favor of the entry that
/// was appended first.
#[derive(Clone, Debug, Default)]
pub struct Frontier<T> {
    entries: Vec<T>,
    high_water: usize,
}

impl<T: Copy + PartialEq> Frontier<T> {
    pub fn new() -> Self {
        Frontier {
            entries: Vec::new(),
            high_water: 0,
        }
    }

    /// Adds `item` without checking for duplicates.
    pub fn append(&mut self, item: T) {
        self.entries.push(item);
        self.high_water = self.high_water.max(self.entries.len());
    }

    pub fn contains(&self, item: T) -> bool {
        self.entries.contains(&item)
    }

    /// Removes and returns the entry with the lowest `estimate`.
    ///
    /// Among equal estimates the earliest appended entry wins.
    ///
    /// # Examples
    /// ```
    /// use pile_search::frontier::Frontier;
    /// let mut frontier = Frontier::new();
    /// for id in [4usize, 1, 7] {
    ///     frontier.append(id);
    /// }
    /// let estimates = [0.0, 2.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.5];
    /// assert_eq!(frontier.pop_min_by(|id| estimates[id]), Some(7));
    /// assert_eq!(frontier.pop_min_by(|id| estimates[id]), Some(4));
    /// assert_eq!(frontier.pop_min_by(|id| estimates[id]), Some(1));
    /// assert_eq!(frontier.pop_min_by(|id| estimates[id]), None);
    /// ```
    pub fn pop_min_by(&mut self, mut estimate: impl FnMut(T) -> f64) -> Option<T> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &item) in self.entries.iter().enumerate() {
            let e = estimate(item);
            if best.map_or(true, |(_, current)| e < current) {
                best = Some((i, e));
            }
        }
        best.map(|(i, _)| self.entries.remove(i))
    }

    /// Removes and returns some entry, in no particular order.
    pub fn pop_any(&mut self) -> Option<T> {
        self.entries.pop()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest size the frontier has reached.
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}
