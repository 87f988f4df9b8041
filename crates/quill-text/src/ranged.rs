use core::ops::Range;

/// An ordered, non-overlapping mapping from codepoint (or glyph) ranges to
/// values.
///
/// Ranges are kept sorted and disjoint. Setting a range overwrites any
/// overlapping portion of existing entries, splitting them where needed, so
/// the map always stays a partition of whatever has been inserted.
#[derive(Debug, Clone)]
pub struct RangedValues<T> {
    items: Vec<(Range<usize>, T)>,
}

impl<T> Default for RangedValues<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Clone> RangedValues<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Range<usize>, &T)> {
        self.items.iter().map(|(r, v)| (r.clone(), v))
    }

    /// Set `range` to `value`, merging with adjacent entries that compare
    /// equal so the map stays maximal.
    pub fn set(&mut self, range: Range<usize>, value: T)
    where
        T: PartialEq,
    {
        if range.is_empty() {
            return;
        }
        let idx = self.splice(range, value);
        self.merge_around(idx);
    }

    /// Set `range` to `value` without merging equal neighbours. Used where
    /// entry boundaries are meaningful, e.g. per-run glyph storage.
    pub fn set_unmerged(&mut self, range: Range<usize>, value: T) {
        if range.is_empty() {
            return;
        }
        self.splice(range, value);
    }

    /// Overwrite the overlapping portion of existing entries and insert the
    /// new one. Returns the index of the inserted entry.
    fn splice(&mut self, range: Range<usize>, value: T) -> usize {
        let mut insert_at = self.items.len();
        let mut remove: Range<usize> = 0..0;
        let mut tail: Option<(Range<usize>, T)> = None;

        for (i, (r, v)) in self.items.iter_mut().enumerate() {
            if r.end <= range.start {
                insert_at = i + 1;
                continue;
            }
            if r.start >= range.end {
                if remove.is_empty() {
                    insert_at = insert_at.min(i);
                }
                break;
            }

            // Overlap.
            if r.start < range.start && r.end > range.end {
                // Existing entry fully encloses the new range; split in two.
                tail = Some((range.end..r.end, v.clone()));
                r.end = range.start;
                insert_at = i + 1;
                remove = insert_at..insert_at;
                break;
            }

            if r.start < range.start {
                // Left partial overlap, trim.
                r.end = range.start;
                insert_at = i + 1;
                continue;
            }

            if r.end > range.end {
                // Right partial overlap, trim.
                r.start = range.end;
                if remove.is_empty() {
                    insert_at = insert_at.min(i);
                }
                break;
            }

            // Fully covered, drop.
            if remove.is_empty() {
                remove = i..i;
                insert_at = i;
            }
            remove.end = i + 1;
        }

        if !remove.is_empty() {
            self.items.drain(remove);
        }
        self.items.insert(insert_at, (range, value));
        if let Some(entry) = tail {
            self.items.insert(insert_at + 1, entry);
        }
        insert_at
    }

    fn merge_around(&mut self, idx: usize)
    where
        T: PartialEq,
    {
        // Merge with the following entry first so `idx` stays valid.
        if idx + 1 < self.items.len()
            && self.items[idx].0.end == self.items[idx + 1].0.start
            && self.items[idx].1 == self.items[idx + 1].1
        {
            let end = self.items[idx + 1].0.end;
            self.items[idx].0.end = end;
            self.items.remove(idx + 1);
        }
        if idx > 0
            && self.items[idx - 1].0.end == self.items[idx].0.start
            && self.items[idx - 1].1 == self.items[idx].1
        {
            let end = self.items[idx].0.end;
            self.items[idx - 1].0.end = end;
            self.items.remove(idx);
        }
    }

    /// Index of the entry containing `pos`.
    fn index_of(&self, pos: usize) -> Option<usize> {
        let i = self.items.partition_point(|(r, _)| r.end <= pos);
        match self.items.get(i) {
            Some((r, _)) if r.contains(&pos) => Some(i),
            _ => None,
        }
    }

    /// The entry containing `pos`, if any.
    pub fn get(&self, pos: usize) -> Option<(Range<usize>, &T)> {
        self.index_of(pos).map(|i| {
            let (r, v) = &self.items[i];
            (r.clone(), v)
        })
    }

    /// Entries from the one containing `pos` (or the first one starting after
    /// it) onwards.
    pub fn items_from(&self, pos: usize) -> &[(Range<usize>, T)] {
        let i = self.items.partition_point(|(r, _)| r.end <= pos);
        &self.items[i..]
    }

    /// Entries clipped to `range`.
    pub fn intersections(&self, range: Range<usize>) -> Vec<(Range<usize>, T)> {
        let mut result = Vec::new();
        for (r, v) in self.items_from(range.start) {
            if r.start >= range.end {
                break;
            }
            let clipped = r.start.max(range.start)..r.end.min(range.end);
            if !clipped.is_empty() {
                result.push((clipped, v.clone()));
            }
        }
        result
    }

    /// Whether the union of stored ranges covers `range` without gaps.
    pub fn covers(&self, range: Range<usize>) -> bool {
        if range.is_empty() {
            return true;
        }
        let mut pos = range.start;
        for (r, _) in self.items_from(range.start) {
            if r.start > pos {
                return false;
            }
            pos = r.end;
            if pos >= range.end {
                return true;
            }
        }
        false
    }
}
