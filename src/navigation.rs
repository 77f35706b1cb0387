//! Pure traversal over a flat, depth-annotated entry list
//!
//! Every function here maps a starting index to a target index and never
//! touches selection, scrolling or the host; `engine::moves` applies the
//! results.

use crate::document::Entry;

/// Direction of a move in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn is_down(self) -> bool {
        self == Direction::Down
    }
}

/// Entries of one page plus which of them are hidden under a collapsed ancestor
#[derive(Debug)]
pub struct Traversal<'a> {
    entries: &'a [Entry],
    hidden: Vec<bool>,
}

impl<'a> Traversal<'a> {
    pub fn new(entries: &'a [Entry]) -> Self {
        Self {
            entries,
            hidden: hidden_mask(entries),
        }
    }

    pub fn entries(&self) -> &'a [Entry] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether some strict ancestor of `idx` is collapsed
    pub fn is_hidden(&self, idx: usize) -> bool {
        self.hidden.get(idx).copied().unwrap_or(false)
    }

    /// The outermost collapsed ancestor of `idx`, or `idx` itself if visible
    pub fn resolve_collapsed(&self, idx: usize) -> usize {
        if !self.is_hidden(idx) {
            return idx;
        }

        let mut depth = self.entries[idx].depth;
        let mut target = idx;
        for j in (0..idx).rev() {
            let entry = &self.entries[j];
            if entry.depth < depth {
                depth = entry.depth;
                if entry.collapsed {
                    target = j;
                }
                if depth == 0 {
                    break;
                }
            }
        }
        target
    }

    /// First visible entry next to `from`; `None` at either end of the page
    pub fn adjacent(&self, dir: Direction, from: usize) -> Option<usize> {
        let found = match dir {
            Direction::Down => (from + 1..self.len()).find(|&i| !self.is_hidden(i)),
            Direction::Up => (0..from).rev().find(|&i| !self.is_hidden(i)),
        };
        found.map(|i| self.resolve_collapsed(i))
    }

    /// Next or previous entry at the same depth or shallower
    ///
    /// Moving down from an expanded top-level entry enters its first child.
    /// Moving up with nothing before falls back to the page's root entry.
    pub fn sibling(&self, dir: Direction, from: usize) -> Option<usize> {
        let current = self.entries.get(from)?;
        let depth = current.depth;

        let found = match dir {
            Direction::Down => {
                let first_child = self
                    .entries
                    .get(from + 1)
                    .filter(|next| depth == 0 && !current.collapsed && next.depth > 0)
                    .map(|_| from + 1);
                first_child.or_else(|| (from + 1..self.len()).find(|&i| self.entries[i].depth <= depth))
            }
            Direction::Up => (0..from)
                .rev()
                .find(|&i| self.entries[i].depth <= depth)
                .or_else(|| self.entries.iter().position(Entry::is_root)),
        };

        found
            .map(|i| self.resolve_collapsed(i))
            .filter(|&i| i != from)
    }

    /// Top-level entry of the thread containing `from`
    pub fn thread_root(&self, from: usize) -> Option<usize> {
        if from >= self.len() {
            return None;
        }
        (0..=from).rev().find(|&i| self.entries[i].depth == 0)
    }

    /// Root of the next or previous thread
    ///
    /// Moving up from the first thread degrades to an adjacent move; moving
    /// down from the last thread does nothing.
    pub fn thread(&self, dir: Direction, from: usize) -> Option<usize> {
        let root = self.thread_root(from)?;
        match dir {
            Direction::Down => (root + 1..self.len()).find(|&i| self.entries[i].depth == 0),
            Direction::Up => (0..root)
                .rev()
                .find(|&i| self.entries[i].depth == 0)
                .or_else(|| self.adjacent(Direction::Up, root)),
        }
    }

    /// Nearest earlier entry with a smaller depth
    pub fn parent(&self, from: usize) -> Option<usize> {
        let depth = self.entries.get(from)?.depth;
        if depth == 0 {
            return None;
        }
        (0..from)
            .rev()
            .find(|&i| self.entries[i].depth < depth)
            .map(|i| self.resolve_collapsed(i))
    }

    pub fn top(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    pub fn bottom(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }
}

/// One pass over the page marking entries under a collapsed ancestor
pub fn hidden_mask(entries: &[Entry]) -> Vec<bool> {
    // (depth, whether descendants of this entry are hidden)
    let mut ancestors: Vec<(usize, bool)> = Vec::new();
    let mut hidden = Vec::with_capacity(entries.len());

    for entry in entries {
        while ancestors.last().is_some_and(|(depth, _)| *depth >= entry.depth) {
            ancestors.pop();
        }
        let is_hidden = ancestors.last().is_some_and(|(_, hides)| *hides);
        hidden.push(is_hidden);
        ancestors.push((entry.depth, is_hidden || entry.collapsed));
    }

    hidden
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    fn page(spec: &[(&str, usize)]) -> Vec<Entry> {
        spec.iter().map(|(id, depth)| Entry::new(*id, *depth)).collect()
    }

    fn id(entries: &[Entry], idx: Option<usize>) -> Option<&str> {
        idx.map(|i| entries[i].id.as_str())
    }

    #[test]
    fn test_hidden_mask() {
        let mut entries = page(&[("a", 0), ("a1", 1), ("a1x", 2), ("a2", 1), ("b", 0)]);
        entries[1].collapsed = true;
        assert_eq!(hidden_mask(&entries), vec![false, false, true, false, false]);

        entries[0].collapsed = true;
        assert_eq!(hidden_mask(&entries), vec![false, true, true, true, false]);
    }

    #[test]
    fn test_adjacent_skips_collapsed_subtree() {
        let mut entries = page(&[("a", 0), ("b", 1), ("c", 0)]);
        entries[0].collapsed = true;
        let nav = Traversal::new(&entries);
        assert_eq!(id(&entries, nav.adjacent(Down, 0)), Some("c"));
        assert_eq!(id(&entries, nav.adjacent(Up, 2)), Some("a"));
    }

    #[test]
    fn test_adjacent_stops_at_boundaries() {
        let entries = page(&[("a", 0), ("b", 0)]);
        let nav = Traversal::new(&entries);
        assert_eq!(nav.adjacent(Up, 0), None);
        assert_eq!(nav.adjacent(Down, 1), None);
    }

    #[test]
    fn test_resolve_picks_outermost_collapsed_ancestor() {
        let mut entries = page(&[("a", 0), ("a1", 1), ("a1x", 2), ("b", 0)]);
        entries[0].collapsed = true;
        entries[1].collapsed = true;
        let nav = Traversal::new(&entries);
        assert_eq!(nav.resolve_collapsed(2), 0);
        assert_eq!(nav.resolve_collapsed(1), 0);
        assert_eq!(nav.resolve_collapsed(3), 3);
    }

    #[test]
    fn test_sibling_down() {
        let entries = page(&[("a", 0), ("a1", 1), ("a2", 1), ("b", 0)]);
        let nav = Traversal::new(&entries);
        assert_eq!(id(&entries, nav.sibling(Down, 1)), Some("a2"));
        assert_eq!(id(&entries, nav.sibling(Down, 2)), Some("b"));
        // Top-level entry with children enters the first child
        assert_eq!(id(&entries, nav.sibling(Down, 0)), Some("a1"));
        assert_eq!(nav.sibling(Down, 3), None);
    }

    #[test]
    fn test_sibling_down_skips_descendants() {
        let entries = page(&[("a", 0), ("a1", 1), ("a1x", 2), ("a1y", 2), ("a2", 1)]);
        let nav = Traversal::new(&entries);
        assert_eq!(id(&entries, nav.sibling(Down, 1)), Some("a2"));
    }

    #[test]
    fn test_sibling_down_from_collapsed_root_skips_thread() {
        let mut entries = page(&[("a", 0), ("a1", 1), ("b", 0)]);
        entries[0].collapsed = true;
        let nav = Traversal::new(&entries);
        assert_eq!(id(&entries, nav.sibling(Down, 0)), Some("b"));
    }

    #[test]
    fn test_sibling_up() {
        let mut entries = page(&[("p", 0), ("a", 0), ("a1", 1), ("a2", 1), ("b", 0)]);
        entries[0] = Entry::root("p");
        let nav = Traversal::new(&entries);
        assert_eq!(id(&entries, nav.sibling(Up, 3)), Some("a1"));
        // No previous sibling: falls back to the parent
        assert_eq!(id(&entries, nav.sibling(Up, 2)), Some("a"));
        assert_eq!(id(&entries, nav.sibling(Up, 4)), Some("a"));
        assert_eq!(nav.sibling(Up, 0), None);
    }

    #[test]
    fn test_sibling_up_falls_back_to_root_entry() {
        let entries = vec![Entry::new("c", 1), Entry::root("p")];
        let nav = Traversal::new(&entries);
        assert_eq!(id(&entries, nav.sibling(Up, 0)), Some("p"));
    }

    #[test]
    fn test_thread_moves_between_roots() {
        let entries = page(&[("a", 0), ("a1", 1), ("a1x", 2), ("b", 0), ("b1", 1)]);
        let nav = Traversal::new(&entries);
        for from in 0..3 {
            assert_eq!(id(&entries, nav.thread(Down, from)), Some("b"));
        }
        assert_eq!(id(&entries, nav.thread(Up, 4)), Some("a"));
        assert_eq!(nav.thread(Down, 4), None);
    }

    #[test]
    fn test_thread_up_from_first_thread_is_adjacent() {
        let entries = page(&[("a", 0), ("a1", 1)]);
        let nav = Traversal::new(&entries);
        assert_eq!(nav.thread(Up, 1), None);

        // Entries before the first top-level item are still reachable
        let entries = vec![Entry::new("x", 1), Entry::new("a", 0), Entry::new("a1", 1)];
        let nav = Traversal::new(&entries);
        assert_eq!(id(&entries, nav.thread(Up, 2)), Some("x"));
    }

    #[test]
    fn test_thread_root_and_parent() {
        let entries = page(&[("a", 0), ("a1", 1), ("a1x", 2), ("a2", 1)]);
        let nav = Traversal::new(&entries);
        assert_eq!(nav.thread_root(2), Some(0));
        assert_eq!(id(&entries, nav.parent(2)), Some("a1"));
        assert_eq!(id(&entries, nav.parent(3)), Some("a"));
        assert_eq!(nav.parent(0), None);
    }

    #[test]
    fn test_top_and_bottom() {
        let entries = page(&[("a", 0), ("b", 0), ("c", 0)]);
        let nav = Traversal::new(&entries);
        assert_eq!(nav.top(), Some(0));
        assert_eq!(nav.bottom(), Some(2));

        let empty: Vec<Entry> = Vec::new();
        let nav = Traversal::new(&empty);
        assert_eq!(nav.top(), None);
        assert_eq!(nav.bottom(), None);
    }
}
