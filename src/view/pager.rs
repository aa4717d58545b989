//! Page rotation over active slabs.
//!
//! Each draw shows at most `capacity` slabs starting at `start_index`
//! (zero-based slab index, i.e. `slab_id - 1`). When a draw could not fit
//! every active slab, the next data refresh moves the window past the last
//! slab shown; otherwise it goes back to the first page. The screen thus
//! rotates through pages once per refresh interval.

use tracing::debug;

/// Slabs visible on one draw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageWindow {
    /// Visible slab ids, ascending.
    pub slab_ids: Vec<u32>,
    /// More active slabs exist after the last visible one.
    pub truncated: bool,
    /// Id of the last visible slab when truncated.
    pub last_shown: Option<u32>,
}

/// Computes the window for `active_ids` (ascending) starting at
/// `start_index`.
///
/// When no active slab is at or after `start_index` the window restarts from
/// the first active slab.
pub fn paginate(active_ids: &[u32], start_index: usize, capacity: usize) -> PageWindow {
    let from = |start: usize| -> Vec<u32> {
        active_ids
            .iter()
            .copied()
            .filter(|id| (*id as usize).saturating_sub(1) >= start)
            .collect()
    };

    let mut candidates = from(start_index);
    if candidates.is_empty() && start_index > 0 {
        debug!(start_index, "no active slab on this page, restarting from first");
        candidates = from(0);
    }

    let truncated = candidates.len() > capacity;
    candidates.truncate(capacity);
    let last_shown = if truncated {
        candidates.last().copied()
    } else {
        None
    };
    PageWindow {
        slab_ids: candidates,
        truncated,
        last_shown,
    }
}

/// Pagination state carried across draws and refreshes.
#[derive(Debug, Clone)]
pub struct Pager {
    capacity: usize,
    start_index: usize,
    truncated: bool,
    last_shown: Option<u32>,
}

impl Pager {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            start_index: 0,
            truncated: false,
            last_shown: None,
        }
    }

    #[cfg(test)]
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Window for the next draw; remembers whether it was truncated.
    ///
    /// Drawing the same data again yields the same window.
    pub fn window(&mut self, active_ids: &[u32]) -> PageWindow {
        let window = paginate(active_ids, self.start_index, self.capacity);
        self.truncated = window.truncated;
        self.last_shown = window.last_shown;
        window
    }

    /// Moves the window after new data was loaded.
    ///
    /// `slab_capacity` is the snapshot's slab id bound; a start index at or
    /// beyond it wraps to 0.
    pub fn advance(&mut self, slab_capacity: usize) {
        self.start_index = match (self.truncated, self.last_shown) {
            (true, Some(last)) => {
                let next = last as usize;
                if next >= slab_capacity { 0 } else { next }
            }
            _ => 0,
        };
        self.truncated = false;
        self.last_shown = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(range: std::ops::RangeInclusive<u32>) -> Vec<u32> {
        range.collect()
    }

    #[test]
    fn test_twenty_five_slabs_capacity_twenty() {
        let active = ids(1..=25);
        let mut pager = Pager::new(20);

        let first = pager.window(&active);
        assert_eq!(first.slab_ids, ids(1..=20));
        assert!(first.truncated);
        assert_eq!(first.last_shown, Some(20));

        pager.advance(100);
        assert_eq!(pager.start_index(), 20);
        let second = pager.window(&active);
        assert_eq!(second.slab_ids, ids(21..=25));
        assert!(!second.truncated);

        pager.advance(100);
        assert_eq!(pager.start_index(), 0);
        assert_eq!(pager.window(&active).slab_ids, ids(1..=20));
    }

    #[test]
    fn test_three_page_rotation() {
        let active = ids(1..=45);
        let mut pager = Pager::new(20);
        let mut pages = Vec::new();
        for _ in 0..4 {
            let w = pager.window(&active);
            pages.push((w.slab_ids[0], *w.slab_ids.last().unwrap()));
            pager.advance(100);
        }
        assert_eq!(pages, vec![(1, 20), (21, 40), (41, 45), (1, 20)]);
    }

    #[test]
    fn test_fits_on_one_page_never_advances() {
        let active = vec![1, 2, 3, 7];
        let mut pager = Pager::new(20);
        for _ in 0..3 {
            let w = pager.window(&active);
            assert_eq!(w.slab_ids, active);
            assert!(!w.truncated);
            pager.advance(100);
            assert_eq!(pager.start_index(), 0);
        }
    }

    #[test]
    fn test_advance_only_moves_on_refresh() {
        let active = ids(1..=25);
        let mut pager = Pager::new(20);
        // Repeated draws between refreshes keep the same page.
        for _ in 0..5 {
            assert_eq!(pager.window(&active).slab_ids, ids(1..=20));
        }
        pager.advance(100);
        assert_eq!(pager.window(&active).slab_ids, ids(21..=25));
    }

    #[test]
    fn test_sparse_ids_use_last_shown_id() {
        let active = vec![1, 4, 9, 16, 25];
        let mut pager = Pager::new(2);
        let w = pager.window(&active);
        assert_eq!(w.slab_ids, vec![1, 4]);
        assert_eq!(w.last_shown, Some(4));
        pager.advance(100);
        assert_eq!(pager.start_index(), 4);
        assert_eq!(pager.window(&active).slab_ids, vec![9, 16]);
    }

    #[test]
    fn test_wraps_at_slab_capacity() {
        let active = ids(1..=10);
        let mut pager = Pager::new(5);
        let w = pager.window(&active);
        assert!(w.truncated);
        // A table bound equal to the last shown id forces a wrap.
        pager.advance(5);
        assert_eq!(pager.start_index(), 0);
    }

    #[test]
    fn test_restarts_when_page_emptied() {
        let mut pager = Pager::new(2);
        pager.window(&[1, 2, 3]);
        pager.advance(100);
        assert_eq!(pager.start_index(), 2);
        // Slab 3 disappeared before the next draw.
        let w = pager.window(&[1, 2]);
        assert_eq!(w.slab_ids, vec![1, 2]);
        assert!(!w.truncated);
    }

    #[test]
    fn test_empty_active_set() {
        let mut pager = Pager::new(20);
        let w = pager.window(&[]);
        assert!(w.slab_ids.is_empty());
        assert!(!w.truncated);
        assert_eq!(w.last_shown, None);
    }
}
