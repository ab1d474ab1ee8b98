use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::key::HeightMap;
use crate::{LoadDirection, Page, WindowError};

/// A page removed from the window to respect its capacity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evicted<P> {
    pub page: P,
    /// The page height as measured before eviction (`None` if it was never measured).
    pub height: Option<u32>,
}

/// The result of a window insertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Insertion<P> {
    /// No page was supplied; the window is untouched.
    Unchanged,
    Inserted { evicted: Option<Evicted<P>> },
}

impl<P> Insertion<P> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    pub fn evicted(&self) -> Option<&Evicted<P>> {
        match self {
            Self::Unchanged => None,
            Self::Inserted { evicted } => evicted.as_ref(),
        }
    }

    pub fn into_evicted(self) -> Option<Evicted<P>> {
        match self {
            Self::Unchanged => None,
            Self::Inserted { evicted } => evicted,
        }
    }
}

/// A bounded, ordered sequence of mounted pages, oldest toward the start.
///
/// Invariants:
/// - `len() <= capacity()`
/// - page ids are pairwise distinct
/// - `prepend` inserts at index 0, `append` inserts at the end; an insertion that overflows the
///   capacity evicts from the opposite end.
///
/// The window also owns the id → measured height map for its pages, so an evicted page's height
/// is still available to the caller after the page is gone.
#[derive(Clone, Debug)]
pub struct PageWindow<P: Page> {
    pages: VecDeque<P>,
    capacity: usize,
    heights: HeightMap<P::Id>,
}

impl<P: Page> PageWindow<P> {
    /// Creates an empty window. A zero capacity is treated as one.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "PageWindow capacity must be > 0");
        let capacity = capacity.max(1);
        Self {
            pages: VecDeque::with_capacity(capacity),
            capacity,
            heights: HeightMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.pages.len() >= self.capacity
    }

    pub fn first(&self) -> Option<&P> {
        self.pages.front()
    }

    pub fn last(&self) -> Option<&P> {
        self.pages.back()
    }

    /// The page at the given end of the window.
    pub fn edge(&self, direction: LoadDirection) -> Option<&P> {
        match direction {
            LoadDirection::Before => self.first(),
            LoadDirection::After => self.last(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&P> {
        self.pages.get(index)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &P> + ExactSizeIterator {
        self.pages.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = P::Id> + '_ {
        self.pages.iter().map(Page::id)
    }

    pub fn index_of(&self, id: &P::Id) -> Option<usize> {
        self.pages.iter().position(|p| p.id() == *id)
    }

    pub fn contains(&self, id: &P::Id) -> bool {
        self.index_of(id).is_some()
    }

    /// Inserts at the start; evicts the last page if the window overflows.
    pub fn prepend(&mut self, page: Option<P>) -> Result<Insertion<P>, WindowError> {
        self.insert(LoadDirection::Before, page)
    }

    /// Inserts at the end; evicts the first page if the window overflows.
    pub fn append(&mut self, page: Option<P>) -> Result<Insertion<P>, WindowError> {
        self.insert(LoadDirection::After, page)
    }

    /// Inserts on the `direction` end of the window.
    pub fn insert(
        &mut self,
        direction: LoadDirection,
        page: Option<P>,
    ) -> Result<Insertion<P>, WindowError> {
        let Some(page) = page else {
            return Ok(Insertion::Unchanged);
        };
        if self.contains(&page.id()) {
            pwarn!(?direction, "PageWindow: duplicate page rejected");
            return Err(WindowError::DuplicatePage);
        }

        let evicted = if self.is_full() {
            self.evict(direction.opposite())
        } else {
            None
        };
        match direction {
            LoadDirection::Before => self.pages.push_front(page),
            LoadDirection::After => self.pages.push_back(page),
        }
        ptrace!(
            ?direction,
            len = self.pages.len(),
            evicted = evicted.is_some(),
            "PageWindow::insert"
        );
        Ok(Insertion::Inserted { evicted })
    }

    fn evict(&mut self, end: LoadDirection) -> Option<Evicted<P>> {
        let page = match end {
            LoadDirection::Before => self.pages.pop_front(),
            LoadDirection::After => self.pages.pop_back(),
        }?;
        let height = self.heights.remove(&page.id());
        Some(Evicted { page, height })
    }

    /// Changes the capacity, pruning pages from the `After` end when shrinking.
    ///
    /// Returns the pruned pages, last page first.
    pub fn set_capacity(&mut self, capacity: usize) -> Vec<Evicted<P>> {
        debug_assert!(capacity > 0, "PageWindow capacity must be > 0");
        self.capacity = capacity.max(1);
        let mut pruned = Vec::new();
        while self.pages.len() > self.capacity {
            if let Some(evicted) = self.evict(LoadDirection::After) {
                pruned.push(evicted);
            }
        }
        pruned
    }

    /// Records the settled height of a mounted page.
    ///
    /// Returns `false` (and records nothing) when the page is not in the window.
    pub fn measure(&mut self, id: &P::Id, height: u32) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.heights.insert(id.clone(), height);
        true
    }

    pub fn height_of(&self, id: &P::Id) -> Option<u32> {
        self.heights.get(id).copied()
    }

    pub fn is_measured(&self, id: &P::Id) -> bool {
        self.heights.contains_key(id)
    }

    /// Sum of the measured heights of the pages in the window.
    pub fn measured_height(&self) -> u64 {
        self.heights.values().map(|&h| h as u64).sum()
    }
}
