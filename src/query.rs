//! Pure list-processing over loaded collections: filter predicates,
//! stable multi-key sorting and pagination arithmetic. Every function here
//! is a side-effect-free function of its inputs, operates on already
//! loaded in-memory data, and never fails: an empty collection in is an
//! empty collection out.

use std::cmp::Ordering;

/// A filter descriptor for records of type `T`.
///
/// Descriptors are all-optional: every field has a "no constraint" default
/// and the default descriptor matches every record. Active constraints
/// compose with logical AND.
pub trait Filter<T> {
    /// Does this record satisfy every active constraint?
    fn matches(&self, record: &T) -> bool;

    /// Number of fields currently holding a non-default constraint.
    /// Display-only; recomputed deterministically from the descriptor.
    fn active_count(&self) -> usize;

    fn is_active(&self) -> bool {
        self.active_count() > 0
    }
}

/// A sortable column for records of type `T`. Implemented on the
/// collection's key enum; direction handling lives in [`SortState`].
pub trait SortKey<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// The active sort column, if any, and its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<K> {
    pub key: Option<K>,
    pub direction: SortDirection,
}

impl<K> SortState<K> {
    pub fn unsorted() -> Self {
        SortState {
            key: None,
            direction: SortDirection::Ascending,
        }
    }
}

impl<K: PartialEq + Copy> SortState<K> {
    /// Column-header click rule: selecting the active column flips the
    /// direction, selecting a different column resets to ascending.
    pub fn select(&mut self, key: K) {
        if self.key == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Ascending;
        }
    }
}

impl<K> Default for SortState<K> {
    fn default() -> Self {
        SortState::unsorted()
    }
}

/// Keep the records satisfying every active constraint, in input order.
/// Ordering is the sorter's job; filtering is a stable pass-through.
pub fn filter_records<T, F>(records: &[T], filter: &F) -> Vec<T>
where
    T: Clone,
    F: Filter<T>,
{
    records
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect()
}

/// Return a new sequence ordered by the active key and direction. Equal
/// keys keep their input order (stable), and with no active key the input
/// order is returned unchanged. The input is never mutated.
pub fn sort_records<T, K>(records: &[T], state: &SortState<K>) -> Vec<T>
where
    T: Clone,
    K: SortKey<T> + Copy,
{
    let mut sorted = records.to_vec();
    if let Some(key) = state.key {
        sorted.sort_by(|a, b| state.direction.apply(key.compare(a, b)));
    }
    sorted
}

/// One visible slice of a filtered/sorted sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number after clamping.
    pub page: usize,
    pub page_size: usize,
    /// Length of the full sequence this page was cut from.
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based index of the first item on this page, for the
    /// "Showing X to Y of Z" footer. Zero when the sequence is empty.
    pub fn display_start(&self) -> usize {
        if self.total_items == 0 {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// 1-based index of the last item on this page.
    pub fn display_end(&self) -> usize {
        (self.page - 1) * self.page_size + self.items.len()
    }
}

/// Cut the requested 1-based page out of the sequence.
///
/// `total_pages` is `ceil(len / page_size)`; the requested page is clamped
/// into `[1, max(1, total_pages)]`, so out-of-range requests land on the
/// nearest valid page rather than failing. A zero `page_size` is
/// normalized to 1.
pub fn paginate<T: Clone>(records: &[T], page_size: usize, page: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = records.len();
    let total_pages = total_items.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    let items = if start < end {
        records[start..end].to_vec()
    } else {
        Vec::new()
    };
    Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

/// Everything a table view holds between renders: the filter descriptor,
/// the sort state and the pagination cursor, with the reset rules wired
/// in: replacing the filter, selecting a column or resizing the page all
/// snap back to page 1.
#[derive(Debug, Clone)]
pub struct TableState<F, K> {
    filter: F,
    sort: SortState<K>,
    page: usize,
    page_size: usize,
}

impl<F: Default, K> TableState<F, K> {
    pub fn new(page_size: usize) -> Self {
        TableState {
            filter: F::default(),
            sort: SortState::unsorted(),
            page: 1,
            page_size: page_size.max(1),
        }
    }
}

impl<F, K> TableState<F, K> {
    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: F) {
        self.filter = filter;
        self.page = 1;
    }

    pub fn sort_state(&self) -> &SortState<K> {
        &self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// No-op on the last page.
    pub fn next_page(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    /// No-op on the first page.
    pub fn previous_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }
}

impl<F, K: PartialEq + Copy> TableState<F, K> {
    /// Column-header click: toggle or switch the sort, back to page 1.
    pub fn select_column(&mut self, key: K) {
        self.sort.select(key);
        self.page = 1;
    }
}

impl<F, K> TableState<F, K> {
    /// The visible slice: filter, then sort, then cut the current page.
    /// Pure with respect to `records`; the state itself is not advanced.
    pub fn view<T>(&self, records: &[T]) -> Page<T>
    where
        T: Clone,
        F: Filter<T>,
        K: SortKey<T> + Copy,
    {
        let filtered = filter_records(records, &self.filter);
        let sorted = sort_records(&filtered, &self.sort);
        paginate(&sorted, self.page_size, self.page)
    }
}

impl<F: Default, K> Default for TableState<F, K> {
    /// Ten rows per page, matching the tables' default page size.
    fn default() -> Self {
        TableState::new(10)
    }
}
