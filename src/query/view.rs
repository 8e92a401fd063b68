use crate::history::LogEntry;

use super::filter::FilterSpec;
use super::sort::SortSpec;
use super::{ViewList, query};

/// Caller-side history state: the latest snapshot, the current filter and
/// sort, and the view derived from them.
///
/// Every mutation re-derives the whole view from the snapshot.
#[derive(Debug, Clone, Default)]
pub struct HistoryView {
    snapshot: Vec<LogEntry>,
    filter: FilterSpec,
    sort: SortSpec,
    view: ViewList,
}

impl HistoryView {
    pub fn new(snapshot: Vec<LogEntry>, filter: FilterSpec, sort: SortSpec) -> Self {
        let mut view = Self {
            snapshot,
            filter,
            sort,
            view: Vec::new(),
        };
        view.refresh();
        view
    }

    /// Swap in a freshly fetched snapshot. A newer snapshot simply wins.
    pub fn replace_snapshot(&mut self, snapshot: Vec<LogEntry>) {
        self.snapshot = snapshot;
        self.refresh();
    }

    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
        self.refresh();
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
        self.refresh();
    }

    /// Back to all operations, any date, newest first.
    pub fn clear_filters(&mut self) {
        self.filter = FilterSpec::default();
        self.sort = SortSpec::default();
        self.refresh();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.view
    }

    pub fn snapshot(&self) -> &[LogEntry] {
        &self.snapshot
    }

    pub const fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub const fn sort(&self) -> SortSpec {
        self.sort
    }

    fn refresh(&mut self) {
        self.view = query(&self.snapshot, &self.filter, self.sort);
    }
}
