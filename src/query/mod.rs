//! History query engine: snapshot → filter → sort → view list.
//!
//! Each stage produces a new sequence; the caller's snapshot is only read.

pub mod date;
pub mod filter;
pub mod normalize;
pub mod sort;
pub mod view;

pub use filter::{FilterSpec, OperationSelector, build_predicate};
pub use sort::{ParseSpecError, SortDirection, SortKey, SortSpec, build_comparator};
pub use view::HistoryView;

use crate::history::LogEntry;

use date::parse_lenient;

/// Filtered, sorted entries handed to the presentation layer. Owned by the caller.
pub type ViewList = Vec<LogEntry>;

/// Derive the view list for one snapshot and parameter set.
///
/// Filtering preserves snapshot order and the sort is stable, so entries that
/// compare equal keep their snapshot order.
pub fn query(snapshot: &[LogEntry], filter: &FilterSpec, sort: SortSpec) -> ViewList {
    let predicate = build_predicate(filter);
    let matched = snapshot.iter().filter(|&entry| predicate(entry));
    let view: ViewList = match sort.key {
        // Parse each date once instead of on every comparison.
        SortKey::Date => {
            let mut keyed: Vec<_> = matched
                .map(|entry| (parse_lenient(entry.date_str()), entry))
                .collect();
            keyed.sort_by(|(a, _), (b, _)| sort.direction.apply(a.cmp(b)));
            keyed.into_iter().map(|(_, entry)| entry.clone()).collect()
        }
        SortKey::Result => {
            let mut view: ViewList = matched.cloned().collect();
            view.sort_by(build_comparator(sort));
            view
        }
    };
    tracing::debug!(
        snapshot = snapshot.len(),
        matched = view.len(),
        key = %sort.key,
        direction = %sort.direction,
        "history query"
    );
    view
}
