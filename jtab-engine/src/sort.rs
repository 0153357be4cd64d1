//! Sort state and its activation-driven transitions

/// Direction applied to the base comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Rows in base comparator order.
    #[default]
    Ascending,
    /// Base comparator order negated.
    Descending,
}

/// The active sort column and direction for a projection.
///
/// The default state has no key: rows keep their document order until a
/// column is activated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    /// Column the projection is ordered by, if any.
    pub key: Option<String>,
    /// Direction applied when `key` is set.
    pub direction: SortDirection,
}

impl SortState {
    /// Apply a column-header activation.
    ///
    /// Activating a column that is not currently sorted selects it
    /// ascending; activating the ascending column flips it to descending;
    /// activating the descending column restarts at ascending. There is no
    /// unsorted state reachable from a sorted column.
    pub fn toggle(&mut self, column: &str) {
        if self.key.as_deref() == Some(column) && self.direction == SortDirection::Ascending {
            self.direction = SortDirection::Descending;
        } else {
            self.key = Some(column.to_string());
            self.direction = SortDirection::Ascending;
        }
    }
}
