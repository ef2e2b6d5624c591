//! Conflict detection between a candidate window and the committed set.
//!
//! The committed set handed to these functions must already be restricted to
//! the candidate's `(location, date)`. Storage does that with an equality
//! query; nothing here filters or scans beyond the slice it is given.

use serde::{Deserialize, Serialize};

use crate::api::EventId;
use crate::models::TimeWindow;

/// Describes which committed event a rejected candidate collided with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub event_id: EventId,
    pub window: TimeWindow,
}

/// Return the first committed window that overlaps `candidate`.
///
/// # Arguments
/// * `candidate` - Window requested by the caller
/// * `committed` - Windows already persisted at the candidate's location and date
///
/// # Returns
/// `Some(window)` for the first overlapping entry, `None` if the candidate is free.
pub fn first_conflict<'a, I>(candidate: &TimeWindow, committed: I) -> Option<&'a TimeWindow>
where
    I: IntoIterator<Item = &'a TimeWindow>,
{
    committed.into_iter().find(|w| candidate.overlaps(w))
}

/// Check whether `candidate` overlaps any committed window.
///
/// An empty committed set never conflicts.
pub fn has_conflict<'a, I>(candidate: &TimeWindow, committed: I) -> bool
where
    I: IntoIterator<Item = &'a TimeWindow>,
{
    first_conflict(candidate, committed).is_some()
}

/// Same as [`first_conflict`] but keyed by event, for diagnostics.
pub fn find_conflicting_event<'a, I>(candidate: &TimeWindow, committed: I) -> Option<ConflictReport>
where
    I: IntoIterator<Item = &'a (EventId, TimeWindow)>,
{
    committed
        .into_iter()
        .find(|(_, w)| candidate.overlaps(w))
        .map(|(id, w)| ConflictReport {
            event_id: *id,
            window: w.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn window(start: u32, end: u32) -> TimeWindow {
        TimeWindow::new(
            "Test Location",
            NaiveDate::from_ymd_opt(2024, 9, 15).unwrap(),
            NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_empty_committed_set_never_conflicts() {
        let committed: Vec<TimeWindow> = vec![];
        assert!(!has_conflict(&window(10, 12), &committed));
    }

    #[test]
    fn test_conflict_found_among_many() {
        let committed = vec![window(6, 7), window(8, 9), window(13, 15)];
        assert!(has_conflict(&window(14, 16), &committed));
        assert_eq!(first_conflict(&window(14, 16), &committed), Some(&committed[2]));
    }

    #[test]
    fn test_gap_between_committed_windows_is_free() {
        let committed = vec![window(8, 9), window(13, 15)];
        assert!(!has_conflict(&window(10, 12), &committed));
        assert!(first_conflict(&window(10, 12), &committed).is_none());
    }

    #[test]
    fn test_boundary_touch_conflicts() {
        let committed = vec![window(10, 12)];
        assert!(has_conflict(&window(12, 13), &committed));
    }

    #[test]
    fn test_find_conflicting_event_reports_id() {
        let committed = vec![
            (EventId::new(1), window(8, 9)),
            (EventId::new(7), window(10, 12)),
        ];
        let report = find_conflicting_event(&window(11, 13), &committed).unwrap();
        assert_eq!(report.event_id, EventId::new(7));
        assert_eq!(report.window, window(10, 12));

        assert!(find_conflicting_event(&window(13, 14), &committed).is_none());
    }
}
