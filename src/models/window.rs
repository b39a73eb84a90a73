//! Reservation window (closed time interval)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Closed interval `[start, end]` during which equipment is reserved.
///
/// Touching endpoints overlap: equipment handed back at the instant another
/// list takes it out is still counted twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct ReservationWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReservationWindow {
    /// Build a window, returning `None` unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Window from an optional pair; a half-specified pair counts as absent.
    pub fn from_pair(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Option<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end),
            _ => None,
        }
    }

    pub fn overlaps(&self, other: &ReservationWindow) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_rejects_empty_or_inverted() {
        assert!(ReservationWindow::new(day(3), day(3)).is_none());
        assert!(ReservationWindow::new(day(4), day(3)).is_none());
        assert!(ReservationWindow::new(day(3), day(4)).is_some());
    }

    #[test]
    fn test_half_pair_is_absent() {
        assert!(ReservationWindow::from_pair(Some(day(1)), None).is_none());
        assert!(ReservationWindow::from_pair(None, Some(day(2))).is_none());
        assert!(ReservationWindow::from_pair(None, None).is_none());
    }

    #[test]
    fn test_touching_endpoints_overlap() {
        let a = ReservationWindow::new(day(1), day(3)).unwrap();
        let b = ReservationWindow::new(day(3), day(5)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_disjoint_windows() {
        let a = ReservationWindow::new(day(1), day(3)).unwrap();
        let b = ReservationWindow::new(day(4), day(5)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }
}
