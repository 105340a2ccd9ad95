//! Repair status lifecycle rules.

use chrono::{DateTime, Utc};

use crate::entities::repair_order::RepairStatus;

/// Normalise a status as typed by staff.
///
/// English snake-case names and the shop's Indonesian labels are accepted
/// case-insensitively. Anything unrecognised, blank included, is `Pending`.
pub fn normalize_status(raw: &str) -> RepairStatus {
    let key = raw.trim().to_lowercase().replace(['_', '-'], " ");
    match key.as_str() {
        "in repair" | "dalam perbaikan" => RepairStatus::InRepair,
        "ready for pickup" | "siap diambil" => RepairStatus::ReadyForPickup,
        "done" | "selesai" => RepairStatus::Done,
        _ => RepairStatus::Pending,
    }
}

/// Completion date to store for an order saved with `status`.
///
/// A `Done` order without a date is stamped with `now`; otherwise the
/// supplied value is kept as is.
pub fn resolve_completion_date(
    status: RepairStatus,
    supplied: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match (status, supplied) {
        (RepairStatus::Done, None) => Some(now),
        (_, supplied) => supplied,
    }
}

/// Counted as finished on dashboards
pub fn is_finished(status: RepairStatus) -> bool {
    matches!(status, RepairStatus::Done | RepairStatus::ReadyForPickup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pending", RepairStatus::Pending)]
    #[case("Belum Dikerjakan", RepairStatus::Pending)]
    #[case("in_repair", RepairStatus::InRepair)]
    #[case("  Dalam Perbaikan ", RepairStatus::InRepair)]
    #[case("dalam_perbaikan", RepairStatus::InRepair)]
    #[case("ready_for_pickup", RepairStatus::ReadyForPickup)]
    #[case("SIAP DIAMBIL", RepairStatus::ReadyForPickup)]
    #[case("done", RepairStatus::Done)]
    #[case("selesai", RepairStatus::Done)]
    #[case("", RepairStatus::Pending)]
    #[case("dibatalkan", RepairStatus::Pending)]
    fn statuses_normalise(#[case] raw: &str, #[case] expected: RepairStatus) {
        assert_eq!(normalize_status(raw), expected);
    }

    #[test]
    fn done_without_date_is_stamped_now() {
        let now = Utc::now();
        assert_eq!(
            resolve_completion_date(RepairStatus::Done, None, now),
            Some(now)
        );
    }

    #[test]
    fn supplied_date_is_kept_for_any_status() {
        let now = Utc::now();
        let earlier = now - chrono::Duration::days(2);
        assert_eq!(
            resolve_completion_date(RepairStatus::Done, Some(earlier), now),
            Some(earlier)
        );
        assert_eq!(
            resolve_completion_date(RepairStatus::InRepair, Some(earlier), now),
            Some(earlier)
        );
        assert_eq!(
            resolve_completion_date(RepairStatus::Pending, None, now),
            None
        );
    }

    #[test]
    fn finished_means_done_or_ready() {
        assert!(is_finished(RepairStatus::Done));
        assert!(is_finished(RepairStatus::ReadyForPickup));
        assert!(!is_finished(RepairStatus::InRepair));
        assert!(!is_finished(RepairStatus::Pending));
    }
}
