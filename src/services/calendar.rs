//! Shop-local calendar days.
//!
//! Timestamps are stored in UTC; "today", report ranges and chart buckets are
//! shop wall-clock days at a fixed UTC offset.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy)]
pub struct ShopCalendar {
    offset: FixedOffset,
}

impl ShopCalendar {
    pub fn new(utc_offset_hours: i32) -> Result<Self, ServiceError> {
        FixedOffset::east_opt(utc_offset_hours * 3600)
            .map(|offset| Self { offset })
            .ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "invalid shop UTC offset: {} hours",
                    utc_offset_hours
                ))
            })
    }

    /// Shop-local date of an instant
    pub fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.offset).date_naive()
    }

    pub fn today(&self) -> NaiveDate {
        self.local_date(Utc::now())
    }

    /// UTC instant at which a shop-local day begins
    pub fn day_start(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
        self.offset
            .from_local_datetime(&midnight)
            .single()
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight) - self.offset_duration())
    }

    /// Half-open UTC bounds covering every shop-local day in `[start, end]`
    pub fn range_bounds(&self, start: NaiveDate, end: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.day_start(start), self.day_start(end) + Duration::days(1))
    }

    pub fn month_start(date: NaiveDate) -> NaiveDate {
        date.with_day(1).unwrap_or(date)
    }

    /// The `n` days ending at `end`, oldest first
    pub fn trailing_days(end: NaiveDate, n: u32) -> Vec<NaiveDate> {
        (0..n as i64)
            .rev()
            .map(|back| end - Duration::days(back))
            .collect()
    }

    fn offset_duration(&self) -> Duration {
        Duration::seconds(self.offset.local_minus_utc() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jakarta() -> ShopCalendar {
        ShopCalendar::new(7).unwrap()
    }

    #[test]
    fn late_evening_utc_is_next_day_in_jakarta() {
        let at = Utc.with_ymd_and_hms(2025, 3, 9, 18, 30, 0).unwrap();
        assert_eq!(
            jakarta().local_date(at),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
        );
    }

    #[test]
    fn range_bounds_cover_whole_local_days() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let (start, end) = jakarta().range_bounds(d, d);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 3, 9, 17, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 3, 10, 17, 0, 0).unwrap());
    }

    #[test]
    fn trailing_days_are_oldest_first() {
        let end = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let days = ShopCalendar::trailing_days(end, 7);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2025, 2, 24).unwrap());
        assert_eq!(days[6], end);
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        assert!(ShopCalendar::new(30).is_err());
        assert_eq!(
            ShopCalendar::month_start(NaiveDate::from_ymd_opt(2025, 2, 17).unwrap()),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
        );
    }
}
