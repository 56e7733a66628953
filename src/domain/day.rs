use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Midnight of `now`'s calendar day in `now`'s own timezone.
///
/// An ambiguous midnight resolves to the earlier instant. If midnight falls
/// inside a DST gap, the first representable minute of the day is used.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let tz = now.timezone();
    let midnight = now.date_naive().and_time(NaiveTime::MIN);

    (0..MINUTES_PER_DAY)
        .find_map(|minute| {
            tz.from_local_datetime(&(midnight + Duration::minutes(minute)))
                .earliest()
        })
        .unwrap_or_else(|| now.clone())
        .with_timezone(&Utc)
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Local};

    use super::*;

    #[test]
    fn rewinds_to_local_midnight() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 5, 2, 13, 45, 10).unwrap();

        let start = start_of_day(&now);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 5, 1, 22, 0, 0).unwrap());
    }

    #[test]
    fn midnight_is_its_own_start() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();

        assert_eq!(start_of_day(&now), now.with_timezone(&Utc));
    }

    #[test]
    fn stays_on_the_same_local_date() {
        let now = Local::now();
        let start = start_of_day(&now);

        assert!(start <= now.with_timezone(&Utc));
        assert_eq!(start.with_timezone(&Local).date_naive(), now.date_naive());
    }
}
