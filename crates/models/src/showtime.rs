use chrono::NaiveDateTime;

/// Display format for show start times
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accepted input formats, in the order they are tried. The first two come
/// from `datetime-local` form inputs, the last matches the display format.
const INPUT_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", DISPLAY_FORMAT];

pub fn format_start_time(start: &NaiveDateTime) -> String {
    start.format(DISPLAY_FORMAT).to_string()
}

pub fn parse_start_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// A show strictly after `now` counts as upcoming; everything else is past
pub fn is_upcoming(start: &NaiveDateTime, now: &NaiveDateTime) -> bool {
    start > now
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_format_start_time() {
        assert_eq!(format_start_time(&at(2026, 8, 1, 20, 30)), "2026-08-01 20:30:00");
    }

    #[test]
    fn test_parse_accepts_datetime_local_and_display_formats() {
        let expected = at(2026, 8, 1, 20, 30);
        assert_eq!(parse_start_time("2026-08-01T20:30"), Some(expected));
        assert_eq!(parse_start_time("2026-08-01T20:30:00"), Some(expected));
        assert_eq!(parse_start_time("2026-08-01 20:30:00"), Some(expected));
        assert_eq!(parse_start_time("next friday"), None);
    }

    #[test]
    fn test_partition_is_strict() {
        let now = at(2026, 8, 1, 12, 0);
        assert!(is_upcoming(&at(2026, 8, 1, 12, 1), &now));
        assert!(!is_upcoming(&at(2026, 8, 1, 12, 0), &now));
        assert!(!is_upcoming(&at(2026, 7, 31, 12, 0), &now));
    }
}
