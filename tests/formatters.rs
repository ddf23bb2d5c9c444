#[cfg(test)]
mod tests {
    use chrono::Duration;
    use habitual::libs::formatter::{format_clock, format_duration};

    #[test]
    fn test_format_clock_below_one_hour() {
        assert_eq!(format_clock(&Duration::zero()), "00:00");
        assert_eq!(format_clock(&Duration::seconds(5)), "00:05");
        assert_eq!(format_clock(&Duration::seconds(59 * 60 + 59)), "59:59");
    }

    #[test]
    fn test_format_clock_switches_to_hours() {
        assert_eq!(format_clock(&Duration::hours(1)), "01:00:00");
        assert_eq!(format_clock(&Duration::seconds(3725)), "01:02:05");
        assert_eq!(format_clock(&Duration::hours(27)), "27:00:00");
    }

    #[test]
    fn test_format_clock_ignores_milliseconds() {
        assert_eq!(format_clock(&Duration::milliseconds(1999)), "00:01");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(&Duration::zero()), "0m");
        assert_eq!(format_duration(&Duration::seconds(59)), "0m");
        assert_eq!(format_duration(&Duration::minutes(45)), "45m");
        assert_eq!(format_duration(&Duration::minutes(60)), "1h 0m");
        assert_eq!(format_duration(&Duration::minutes(135)), "2h 15m");
    }

    #[test]
    fn test_negative_durations_show_as_zero() {
        assert_eq!(format_clock(&Duration::seconds(-30)), "00:00");
        assert_eq!(format_duration(&Duration::minutes(-5)), "0m");
    }
}
