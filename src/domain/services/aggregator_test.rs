use super::compute_totals;
use super::format_total_distance;
use super::format_total_duration;
use super::parse_distance;
use super::parse_duration;
use crate::domain::models::LegInfo;

fn leg(distance: &str, duration: &str) -> LegInfo {
    return LegInfo {
        distance: distance.to_string(),
        duration: duration.to_string(),
    };
}

mod distance {
    use super::*;

    #[test]
    fn it_passes_kilometers_through() {
        assert_eq!(parse_distance("0.8 km"), 0.8);
        assert_eq!(parse_distance("12 KM"), 12.0);
    }

    #[test]
    fn it_converts_miles() {
        assert!((parse_distance("1 mi") - 1.60934).abs() < 1e-9);
        assert!((parse_distance("2.5 Mi") - 4.02335).abs() < 1e-9);
    }

    #[test]
    fn it_falls_back_to_zero() {
        assert_eq!(parse_distance("garbage"), 0.0);
        assert_eq!(parse_distance(""), 0.0);
        assert_eq!(parse_distance("km"), 0.0);
        assert_eq!(parse_distance("about km"), 0.0);
        assert_eq!(parse_distance("3 furlongs"), 0.0);
        assert_eq!(parse_distance("NaN km"), 0.0);
    }

    #[test]
    fn it_tolerates_extra_whitespace() {
        assert_eq!(parse_distance("  4.2   km  "), 4.2);
    }
}

mod duration {
    use super::*;

    #[test]
    fn it_combines_hours_and_minutes() {
        assert_eq!(parse_duration("1 hour 20 mins"), 80);
        assert_eq!(parse_duration("2 hours 5 min"), 125);
    }

    #[test]
    fn it_reads_minutes_only() {
        assert_eq!(parse_duration("45 mins"), 45);
        assert_eq!(parse_duration("1 min"), 1);
    }

    #[test]
    fn it_reads_hours_only() {
        assert_eq!(parse_duration("3 hours"), 180);
    }

    #[test]
    fn it_is_case_insensitive_and_spacing_tolerant() {
        assert_eq!(parse_duration("1Hour 2MINS"), 62);
    }

    #[test]
    fn it_falls_back_to_zero() {
        assert_eq!(parse_duration(""), 0);
        assert_eq!(parse_duration("a while"), 0);
        assert_eq!(parse_duration("ninety mins"), 0);
    }
}

mod totals {
    use super::*;

    #[test]
    fn it_sums_legs() {
        let totals = compute_totals(&[leg("0.8 km", "2 mins"), leg("1.2 km", "3 mins")]);

        assert!((totals.total_distance_km - 2.0).abs() < 1e-9);
        assert_eq!(totals.total_duration_min, 5);
    }

    #[test]
    fn it_mixes_units_and_ignores_garbage() {
        let totals = compute_totals(&[
            leg("1 mi", "1 hour 3 mins"),
            leg("garbage", "soon"),
            leg("1 km", "7 mins"),
        ]);

        assert!((totals.total_distance_km - 2.60934).abs() < 1e-9);
        assert_eq!(totals.total_duration_min, 70);
    }

    #[test]
    fn it_is_zero_without_legs() {
        let totals = compute_totals(&[]);
        assert_eq!(totals.total_distance_km, 0.0);
        assert_eq!(totals.total_duration_min, 0);
    }
}

mod formatting {
    use super::*;

    #[test]
    fn it_formats_distance_with_one_decimal() {
        assert_eq!(format_total_distance(2.0), "2.0 km");
        assert_eq!(format_total_distance(2.6093), "2.6 km");
    }

    #[test]
    fn it_formats_duration() {
        assert_eq!(format_total_duration(0), "0 mins");
        assert_eq!(format_total_duration(1), "1 min");
        assert_eq!(format_total_duration(45), "45 mins");
        assert_eq!(format_total_duration(60), "1 hr 0 mins");
        assert_eq!(format_total_duration(61), "1 hr 1 min");
        assert_eq!(format_total_duration(125), "2 hrs 5 mins");
    }
}
