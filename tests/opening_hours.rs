use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use test_log::test;
use tripcore::{NextChange, OpeningHours, ParseError, parse_opening_hours};

const SHOP: &str = "Su-Th 08:00-21:00; Fr-Sa 08:00-22:00";
const RESTAURANT: &str = "Su-Mo off; Tu-Sa 11:00-15:00,17:00-21:00";

// 2012-11-11 is a Sunday.
fn november(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2012, 11, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[test]
fn opening_hours_is_open() {
    let sunday = 11;

    let hours = OpeningHours::from_osm_string(SHOP, november(sunday, 7, 59)).unwrap();
    assert!(!hours.is_open());

    let hours = OpeningHours::from_osm_string(SHOP, november(sunday, 8, 0)).unwrap();
    assert!(hours.is_open());

    let hours = OpeningHours::from_osm_string(SHOP, november(sunday, 20, 59)).unwrap();
    assert!(hours.is_open());

    let hours = OpeningHours::from_osm_string(SHOP, november(sunday, 21, 0)).unwrap();
    assert!(!hours.is_open());
}

#[test]
fn opening_hours_weekly_ranges() {
    let sunday_morning = november(11, 8, 0);
    let hours = OpeningHours::from_osm_string(SHOP, sunday_morning).unwrap();

    assert_eq!(hours.next_change(), NextChange::At(november(11, 21, 0)));

    let ranges = hours.weekly_ranges();
    assert_eq!(ranges.len(), 7);

    let days: Vec<String> = ranges.iter().map(|day| day.day.to_string()).collect();
    assert_eq!(days, ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);

    for day in &ranges {
        assert_eq!(day.intervals.len(), 1, "{}", day.day);
        let interval = &day.intervals[0];

        assert_eq!(interval.start.time(), clock(8, 0));
        match day.day.to_string().as_str() {
            "Fri" | "Sat" => assert_eq!(interval.end.time(), clock(22, 0)),
            _ => assert_eq!(interval.end.time(), clock(21, 0)),
        }
        assert!(!interval.truncated);
    }
}

#[test]
fn opening_hours_next_change_closed_today_and_tomorrow() {
    let sunday_morning = november(11, 8, 0);
    let hours = OpeningHours::from_osm_string(RESTAURANT, sunday_morning).unwrap();

    assert!(!hours.is_open());
    assert_eq!(hours.next_change_is_today(), Some(false));
    assert_eq!(hours.next_change_is_tomorrow(), Some(false));
    // first Tuesday opening, more than a day away
    assert_eq!(hours.next_change().instant().map(|t| t.hour()), Some(11));
}

#[test]
fn opening_hours_next_change_closed_until_tomorrow_morning() {
    let monday_morning = november(12, 8, 0);
    let hours = OpeningHours::from_osm_string(RESTAURANT, monday_morning).unwrap();

    assert_eq!(hours.next_change_is_today(), Some(false));
    assert_eq!(hours.next_change_is_tomorrow(), Some(true));
    assert_eq!(hours.next_change().instant().map(|t| t.hour()), Some(11));
}

#[test]
fn opening_hours_next_change_closed_until_later_this_morning() {
    let tuesday_morning = november(13, 8, 0);
    let hours = OpeningHours::from_osm_string(RESTAURANT, tuesday_morning).unwrap();

    assert_eq!(hours.next_change_is_today(), Some(true));
    assert_eq!(hours.next_change_is_tomorrow(), Some(false));
    assert_eq!(hours.next_change(), NextChange::At(november(13, 11, 0)));
}

#[test]
fn opening_hours_next_change_across_month_boundary() {
    // Friday 2012-11-30 evening; the next opening is Saturday December 1st.
    let friday_evening = november(30, 20, 0);
    let hours = OpeningHours::from_osm_string("Sa 10:00-12:00", friday_evening).unwrap();

    assert!(!hours.is_open());
    assert_eq!(hours.next_change_is_today(), Some(false));
    assert_eq!(hours.next_change_is_tomorrow(), Some(true));
    assert_eq!(
        hours.next_change().instant().map(|t| t.date()),
        NaiveDate::from_ymd_opt(2012, 12, 1)
    );
}

#[test]
fn opening_hours_lunch_closure_intervals() {
    let tuesday_morning = november(13, 8, 0);
    let hours = OpeningHours::from_osm_string(RESTAURANT, tuesday_morning).unwrap();

    let ranges = hours.weekly_ranges();
    let tuesday = &ranges[0];
    assert_eq!(tuesday.day.to_string(), "Tue");
    assert_eq!(tuesday.intervals.len(), 2);
    assert_eq!(tuesday.intervals[0].start.time(), clock(11, 0));
    assert_eq!(tuesday.intervals[0].end.time(), clock(15, 0));
    assert_eq!(tuesday.intervals[1].start.time(), clock(17, 0));
    assert_eq!(tuesday.intervals[1].end.time(), clock(21, 0));

    // Sunday and Monday are off
    assert!(ranges[5].intervals.is_empty());
    assert!(ranges[6].intervals.is_empty());
}

#[test]
fn opening_hours_cross_midnight() {
    // 2012-11-16 is a Friday.
    let spec = "Fr 22:00-02:00";

    let hours = OpeningHours::from_osm_string(spec, november(16, 23, 0)).unwrap();
    assert!(hours.is_open());
    assert_eq!(hours.next_change(), NextChange::At(november(17, 2, 0)));

    let hours = OpeningHours::from_osm_string(spec, november(17, 1, 30)).unwrap();
    assert!(hours.is_open());

    let hours = OpeningHours::from_osm_string(spec, november(17, 2, 0)).unwrap();
    assert!(!hours.is_open());

    let friday = &OpeningHours::from_osm_string(spec, november(16, 12, 0))
        .unwrap()
        .weekly_ranges()[0];
    assert_eq!(friday.intervals.len(), 1);
    assert!(friday.intervals[0].truncated);
}

#[test]
fn opening_hours_always_open_is_unresolved() {
    let hours = OpeningHours::from_osm_string("24/7", november(11, 8, 0)).unwrap();

    assert!(hours.is_open());
    assert_eq!(hours.next_change(), NextChange::Unresolved);
    assert_eq!(hours.next_change_is_today(), None);
    assert_eq!(hours.next_change_is_tomorrow(), None);
}

#[test]
fn opening_hours_later_rule_wins() {
    let tuesday_noon = november(13, 12, 0);

    let hours = OpeningHours::from_osm_string("Mo-Su 08:00-18:00; Tu off", tuesday_noon).unwrap();
    assert!(!hours.is_open());

    let hours = OpeningHours::from_osm_string("Mo-Su 08:00-18:00; Tu off", november(14, 12, 0))
        .unwrap();
    assert!(hours.is_open());
}

#[test]
fn opening_hours_back_to_back_spans_are_not_a_change() {
    // The 15:00 boundary joins two open spans; the next real flip is 20:00.
    let spec = "Tu 11:00-15:00,15:00-20:00";
    let hours = OpeningHours::from_osm_string(spec, november(13, 12, 0)).unwrap();

    assert!(hours.is_open());
    assert_eq!(hours.next_change(), NextChange::At(november(13, 20, 0)));
}

#[test]
fn opening_hours_rule_comment_on_intervals() {
    let spec = r#"Mo 10:00-14:00 "by appointment only""#;
    let hours = OpeningHours::from_osm_string(spec, november(12, 9, 0)).unwrap();

    let monday = &hours.weekly_ranges()[0];
    assert_eq!(
        monday.intervals[0].comment.as_deref(),
        Some("by appointment only")
    );
}

#[test]
fn opening_hours_reparse_is_idempotent() {
    let first = parse_opening_hours(RESTAURANT).unwrap();
    let second = parse_opening_hours(RESTAURANT).unwrap();
    assert_eq!(first, second);

    for instant in [
        november(11, 8, 0),
        november(13, 12, 0),
        november(16, 23, 59),
    ] {
        let a = OpeningHours::new(&first, instant);
        let b = OpeningHours::new(&second, instant);
        assert_eq!(a.is_open(), b.is_open());
        assert_eq!(a.next_change(), b.next_change());
        assert_eq!(a.weekly_ranges(), b.weekly_ranges());
    }
}

#[test]
fn opening_hours_unparseable_specs_fail_fast() {
    let sunday_morning = november(11, 8, 0);

    for spec in ["", "Mo-Fr", "PH off", "Mo 8-10", "Mo 25:00-26:00", "week 1-10 Mo 08:00-10:00"] {
        assert!(
            OpeningHours::from_osm_string(spec, sunday_morning).is_err(),
            "{spec:?} should be rejected"
        );
    }

    assert_eq!(
        parse_opening_hours("Xx 08:00-10:00"),
        Err(ParseError::UnknownWeekday("Xx".to_string()))
    );
}
