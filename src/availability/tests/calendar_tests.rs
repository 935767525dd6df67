use super::{booking, day};
use crate::availability::calendar::{CalendarMonth, DayStatus};
use crate::availability::{BlockedDates, compute_blocked_dates};
use crate::errors::Error;

#[test]
fn month_lists_every_day_once() {
    let month = CalendarMonth::new(2024, 2).unwrap();
    let days = month.days();
    assert_eq!(days.len(), 29);
    assert_eq!(days[0], day(2024, 2, 1));
    assert_eq!(days[28], day(2024, 2, 29));
}

#[test]
fn cells_mark_past_blocked_and_available() {
    let month = CalendarMonth::new(2024, 6).unwrap();
    let blocked = compute_blocked_dates(&[
        booking("past", day(2024, 6, 1), day(2024, 6, 3)),
        booking("future", day(2024, 6, 10), day(2024, 6, 12)),
    ]);
    let today = day(2024, 6, 5);
    let cells = month.cells(&blocked, today);

    assert_eq!(cells.len(), 30);
    // Past wins over blocked.
    assert_eq!(cells[1].status, DayStatus::Past);
    assert_eq!(cells[3].status, DayStatus::Past);
    assert_eq!(cells[4].status, DayStatus::Available);
    assert_eq!(cells[10].status, DayStatus::Blocked);
    assert_eq!(cells[12].status, DayStatus::Available);
    assert_eq!(month.available_count(&blocked, today), 30 - 4 - 3);
}

#[test]
fn weeks_are_monday_first_and_padded() {
    // June 2024 starts on a Saturday and ends on a Sunday.
    let month = CalendarMonth::new(2024, 6).unwrap();
    let weeks = month.weeks(&BlockedDates::new(), day(2024, 1, 1));
    assert_eq!(weeks.len(), 5);
    assert!(weeks[0][..5].iter().all(Option::is_none));
    assert_eq!(weeks[0][5].unwrap().date, day(2024, 6, 1));
    assert_eq!(weeks[4][6].unwrap().date, day(2024, 6, 30));

    let filled: usize = weeks
        .iter()
        .map(|w| w.iter().filter(|c| c.is_some()).count())
        .sum();
    assert_eq!(filled, 30);
}

#[test]
fn parse_accepts_year_month() {
    let month = CalendarMonth::parse("2024-06").unwrap();
    assert_eq!(month.first(), day(2024, 6, 1));
    assert_eq!(month.to_string(), "2024-06");
    assert_eq!(month.title(), "June 2024");
    assert_eq!(CalendarMonth::parse("2024/12").unwrap().first(), day(2024, 12, 1));
}

#[test]
fn parse_rejects_bad_month() {
    for raw in ["2024-13", "2024", "june", "2024-xx"] {
        match CalendarMonth::parse(raw) {
            Err(Error::Parse(msg)) => assert!(msg.contains("Expected YYYY-MM")),
            other => panic!("expected parse error for {raw}, got {other:?}"),
        }
    }
}

#[test]
fn next_rolls_over_year() {
    let dec = CalendarMonth::new(2024, 12).unwrap();
    assert_eq!(dec.next().first(), day(2025, 1, 1));
    assert_eq!(CalendarMonth::containing(day(2024, 6, 17)).first(), day(2024, 6, 1));
}
