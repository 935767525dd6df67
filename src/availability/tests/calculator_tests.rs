use super::{booking, day, early_today};
use crate::availability::{
    AvailabilityObserver, BlockedDates, CandidateRange, MalformedBooking, ValidationError,
    compute_blocked_dates, compute_blocked_dates_observed, expand_booking_to_dates,
    is_date_available, is_range_valid, nights, total_price,
};
use std::cell::RefCell;

#[derive(Default)]
struct RecordingObserver {
    seen: RefCell<Vec<MalformedBooking>>,
}

impl AvailabilityObserver for RecordingObserver {
    fn malformed_booking(&self, issue: &MalformedBooking) {
        self.seen.borrow_mut().push(issue.clone());
    }
}

fn blocked_of(days: &[chrono::NaiveDate]) -> BlockedDates {
    days.iter().copied().collect()
}

#[test]
fn expand_covers_every_day_inclusive() {
    let b = booking("a", day(2024, 6, 10), day(2024, 6, 12));
    let days = expand_booking_to_dates(&b);
    assert_eq!(
        days,
        vec![day(2024, 6, 10), day(2024, 6, 11), day(2024, 6, 12)]
    );
}

#[test]
fn expand_length_matches_span_plus_one() {
    let from = day(2024, 2, 20);
    for span in 0..40 {
        let to = from + chrono::Duration::days(span);
        let days = expand_booking_to_dates(&booking("x", from, to));
        assert_eq!(days.len() as i64, span + 1);
        assert_eq!(days.first(), Some(&from));
        assert_eq!(days.last(), Some(&to));
    }
}

#[test]
fn expand_single_day_booking() {
    let d = day(2024, 6, 10);
    assert_eq!(expand_booking_to_dates(&booking("a", d, d)), vec![d]);
}

#[test]
fn expand_reversed_booking_is_empty() {
    let b = booking("bad", day(2024, 6, 12), day(2024, 6, 10));
    assert!(expand_booking_to_dates(&b).is_empty());
}

#[test]
fn expand_crosses_month_and_leap_day() {
    let b = booking("a", day(2024, 2, 28), day(2024, 3, 1));
    assert_eq!(
        expand_booking_to_dates(&b),
        vec![day(2024, 2, 28), day(2024, 2, 29), day(2024, 3, 1)]
    );
}

#[test]
fn blocked_dates_scenario_from_single_booking() {
    let blocked = compute_blocked_dates(&[booking("a", day(2024, 6, 10), day(2024, 6, 12))]);
    assert_eq!(
        blocked.sorted(),
        vec![day(2024, 6, 10), day(2024, 6, 11), day(2024, 6, 12)]
    );
    assert!(!is_date_available(day(2024, 6, 11), &blocked, early_today()));
    assert!(is_date_available(day(2024, 6, 13), &blocked, early_today()));
}

#[test]
fn blocked_dates_is_union_of_parts() {
    let b1 = booking("a", day(2024, 6, 10), day(2024, 6, 12));
    let b2 = booking("b", day(2024, 6, 12), day(2024, 6, 15));
    let both = compute_blocked_dates(&[b1.clone(), b2.clone()]);
    let union = compute_blocked_dates(&[b1]).union(&compute_blocked_dates(&[b2]));
    assert_eq!(both, union);
    assert_eq!(both.len(), 6);
}

#[test]
fn blocked_dates_is_idempotent() {
    let bookings = vec![
        booking("a", day(2024, 6, 10), day(2024, 6, 12)),
        booking("b", day(2024, 7, 1), day(2024, 7, 3)),
    ];
    assert_eq!(compute_blocked_dates(&bookings), compute_blocked_dates(&bookings));
}

#[test]
fn blocked_dates_skip_and_report_malformed_records() {
    let observer = RecordingObserver::default();
    let bookings = vec![
        booking("ok", day(2024, 6, 10), day(2024, 6, 11)),
        booking("bad", day(2024, 6, 20), day(2024, 6, 18)),
    ];
    let blocked = compute_blocked_dates_observed(&bookings, &observer);

    assert_eq!(blocked.len(), 2);
    assert!(!blocked.contains(day(2024, 6, 19)));
    let seen = observer.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].id, "bad");
    assert!(seen[0].to_string().contains("skipped"));
}

#[test]
fn empty_bookings_block_nothing() {
    assert!(compute_blocked_dates(&[]).is_empty());
}

#[test]
fn date_availability_rules() {
    let blocked = blocked_of(&[day(2024, 6, 10)]);
    let today = day(2024, 6, 5);
    assert!(!is_date_available(day(2024, 6, 4), &blocked, today));
    assert!(is_date_available(today, &blocked, today));
    assert!(!is_date_available(day(2024, 6, 10), &blocked, today));
    assert!(is_date_available(day(2024, 6, 11), &blocked, today));
}

#[test]
fn range_overlap_scenario() {
    let blocked = blocked_of(&[day(2024, 6, 10)]);
    let res = is_range_valid(day(2024, 6, 9), day(2024, 6, 11), &blocked, early_today(), 2, 4);
    assert_eq!(
        res,
        Err(ValidationError::Overlap {
            date: day(2024, 6, 10)
        })
    );
}

#[test]
fn range_overlap_includes_endpoints() {
    let blocked = blocked_of(&[day(2024, 6, 11)]);
    let res = is_range_valid(day(2024, 6, 9), day(2024, 6, 11), &blocked, early_today(), 2, 4);
    assert!(matches!(res, Err(ValidationError::Overlap { .. })));
    let res = is_range_valid(day(2024, 6, 11), day(2024, 6, 13), &blocked, early_today(), 2, 4);
    assert!(matches!(res, Err(ValidationError::Overlap { .. })));
}

#[test]
fn range_overlap_stops_at_first_blocked_day_of_long_stay() {
    let blocked = blocked_of(&[day(2024, 6, 11), day(2024, 6, 20)]);
    let res = is_range_valid(day(2024, 6, 10), day(9999, 12, 31), &blocked, early_today(), 2, 4);
    assert_eq!(
        res,
        Err(ValidationError::Overlap {
            date: day(2024, 6, 11)
        })
    );
}

#[test]
fn range_order_checked_first() {
    // Also in the past, overlapping, and over capacity: order still wins.
    let blocked = blocked_of(&[day(2024, 6, 10)]);
    let res = is_range_valid(day(2024, 6, 11), day(2024, 6, 9), &blocked, day(2025, 1, 1), 0, 4);
    assert_eq!(res, Err(ValidationError::InvalidOrder));
}

#[test]
fn range_same_day_is_invalid_order() {
    let d = day(2024, 6, 11);
    let res = is_range_valid(d, d, &BlockedDates::new(), early_today(), 2, 4);
    assert_eq!(res, Err(ValidationError::InvalidOrder));
}

#[test]
fn range_in_past_reported_before_overlap() {
    let blocked = blocked_of(&[day(2024, 6, 10)]);
    let res = is_range_valid(day(2024, 6, 9), day(2024, 6, 11), &blocked, day(2024, 6, 10), 2, 4);
    assert_eq!(res, Err(ValidationError::PastDate));
}

#[test]
fn range_guest_count_scenario() {
    let res = is_range_valid(
        day(2024, 6, 11),
        day(2024, 6, 15),
        &BlockedDates::new(),
        early_today(),
        5,
        4,
    );
    assert_eq!(
        res,
        Err(ValidationError::GuestCountOutOfRange {
            guests: 5,
            max_guests: 4
        })
    );
}

#[test]
fn range_zero_guests_rejected() {
    let res = is_range_valid(
        day(2024, 6, 11),
        day(2024, 6, 15),
        &BlockedDates::new(),
        early_today(),
        0,
        4,
    );
    assert!(matches!(res, Err(ValidationError::GuestCountOutOfRange { .. })));
}

#[test]
fn range_valid_when_all_checks_pass() {
    let blocked = blocked_of(&[day(2024, 6, 10), day(2024, 6, 16)]);
    let res = is_range_valid(day(2024, 6, 11), day(2024, 6, 15), &blocked, early_today(), 4, 4);
    assert_eq!(res, Ok(()));
}

#[test]
fn range_may_start_today() {
    let today = day(2024, 6, 11);
    let res = is_range_valid(today, day(2024, 6, 12), &BlockedDates::new(), today, 1, 1);
    assert_eq!(res, Ok(()));
}

#[test]
fn nights_and_price() {
    assert_eq!(nights(day(2024, 6, 10), day(2024, 6, 13)), 3);
    assert_eq!(nights(day(2024, 6, 13), day(2024, 6, 10)), 0);
    assert_eq!(total_price(120.0, day(2024, 6, 10), day(2024, 6, 13)), 360.0);
}

#[test]
fn candidate_range_delegates_to_calculator() {
    let candidate = CandidateRange::new(day(2024, 6, 11), day(2024, 6, 14), 2);
    assert_eq!(candidate.validate(&BlockedDates::new(), early_today(), 4), Ok(()));
    assert_eq!(candidate.nights(), 3);
    assert_eq!(candidate.total_price(50.0), 150.0);

    let blocked = blocked_of(&[day(2024, 6, 12)]);
    assert!(candidate.validate(&blocked, early_today(), 4).is_err());
}

#[test]
fn validation_messages_are_user_facing() {
    assert_eq!(
        ValidationError::PastDate.to_string(),
        "Check-in date cannot be in the past."
    );
    assert_eq!(
        ValidationError::Overlap {
            date: day(2024, 6, 10)
        }
        .to_string(),
        "The venue is already booked on 2024-06-10."
    );
}
