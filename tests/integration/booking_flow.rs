use std::io::Cursor;

use chrono::NaiveDate;
use holidaze::api::transport::Method;
use holidaze::availability::ValidationError;
use holidaze::command::dispatch;
use holidaze::core::context::AppContext;
use holidaze::errors::{Error, Result};

use crate::common::{CannedTransport, build_context, guest, make_temp_dir, read_log_contents};

const VENUE: &str = r#"{
    "data": {
        "id": "v-1",
        "name": "Fjord Cabin",
        "description": "By the water.",
        "media": [],
        "price": 950,
        "maxGuests": 4,
        "rating": 4.5,
        "meta": { "wifi": true, "parking": false, "breakfast": false, "pets": false },
        "location": { "city": "Bergen", "country": "Norway" },
        "owner": { "name": "olga", "email": "olga@stud.noroff.no", "venueManager": true },
        "bookings": [
            { "id": "b-1", "dateFrom": "2026-06-12T00:00:00.000Z", "dateTo": "2026-06-14T00:00:00.000Z", "guests": 2 }
        ]
    },
    "meta": {}
}"#;

const CREATED: &str = r#"{"data":{"id":"b-2","dateFrom":"2026-06-15T00:00:00.000Z","dateTo":"2026-06-18T00:00:00.000Z","guests":2},"meta":{}}"#;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn run(ctx: &mut AppContext, command: &str, args: &[&str]) -> Result<()> {
    let argv: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let mut input = Cursor::new(Vec::new());
    dispatch(ctx, command, &argv, &mut input)
}

#[test]
fn free_range_is_quoted_and_posted() {
    let dir = make_temp_dir("booking");
    let transport = CannedTransport::default();
    transport.reply(200, VENUE).reply(201, CREATED);
    let (ctx, logger) = build_context(&dir, &transport, guest("kari"));
    let mut ctx = ctx.with_today(day(2026, 6, 10));

    run(&mut ctx, "book", &["v-1", "15/06/2026", "2026-06-18", "2"]).unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].method, Method::Get);
    assert_eq!(sent[0].url.path(), "/holidaze/venues/v-1");
    assert_eq!(sent[1].method, Method::Post);
    assert_eq!(sent[1].header("Authorization"), Some("Bearer token-kari"));
    let body: serde_json::Value =
        serde_json::from_str(sent[1].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["dateFrom"], "2026-06-15");
    assert_eq!(body["dateTo"], "2026-06-18");
    assert_eq!(body["venueId"], "v-1");

    let out = logger.captured_text();
    assert!(out.contains("Fjord Cabin: 2026-06-15 to 2026-06-18, 2 guest(s)"));
    assert!(out.contains("3 night(s) x 950 = 2850"));
    assert!(out.contains("Booked Fjord Cabin (booking id b-2)."));

    let log = read_log_contents(&dir).expect("a log file should exist");
    assert!(log.contains("Booked Fjord Cabin (booking id b-2)."));
}

#[test]
fn overlapping_range_never_reaches_the_booking_endpoint() {
    let dir = make_temp_dir("booking");
    let transport = CannedTransport::default();
    transport.reply(200, VENUE);
    let (ctx, _logger) = build_context(&dir, &transport, guest("kari"));
    let mut ctx = ctx.with_today(day(2026, 6, 10));

    let err = run(&mut ctx, "book", &["v-1", "2026-06-11", "2026-06-13", "2"]).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::Overlap { date }) if date == day(2026, 6, 12)
    ));
    assert_eq!(transport.sent().len(), 1);

    let log = read_log_contents(&dir).expect("a log file should exist");
    assert!(log.contains("Rejected 2026-06-11 to 2026-06-13 at venue v-1"));
}

#[test]
fn api_conflict_is_reported_after_local_checks_pass() {
    let dir = make_temp_dir("booking");
    let transport = CannedTransport::default();
    transport.reply(200, VENUE).reply(
        409,
        r#"{"errors":[{"message":"The venue is already booked for the selected dates"}],"status":"Conflict","statusCode":409}"#,
    );
    let (ctx, _logger) = build_context(&dir, &transport, guest("kari"));
    let mut ctx = ctx.with_today(day(2026, 6, 10));

    let err = run(&mut ctx, "book", &["v-1", "2026-06-20", "2026-06-22", "1"]).unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 409);
            assert!(message.contains("already booked"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[test]
fn calendar_reads_bookings_from_the_api() {
    let dir = make_temp_dir("booking");
    let transport = CannedTransport::default();
    transport.reply(200, VENUE);
    let (ctx, logger) = build_context(&dir, &transport, guest("kari"));
    let mut ctx = ctx.with_today(day(2026, 6, 10));

    run(&mut ctx, "calendar", &["v-1"]).unwrap();
    let out = logger.captured_text();
    assert!(out.contains("FJORD CABIN: JUNE 2026"));
    assert!(out.contains("12* | 13* | 14*"));
    assert!(out.ends_with("18 day(s) available"));
}
