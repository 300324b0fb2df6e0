#![forbid(unsafe_code)]
use chrono::NaiveDate;
use conges::calendar::{bookings_on, listing, month_weeks, year_choices, year_occupancy};
use conges::{assign_color, Booking};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn booking(member: &str, start: NaiveDate, end: NaiveDate) -> Booking {
    Booking::new(member, start, end, assign_color(member)).unwrap()
}

#[test]
fn june_2024_starts_on_saturday() {
    let weeks = month_weeks(2024, 6).unwrap();
    assert_eq!(weeks.len(), 5);
    assert_eq!(weeks[0][..5], [None; 5]);
    assert_eq!(weeks[0][5], Some(d(2024, 6, 1)));
    assert_eq!(weeks[4][6], Some(d(2024, 6, 30)));
}

#[test]
fn february_2021_fits_four_rows() {
    let weeks = month_weeks(2021, 2).unwrap();
    assert_eq!(weeks.len(), 4);
    assert_eq!(weeks[0][0], Some(d(2021, 2, 1)));
    assert_eq!(weeks[3][6], Some(d(2021, 2, 28)));
}

#[test]
fn invalid_month_is_an_error() {
    assert!(month_weeks(2024, 13).is_err());
    assert!(month_weeks(2024, 0).is_err());
}

#[test]
fn occupancy_is_clipped_to_the_year() {
    let bookings = vec![
        booking("Alice", d(2023, 12, 30), d(2024, 1, 2)),
        booking("Bob", d(2024, 1, 2), d(2024, 1, 3)),
    ];
    let days = year_occupancy(&bookings, 2024).unwrap();
    let keys: Vec<NaiveDate> = days.keys().copied().collect();
    assert_eq!(keys, [d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3)]);
    assert_eq!(days[&d(2024, 1, 2)].len(), 2);

    assert_eq!(bookings_on(&bookings, d(2023, 12, 31)).len(), 1);
    assert!(bookings_on(&bookings, d(2024, 1, 4)).is_empty());
}

#[test]
fn listing_sorted_by_start_then_member() {
    let bookings = vec![
        booking("Bob", d(2024, 6, 10), d(2024, 6, 20)),
        booking("Carol", d(2024, 6, 1), d(2024, 6, 3)),
        booking("Alice", d(2024, 6, 1), d(2024, 6, 14)),
    ];
    let lines: Vec<String> = listing(&bookings)
        .iter()
        .map(|b| format!("{} {}", b.member, b.period_label()))
        .collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    Alice 01/06/2024 → 14/06/2024
    Carol 01/06/2024 → 03/06/2024
    Bob 10/06/2024 → 20/06/2024
    ");
}

#[test]
fn year_selector_range() {
    let years = year_choices(d(2026, 10, 17));
    assert_eq!(years, 2023..=2031);
}
