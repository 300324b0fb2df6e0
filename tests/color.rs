#![forbid(unsafe_code)]
use chrono::NaiveDate;
use conges::{assign_color, color_of, default_color, legend, Booking, Color, PALETTE};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn same_name_same_color() {
    for name in ["Alice", "Bob", "Zoé", "", "   "] {
        let a = assign_color(name);
        let b = assign_color(name);
        assert_eq!(a, b);
        assert!(PALETTE.contains(&a));
    }
}

#[test]
fn palette_has_distinct_entries() {
    for (i, a) in PALETTE.iter().enumerate() {
        for b in PALETTE.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
    assert!(PALETTE.len() >= 10);
}

#[test]
fn color_text_format() {
    let c: Color = "#ff6b6b".parse().unwrap();
    assert_eq!(c.to_string(), "#FF6B6B");
    assert_eq!("4ECDC4".parse::<Color>().unwrap(), PALETTE[1]);
    assert!("#12345".parse::<Color>().is_err());
    assert!("#GGGGGG".parse::<Color>().is_err());
    assert!("red".parse::<Color>().is_err());
}

#[test]
fn default_color_reuses_existing_member_color() {
    let custom = Color::rgb(0x12, 0x34, 0x56);
    let bookings = vec![Booking::new("Alice", d(2024, 6, 1), d(2024, 6, 14), custom).unwrap()];

    assert_eq!(color_of(&bookings, " Alice "), Some(custom));
    assert_eq!(default_color(&bookings, "Alice"), custom);
    assert_eq!(default_color(&bookings, "Bob"), assign_color("Bob"));
    assert_eq!(default_color(&bookings, "  "), assign_color("default"));
}

#[test]
fn legend_is_sorted_and_uses_first_color() {
    let first = Color::rgb(1, 2, 3);
    let bookings = vec![
        Booking::new("Carol", d(2024, 7, 1), d(2024, 7, 5), assign_color("Carol")).unwrap(),
        Booking::new("Alice", d(2024, 6, 1), d(2024, 6, 14), first).unwrap(),
        Booking::new("Alice", d(2024, 8, 1), d(2024, 8, 3), Color::rgb(9, 9, 9)).unwrap(),
    ];

    let entries = legend(&bookings);
    let names: Vec<&str> = entries.iter().map(|e| e.member.as_str()).collect();
    assert_eq!(names, ["Alice", "Carol"]);
    assert_eq!(entries[0].color, first);
}
