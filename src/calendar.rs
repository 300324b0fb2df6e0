use crate::model::Booking;
use crate::overlap::ranges_overlap;
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Une ligne de calendrier, lundi en premier.
pub type Week = [Option<NaiveDate>; 7];

/// Réservations couvrant ce jour.
pub fn bookings_on(bookings: &[Booking], day: NaiveDate) -> Vec<&Booking> {
    bookings
        .iter()
        .filter(|b| b.start <= day && day <= b.end)
        .collect()
}

/// Grille du mois : semaines du lundi au dimanche, cases vides hors du mois.
pub fn month_weeks(year: i32, month: u32) -> Result<Vec<Week>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .with_context(|| format!("invalid month {year}-{month:02}"))?;

    let mut weeks = Vec::new();
    let mut week: Week = [None; 7];
    let mut slot = first.weekday().num_days_from_monday() as usize;
    let mut day = first;

    while day.month() == month {
        week[slot] = Some(day);
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    if slot > 0 {
        weeks.push(week);
    }
    Ok(weeks)
}

/// Jours de l'année couverts par au moins une réservation.
pub fn year_occupancy(bookings: &[Booking], year: i32) -> Result<BTreeMap<NaiveDate, Vec<&Booking>>> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1).with_context(|| format!("invalid year {year}"))?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31).with_context(|| format!("invalid year {year}"))?;

    let mut out: BTreeMap<NaiveDate, Vec<&Booking>> = BTreeMap::new();
    for booking in bookings
        .iter()
        .filter(|b| ranges_overlap(b.start, b.end, first, last))
    {
        let from = booking.start.max(first);
        let to = booking.end.min(last);
        for day in from.iter_days().take_while(|d| *d <= to) {
            out.entry(day).or_default().push(booking);
        }
    }
    Ok(out)
}

/// Liste complète triée par début puis par membre.
pub fn listing(bookings: &[Booking]) -> Vec<&Booking> {
    let mut out: Vec<&Booking> = bookings.iter().collect();
    out.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.member.cmp(&b.member)));
    out
}

/// Années proposées au sélecteur : trois en arrière, cinq en avant.
pub fn year_choices(today: NaiveDate) -> RangeInclusive<i32> {
    let year = today.year();
    (year - 3)..=(year + 5)
}
