use crate::model::Booking;
use chrono::NaiveDate;

/// Intervalles inclusifs : un jour commun suffit.
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Réservations existantes qui chevauchent la période candidate, quel que soit
/// le membre. L'ordre d'entrée est conservé.
pub fn find_overlaps(
    bookings: &[Booking],
    candidate_start: NaiveDate,
    candidate_end: NaiveDate,
) -> Vec<&Booking> {
    bookings
        .iter()
        .filter(|b| ranges_overlap(b.start, b.end, candidate_start, candidate_end))
        .collect()
}
