use anyhow::Context;
use chrono::NaiveDate;

/// Format des dates persistées.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
/// Format d'affichage (listes, conflits).
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Accepte `YYYY-MM-DD` ou `DD/MM/YYYY`.
pub fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, DISPLAY_DATE_FORMAT))
        .with_context(|| format!("invalid date: {raw:?} (expected YYYY-MM-DD or DD/MM/YYYY)"))
}

#[cfg(feature = "serde")]
pub use self::tabular::*;

#[cfg(feature = "serde")]
mod tabular {
    use super::{parse_date, ISO_DATE_FORMAT};
    use crate::color::assign_color;
    use crate::model::{Booking, Color};
    use anyhow::{bail, Context};
    use csv::{ReaderBuilder, WriterBuilder};
    use std::fs;
    use std::path::Path;

    pub const CSV_HEADER: [&str; 4] = ["member", "start", "end", "color"];

    /// Lecture CSV : header `member,start,end[,color]`. Une couleur absente est
    /// dérivée du nom.
    pub fn read_bookings_csv<R: std::io::Read>(reader: R) -> anyhow::Result<Vec<Booking>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let mut out = Vec::new();
        for (idx, rec) in rdr.records().enumerate() {
            let rec = rec?;
            let line = idx + 2;
            let member = rec.get(0).context("missing member")?.trim();
            if member.is_empty() {
                bail!("invalid row {line}: empty member");
            }
            let start = parse_date(rec.get(1).context("missing start")?)
                .with_context(|| format!("row {line}: start"))?;
            let end = parse_date(rec.get(2).context("missing end")?)
                .with_context(|| format!("row {line}: end"))?;
            let color = match rec.get(3).map(str::trim) {
                Some(raw) if !raw.is_empty() => raw
                    .parse::<Color>()
                    .map_err(anyhow::Error::msg)
                    .with_context(|| format!("row {line}: color"))?,
                _ => assign_color(member),
            };
            let booking = Booking::new(member, start, end, color)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("invalid row {line}"))?;
            out.push(booking);
        }
        Ok(out)
    }

    /// Écriture CSV : header `member,start,end,color`, dates ISO.
    pub fn write_bookings_csv<W: std::io::Write>(
        writer: W,
        bookings: &[Booking],
    ) -> anyhow::Result<()> {
        let mut w = WriterBuilder::new().has_headers(true).from_writer(writer);
        w.write_record(CSV_HEADER)?;
        for b in bookings {
            let start = b.start.format(ISO_DATE_FORMAT).to_string();
            let end = b.end.format(ISO_DATE_FORMAT).to_string();
            let color = b.color.to_string();
            w.write_record([b.member.as_str(), start.as_str(), end.as_str(), color.as_str()])?;
        }
        w.flush()?;
        Ok(())
    }

    /// Export JSON (jolie mise en forme)
    pub fn export_bookings_json<P: AsRef<Path>>(path: P, bookings: &[Booking]) -> anyhow::Result<()> {
        let s = serde_json::to_string_pretty(bookings)?;
        fs::write(path, s)?;
        Ok(())
    }

    pub fn export_bookings_csv<P: AsRef<Path>>(path: P, bookings: &[Booking]) -> anyhow::Result<()> {
        let file = fs::File::create(path.as_ref())
            .with_context(|| format!("creating {}", path.as_ref().display()))?;
        write_bookings_csv(file, bookings)
    }
}
