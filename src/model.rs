use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Couleur d'affichage d'un membre, persistée sous la forme `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = String;

    /// Accepte `#RRGGBB` ou `RRGGBB`, casse indifférente.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let hex = raw.strip_prefix('#').unwrap_or(raw);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("invalid color {raw:?}: expected #RRGGBB"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("invalid color {raw:?}: {e}"))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Période de congés d'un membre : intervalle de dates inclusif [start, end].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Booking {
    pub member: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub color: Color,
}

impl Booking {
    /// Crée une réservation en validant le nom (trimé) et `start <= end`.
    pub fn new<M: AsRef<str>>(
        member: M,
        start: NaiveDate,
        end: NaiveDate,
        color: Color,
    ) -> Result<Self, String> {
        let booking = Self {
            member: member.as_ref().trim().to_owned(),
            start,
            end,
            color,
        };
        booking.validate()?;
        Ok(booking)
    }

    /// Revérifie les invariants, pour les enregistrements lus depuis un store.
    pub fn validate(&self) -> Result<(), String> {
        if self.member.trim().is_empty() {
            return Err("member name cannot be empty".to_string());
        }
        if self.start > self.end {
            return Err(format!(
                "start {} is after end {} for {}",
                self.start, self.end, self.member
            ));
        }
        Ok(())
    }

    pub fn key(&self) -> BookingKey {
        BookingKey {
            member: self.member.clone(),
            start: self.start,
            end: self.end,
        }
    }

    pub fn matches(&self, key: &BookingKey) -> bool {
        self.member == key.member && self.start == key.start && self.end == key.end
    }

    /// `DD/MM/YYYY → DD/MM/YYYY`
    pub fn period_label(&self) -> String {
        format!(
            "{} → {}",
            self.start.format(crate::io::DISPLAY_DATE_FORMAT),
            self.end.format(crate::io::DISPLAY_DATE_FORMAT)
        )
    }
}

/// Triplet exact identifiant une réservation à supprimer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingKey {
    pub member: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BookingKey {
    pub fn new<M: Into<String>>(member: M, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            member: member.into(),
            start,
            end,
        }
    }
}

impl fmt::Display for BookingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} → {})", self.member, self.start, self.end)
    }
}
