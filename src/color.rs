use crate::model::{Booking, Color};
use sha2::{Digest, Sha256};

/// Palette fixe ; l'ordre fait partie du contrat (index = hash % len).
pub const PALETTE: [Color; 14] = [
    Color::rgb(0xFF, 0x6B, 0x6B),
    Color::rgb(0x4E, 0xCD, 0xC4),
    Color::rgb(0x45, 0xB7, 0xD1),
    Color::rgb(0x96, 0xCE, 0xB4),
    Color::rgb(0xFF, 0xEE, 0xAD),
    Color::rgb(0xD4, 0xA5, 0xA5),
    Color::rgb(0x9B, 0x59, 0xB6),
    Color::rgb(0x34, 0x98, 0xDB),
    Color::rgb(0xE7, 0x4C, 0x3C),
    Color::rgb(0x2E, 0xCC, 0x71),
    Color::rgb(0xF3, 0x9C, 0x12),
    Color::rgb(0x1A, 0xBC, 0x9C),
    Color::rgb(0x8E, 0x44, 0xAD),
    Color::rgb(0xE6, 0x7E, 0x22),
];

/// Nom utilisé pour pré-remplir la couleur quand aucun membre n'est saisi.
const FALLBACK_NAME: &str = "default";

/// Couleur déterministe pour un nom (SHA-256, 8 premiers octets, modulo palette).
pub fn assign_color(name: &str) -> Color {
    let digest = Sha256::digest(name.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    let idx = u64::from_be_bytes(head) % PALETTE.len() as u64;
    PALETTE[idx as usize]
}

/// Couleur de la première réservation existante du membre.
pub fn color_of(bookings: &[Booking], member: &str) -> Option<Color> {
    let member = member.trim();
    bookings
        .iter()
        .find(|b| b.member == member)
        .map(|b| b.color)
}

/// Couleur proposée pour une nouvelle réservation : celle déjà utilisée par le
/// membre, sinon celle dérivée de son nom.
pub fn default_color(bookings: &[Booking], member: &str) -> Color {
    let member = member.trim();
    if let Some(color) = color_of(bookings, member) {
        return color;
    }
    if member.is_empty() {
        assign_color(FALLBACK_NAME)
    } else {
        assign_color(member)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub member: String,
    pub color: Color,
}

/// Légende : un membre par entrée, triée par nom.
pub fn legend(bookings: &[Booking]) -> Vec<LegendEntry> {
    let mut out: Vec<LegendEntry> = Vec::new();
    for booking in bookings {
        if out.iter().any(|e| e.member == booking.member) {
            continue;
        }
        out.push(LegendEntry {
            member: booking.member.clone(),
            color: booking.color,
        });
    }
    out.sort_by(|a, b| a.member.cmp(&b.member));
    out
}
