#![forbid(unsafe_code)]
//! Congés — suivi des congés d'une équipe, avec confirmation des chevauchements.
//!
//! - Stockage fichiers (JSON/CSV), lecture et remplacement globaux.
//! - Couleur stable par membre.
//! - Détection de chevauchement sur intervalles de dates inclusifs.
//! - Ajout immédiat ou mise en attente jusqu'à confirmation explicite.

pub mod calendar;
pub mod color;
pub mod io;
pub mod model;
pub mod overlap;
pub mod storage;
pub mod workflow;

pub use color::{assign_color, color_of, default_color, legend, LegendEntry, PALETTE};
pub use model::{Booking, BookingKey, Color};
pub use overlap::{find_overlaps, ranges_overlap};
#[cfg(feature = "serde")]
pub use storage::{open_store, CsvStore, JsonStore, PendingFile};
pub use storage::{BookingStore, MemoryStore};
pub use workflow::{AddOutcome, AddRequest, Pending, Session, State, WorkflowError};
