use crate::model::{Booking, Color};
use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Demande d'ajout telle que saisie (nom non trimé, couleur optionnelle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    pub member: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub color: Option<Color>,
}

impl AddRequest {
    pub fn new<M: Into<String>>(member: M, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            member: member.into(),
            start,
            end,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// Candidat en attente et conflits relevés au moment de la demande.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pending {
    pub candidate: Booking,
    pub conflicts: Vec<Booking>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Idle,
    PendingConfirmation(Pending),
}

impl State {
    pub fn is_idle(&self) -> bool {
        matches!(self, State::Idle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Aucun chevauchement : enregistré et persisté.
    Committed(Booking),
    /// Chevauchement : rien n'est persisté avant `confirm`.
    NeedsConfirmation(Pending),
}

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("store unavailable: {0:#}")]
    StoreUnavailable(#[source] anyhow::Error),
    #[error("booking not found: {0}")]
    NotFound(String),
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}
