mod add;
mod remove;
mod types;
mod util;

pub use types::{AddOutcome, AddRequest, Pending, State, WorkflowError};

use crate::color::{self, LegendEntry};
use crate::model::{Booking, BookingKey, Color};
use crate::storage::BookingStore;

/// Session : collection en mémoire (dernière lecture réussie) et créneau
/// d'attente unique. Passée explicitement à chaque opération.
#[derive(Debug, Default)]
pub struct Session {
    bookings: Vec<Booking>,
    state: State,
    degraded: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        Self {
            bookings,
            ..Self::default()
        }
    }

    /// Amorce depuis le store. Un échec de lecture donne une session vide en
    /// lecture seule, et l'erreur est renvoyée pour affichage.
    pub fn open(store: &dyn BookingStore) -> (Self, Option<WorkflowError>) {
        match store.read_all() {
            Ok(bookings) => (Self::with_bookings(bookings), None),
            Err(err) => {
                #[cfg(feature = "logging")]
                tracing::warn!(error = %format!("{err:#}"), "bootstrap read failed, session is read-only");
                let session = Self {
                    degraded: true,
                    ..Self::default()
                };
                (session, Some(WorkflowError::StoreUnavailable(err)))
            }
        }
    }

    /// Relit le store ; l'attente éventuelle n'est pas revalidée.
    pub fn refresh(&mut self, store: &dyn BookingStore) -> Result<usize, WorkflowError> {
        let bookings = store
            .read_all()
            .map_err(WorkflowError::StoreUnavailable)?;
        self.bookings = bookings;
        self.degraded = false;
        Ok(self.bookings.len())
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn pending(&self) -> Option<&Pending> {
        match &self.state {
            State::PendingConfirmation(pending) => Some(pending),
            State::Idle => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Réinstalle une attente sauvegardée (front-ends sans processus persistant).
    pub fn restore_pending(&mut self, pending: Pending) -> Result<(), WorkflowError> {
        if !self.state.is_idle() {
            return Err(WorkflowError::InvalidState(
                "another booking is awaiting confirmation",
            ));
        }
        pending
            .candidate
            .validate()
            .map_err(WorkflowError::InvalidInput)?;
        self.state = State::PendingConfirmation(pending);
        Ok(())
    }

    pub fn color_of(&self, member: &str) -> Option<Color> {
        color::color_of(&self.bookings, member)
    }

    pub fn default_color(&self, member: &str) -> Color {
        color::default_color(&self.bookings, member)
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        color::legend(&self.bookings)
    }

    pub fn request_add(
        &mut self,
        store: &dyn BookingStore,
        req: AddRequest,
    ) -> Result<AddOutcome, WorkflowError> {
        add::request_add(self, store, req)
    }

    pub fn confirm(&mut self, store: &dyn BookingStore) -> Result<Booking, WorkflowError> {
        add::confirm(self, store)
    }

    pub fn cancel(&mut self) -> Result<Pending, WorkflowError> {
        add::cancel(self)
    }

    pub fn remove(
        &mut self,
        store: &dyn BookingStore,
        key: &BookingKey,
    ) -> Result<Booking, WorkflowError> {
        remove::remove(self, store, key)
    }
}
