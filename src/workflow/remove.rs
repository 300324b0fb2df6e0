use super::{util, Session, WorkflowError};
use crate::model::{Booking, BookingKey};
use crate::storage::BookingStore;

/// Supprime la première réservation identique au triplet ; l'état d'attente
/// n'est pas consulté.
pub(super) fn remove(
    session: &mut Session,
    store: &dyn BookingStore,
    key: &BookingKey,
) -> Result<Booking, WorkflowError> {
    // une session dégradée ne connaît pas la collection réelle
    util::ensure_writable(session)?;
    let Some(pos) = session.bookings.iter().position(|b| b.matches(key)) else {
        return Err(WorkflowError::NotFound(key.to_string()));
    };
    let removed = util::commit(session, store, |bookings| Ok(bookings.remove(pos)))?;
    #[cfg(feature = "logging")]
    tracing::info!(member = %removed.member, start = %removed.start, end = %removed.end, "booking removed");
    Ok(removed)
}
