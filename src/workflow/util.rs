use super::{Session, WorkflowError};
use crate::model::Booking;
use crate::storage::BookingStore;

pub(super) fn ensure_writable(session: &Session) -> Result<(), WorkflowError> {
    if session.degraded {
        return Err(WorkflowError::StoreUnavailable(anyhow::anyhow!(
            "session started without a successful read; refresh before writing"
        )));
    }
    Ok(())
}

/// Copie locale, mutation, remplacement global ; la session n'est mise à jour
/// qu'après un `replace_all` réussi.
pub(super) fn commit<T>(
    session: &mut Session,
    store: &dyn BookingStore,
    mutate: impl FnOnce(&mut Vec<Booking>) -> Result<T, WorkflowError>,
) -> Result<T, WorkflowError> {
    ensure_writable(session)?;
    let mut next = session.bookings.clone();
    let out = mutate(&mut next)?;
    store
        .replace_all(&next)
        .map_err(WorkflowError::StoreUnavailable)?;
    session.bookings = next;
    Ok(out)
}
