use super::{util, AddOutcome, AddRequest, Pending, Session, State, WorkflowError};
use crate::color::default_color;
use crate::model::Booking;
use crate::overlap::find_overlaps;
use crate::storage::BookingStore;

pub(super) fn request_add(
    session: &mut Session,
    store: &dyn BookingStore,
    req: AddRequest,
) -> Result<AddOutcome, WorkflowError> {
    if !session.state.is_idle() {
        return Err(WorkflowError::InvalidState(
            "another booking is awaiting confirmation",
        ));
    }

    let member = req.member.trim();
    if member.is_empty() {
        return Err(WorkflowError::InvalidInput(
            "member name cannot be empty".to_string(),
        ));
    }
    if req.start > req.end {
        return Err(WorkflowError::InvalidInput(format!(
            "start {} is after end {}",
            req.start, req.end
        )));
    }
    util::ensure_writable(session)?;

    let color = req
        .color
        .unwrap_or_else(|| default_color(&session.bookings, member));
    let candidate =
        Booking::new(member, req.start, req.end, color).map_err(WorkflowError::InvalidInput)?;

    let conflicts: Vec<Booking> = find_overlaps(&session.bookings, candidate.start, candidate.end)
        .into_iter()
        .cloned()
        .collect();

    if conflicts.is_empty() {
        let committed = candidate.clone();
        util::commit(session, store, |bookings| {
            bookings.push(candidate);
            Ok(())
        })?;
        #[cfg(feature = "logging")]
        tracing::info!(member = %committed.member, start = %committed.start, end = %committed.end, "booking committed");
        return Ok(AddOutcome::Committed(committed));
    }

    #[cfg(feature = "logging")]
    tracing::info!(
        member = %candidate.member,
        conflicts = conflicts.len(),
        "overlap detected, awaiting confirmation"
    );
    let pending = Pending {
        candidate,
        conflicts,
    };
    session.state = State::PendingConfirmation(pending.clone());
    Ok(AddOutcome::NeedsConfirmation(pending))
}

/// Enregistre le candidat en attente tel quel : pas de nouvelle détection.
pub(super) fn confirm(
    session: &mut Session,
    store: &dyn BookingStore,
) -> Result<Booking, WorkflowError> {
    let State::PendingConfirmation(pending) = &session.state else {
        return Err(WorkflowError::InvalidState("no booking awaiting confirmation"));
    };
    let candidate = pending.candidate.clone();
    let committed = candidate.clone();

    // en cas d'échec du store, l'attente est conservée
    util::commit(session, store, |bookings| {
        bookings.push(candidate);
        Ok(())
    })?;
    session.state = State::Idle;

    #[cfg(feature = "logging")]
    tracing::info!(member = %committed.member, start = %committed.start, end = %committed.end, "overlapping booking confirmed");
    Ok(committed)
}

pub(super) fn cancel(session: &mut Session) -> Result<Pending, WorkflowError> {
    match std::mem::take(&mut session.state) {
        State::PendingConfirmation(pending) => {
            #[cfg(feature = "logging")]
            tracing::info!(member = %pending.candidate.member, "pending booking cancelled");
            Ok(pending)
        }
        State::Idle => Err(WorkflowError::InvalidState("no booking awaiting confirmation")),
    }
}
