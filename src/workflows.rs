use tracing::instrument;

use crate::auth::{Permission, User};
use crate::db::{
    SessionChanges, UpdateOutcome, create_session, find_session_by_id, list_sessions_for_user,
    update_session,
};
use crate::error::AppError;
use crate::links::LinkGenerator;
use crate::models::Session;
use crate::store::RecordStore;

#[instrument(skip(store, links, actor), fields(coach = %actor.username))]
pub fn schedule_session(
    store: &dyn RecordStore,
    links: &LinkGenerator,
    actor: &User,
    client: &str,
    date: &str,
    time: &str,
) -> Result<Session, AppError> {
    actor.require_permission(Permission::ScheduleSessions)?;
    create_session(store, links, &actor.username, client, date, time)
}

#[instrument(skip(store, actor), fields(username = %actor.username))]
pub fn view_sessions(store: &dyn RecordStore, actor: &User) -> Result<Vec<Session>, AppError> {
    actor.require_permission(Permission::ViewOwnSessions)?;
    list_sessions_for_user(store, &actor.username)
}

/// The session `id` if `actor` owns it and it is still scheduled. Used to
/// show current values before asking for changes.
#[instrument(skip(store, actor), fields(coach = %actor.username))]
pub fn owned_session(store: &dyn RecordStore, actor: &User, id: &str) -> Result<Session, AppError> {
    actor.require_permission(Permission::ManageOwnSessions)?;

    let (_, session) = find_session_by_id(store, id)?
        .ok_or_else(|| AppError::NotFound(format!("Session '{}' not found", id)))?;

    if session.coach_username != actor.username {
        return Err(AppError::Authorization(
            "You can only modify your own sessions.".to_string(),
        ));
    }
    if session.is_canceled() {
        return Err(AppError::State(format!(
            "Session '{}' has been canceled",
            id
        )));
    }

    Ok(session)
}

fn manage(
    store: &dyn RecordStore,
    links: &LinkGenerator,
    actor: &User,
    id: &str,
    changes: &SessionChanges,
) -> Result<UpdateOutcome, AppError> {
    actor.require_permission(Permission::ManageOwnSessions)?;
    update_session(store, links, id, &actor.username, changes)
}

/// Change client and/or date and time. Blank values keep the current one.
#[instrument(skip(store, links, actor), fields(coach = %actor.username))]
pub fn edit_session(
    store: &dyn RecordStore,
    links: &LinkGenerator,
    actor: &User,
    id: &str,
    client: &str,
    date: &str,
    time: &str,
) -> Result<Session, AppError> {
    let changes = SessionChanges {
        client: Some(client.to_string()),
        date: Some(date.to_string()),
        time: Some(time.to_string()),
        ..Default::default()
    };

    Ok(manage(store, links, actor, id, &changes)?.session().clone())
}

#[instrument(skip(store, links, actor), fields(coach = %actor.username))]
pub fn cancel_session(
    store: &dyn RecordStore,
    links: &LinkGenerator,
    actor: &User,
    id: &str,
) -> Result<UpdateOutcome, AppError> {
    let changes = SessionChanges {
        cancel: true,
        ..Default::default()
    };

    manage(store, links, actor, id, &changes)
}

/// Replace the meeting link and return the new one.
#[instrument(skip(store, links, actor), fields(coach = %actor.username))]
pub fn regenerate_link(
    store: &dyn RecordStore,
    links: &LinkGenerator,
    actor: &User,
    id: &str,
) -> Result<String, AppError> {
    let changes = SessionChanges {
        regenerate_link: true,
        ..Default::default()
    };

    Ok(manage(store, links, actor, id, &changes)?.session().link.clone())
}

#[instrument(skip(store, links, actor, note), fields(coach = %actor.username))]
pub fn add_session_notes(
    store: &dyn RecordStore,
    links: &LinkGenerator,
    actor: &User,
    id: &str,
    note: &str,
) -> Result<Session, AppError> {
    let changes = SessionChanges {
        note: Some(note.to_string()),
        ..Default::default()
    };

    Ok(manage(store, links, actor, id, &changes)?.session().clone())
}

/// Meeting link of a scheduled session that names `actor` as its client.
#[instrument(skip(store, actor), fields(client = %actor.username))]
pub fn join_session(store: &dyn RecordStore, actor: &User, id: &str) -> Result<String, AppError> {
    actor.require_permission(Permission::JoinSessions)?;

    let (_, session) = find_session_by_id(store, id)?
        .ok_or_else(|| AppError::NotFound(format!("Session '{}' not found", id)))?;

    if session.client_username != actor.username {
        return Err(AppError::Authorization(
            "This session does not belong to you.".to_string(),
        ));
    }
    if session.is_canceled() {
        return Err(AppError::State(
            "This session has been canceled.".to_string(),
        ));
    }

    Ok(session.link)
}
