//! Session registry over the `sessions` resource.
//!
//! Every mutation reloads the whole resource, edits the matching row in
//! place and writes the whole resource back.

use chrono::Local;
use tracing::{info, instrument, warn};

use crate::auth::{Role, find_user, require_client};
use crate::error::AppError;
use crate::links::LinkGenerator;
use crate::models::{Session, SessionStatus};
use crate::store::{RecordStore, Resource, Row};
use crate::validation::{parse_future_slot, parse_slot};

const MAX_ID_ATTEMPTS: usize = 5;

/// Requested changes to a scheduled session. Blank strings count as "keep".
#[derive(Debug, Clone, Default)]
pub struct SessionChanges {
    pub client: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub regenerate_link: bool,
    pub cancel: bool,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(Session),
    AlreadyCanceled(Session),
}

impl UpdateOutcome {
    pub fn session(&self) -> &Session {
        match self {
            UpdateOutcome::Updated(session) | UpdateOutcome::AlreadyCanceled(session) => session,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn locate(rows: &[Row], id: &str) -> Option<(usize, Session)> {
    rows.iter().enumerate().find_map(|(idx, row)| {
        if row.first().map(String::as_str) != Some(id) {
            return None;
        }
        match Session::try_from(row) {
            Ok(session) => Some((idx, session)),
            Err(e) => {
                warn!(error = %e, index = idx, "Skipping malformed session row");
                None
            }
        }
    })
}

fn unique_id(rows: &[Row], links: &LinkGenerator) -> Result<String, AppError> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let id = links.new_id();
        if !rows.iter().any(|row| row.first() == Some(&id)) {
            return Ok(id);
        }
        warn!(id = %id, "Generated session id already exists, retrying");
    }

    Err(AppError::Internal(format!(
        "Could not generate a unique session id after {} attempts",
        MAX_ID_ATTEMPTS
    )))
}

#[instrument(skip(store))]
pub fn find_session_by_id(
    store: &dyn RecordStore,
    id: &str,
) -> Result<Option<(usize, Session)>, AppError> {
    let rows = store.load(Resource::Sessions)?;
    Ok(locate(&rows, id))
}

/// Sessions where `username` is the coach or the client, in creation order.
#[instrument(skip(store))]
pub fn list_sessions_for_user(
    store: &dyn RecordStore,
    username: &str,
) -> Result<Vec<Session>, AppError> {
    let rows = store.load(Resource::Sessions)?;

    Ok(rows
        .iter()
        .filter_map(|row| Session::try_from(row).ok())
        .filter(|session| session.involves(username))
        .collect())
}

#[instrument(skip(store, links))]
pub fn create_session(
    store: &dyn RecordStore,
    links: &LinkGenerator,
    coach: &str,
    client: &str,
    date: &str,
    time: &str,
) -> Result<Session, AppError> {
    info!("Creating session");

    match find_user(store, coach)? {
        Some(user) if user.role == Role::Coach => {}
        _ => {
            return Err(AppError::NotFound(format!("Unknown coach '{}'", coach)));
        }
    }

    let client = require_client(store, client.trim())?;
    let (date, time) = (date.trim(), time.trim());
    parse_future_slot(date, time, Local::now().naive_local())?;

    let mut rows = store.load(Resource::Sessions)?;

    let session = Session {
        id: unique_id(&rows, links)?,
        coach_username: coach.to_string(),
        client_username: client.username,
        date: date.to_string(),
        time: time.to_string(),
        link: links.new_link(),
        status: SessionStatus::Scheduled,
        notes: String::new(),
    };

    rows.push(session.to_row());
    store.save(Resource::Sessions, &rows)?;

    info!(session_id = %session.id, "Session created");
    Ok(session)
}

/// Apply `changes` to session `id` on behalf of `coach`.
///
/// Nothing is written unless every requested change is valid. A canceled
/// session rejects all changes, except that a repeated cancel reports
/// [`UpdateOutcome::AlreadyCanceled`].
#[instrument(skip(store, links))]
pub fn update_session(
    store: &dyn RecordStore,
    links: &LinkGenerator,
    id: &str,
    coach: &str,
    changes: &SessionChanges,
) -> Result<UpdateOutcome, AppError> {
    info!("Updating session");

    let mut rows = store.load(Resource::Sessions)?;
    let (idx, mut session) = locate(&rows, id)
        .ok_or_else(|| AppError::NotFound(format!("Session '{}' not found", id)))?;

    if session.coach_username != coach {
        return Err(AppError::Authorization(
            "You can only modify your own sessions.".to_string(),
        ));
    }

    if session.is_canceled() {
        if changes.cancel {
            info!("Session already canceled");
            return Ok(UpdateOutcome::AlreadyCanceled(session));
        }
        return Err(AppError::State(format!(
            "Session '{}' has been canceled and can no longer be changed",
            id
        )));
    }

    if let Some(client) = non_blank(&changes.client) {
        session.client_username = require_client(store, client)?.username;
    }

    let new_date = non_blank(&changes.date);
    let new_time = non_blank(&changes.time);
    if new_date.is_some() || new_time.is_some() {
        let date = new_date.unwrap_or(session.date.as_str()).to_string();
        let time = new_time.unwrap_or(session.time.as_str()).to_string();
        parse_slot(&date, &time)?;
        session.date = date;
        session.time = time;
    }

    if changes.regenerate_link {
        session.link = links.new_link();
    }

    if let Some(note) = &changes.note {
        session.append_note(note);
    }

    if changes.cancel {
        session.status = SessionStatus::Canceled;
    }

    rows[idx] = session.to_row();
    store.save(Resource::Sessions, &rows)?;

    info!("Session updated");
    Ok(UpdateOutcome::Updated(session))
}
