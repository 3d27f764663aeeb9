use tracing::{info, instrument, warn};

use crate::error::AppError;
use crate::store::{RecordStore, Resource};
use crate::validation::RegistrationRequest;

use super::{Role, User};

/// Every well-formed user row, in registration order.
fn load_users(store: &dyn RecordStore) -> Result<Vec<User>, AppError> {
    let rows = store.load(Resource::Users)?;

    Ok(rows
        .iter()
        .filter_map(|row| match User::try_from(row) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Skipping malformed user row");
                None
            }
        })
        .collect())
}

#[instrument(skip(store, password, email))]
pub fn register_user(
    store: &dyn RecordStore,
    username: &str,
    password: &str,
    role: &str,
    email: &str,
) -> Result<User, AppError> {
    info!("Registering new user");

    let request = RegistrationRequest::new(username, password, role, email).validate_custom()?;

    let mut rows = store.load(Resource::Users)?;
    if rows
        .iter()
        .any(|row| row.first().is_some_and(|name| *name == request.username))
    {
        return Err(AppError::Validation(format!(
            "Username '{}' is already taken",
            request.username
        )));
    }

    let user = User {
        username: request.username,
        password: request.password,
        role: request.role.parse()?,
        email: request.email,
    };

    rows.push(user.to_row());
    store.save(Resource::Users, &rows)?;

    info!("User registered");
    Ok(user)
}

#[instrument(skip_all, fields(username = %username))]
pub fn authenticate_user(
    store: &dyn RecordStore,
    username: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    info!("Authenticating user");

    let user = load_users(store)?
        .into_iter()
        .find(|user| user.username == username && user.password == password);

    if user.is_none() {
        warn!("Invalid username or password");
    }

    Ok(user)
}

#[instrument(skip(store))]
pub fn find_user(store: &dyn RecordStore, username: &str) -> Result<Option<User>, AppError> {
    Ok(load_users(store)?
        .into_iter()
        .find(|user| user.username == username))
}

/// Registered clients, sorted by username.
#[instrument(skip(store))]
pub fn list_clients(store: &dyn RecordStore) -> Result<Vec<User>, AppError> {
    let mut clients: Vec<User> = load_users(store)?
        .into_iter()
        .filter(|user| user.role == Role::Client)
        .collect();

    clients.sort_by(|a, b| a.username.cmp(&b.username));
    Ok(clients)
}

/// Resolve `username` to a registered client.
pub fn require_client(store: &dyn RecordStore, username: &str) -> Result<User, AppError> {
    match find_user(store, username)? {
        Some(user) if user.role == Role::Client => Ok(user),
        _ => Err(AppError::NotFound(format!(
            "Unknown client '{}'. Please enter a registered client username.",
            username
        ))),
    }
}
