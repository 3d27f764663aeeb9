use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    ViewOwnSessions,

    JoinSessions,

    ScheduleSessions,
    ManageOwnSessions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Coach,
    Client,
}

static CLIENT_PERMISSIONS: Lazy<HashSet<Permission>> = Lazy::new(|| {
    let mut permissions = HashSet::new();

    permissions.insert(Permission::ViewOwnSessions);
    permissions.insert(Permission::JoinSessions);

    permissions
});

static COACH_PERMISSIONS: Lazy<HashSet<Permission>> = Lazy::new(|| {
    let mut permissions = HashSet::new();

    permissions.insert(Permission::ViewOwnSessions);
    permissions.insert(Permission::ScheduleSessions);
    permissions.insert(Permission::ManageOwnSessions);

    permissions
});

impl Role {
    pub fn permissions(&self) -> &'static HashSet<Permission> {
        match self {
            Role::Coach => &COACH_PERMISSIONS,
            Role::Client => &CLIENT_PERMISSIONS,
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Coach => "coach",
            Role::Client => "client",
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coach" => Ok(Role::Coach),
            "client" => Ok(Role::Client),
            _ => Err(AppError::Validation(format!(
                "Role must be 'coach' or 'client', got '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
