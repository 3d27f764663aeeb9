use crate::error::AppError;
use crate::store::Row;

use super::{Permission, Role};

pub const USER_FIELDS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub email: String,
}

impl User {
    pub fn require_permission(&self, permission: Permission) -> Result<(), AppError> {
        if self.role.has_permission(permission) {
            Ok(())
        } else {
            tracing::warn!(
                username = %self.username,
                role = %self.role.as_str(),
                permission = ?permission,
                "Permission denied"
            );
            Err(AppError::Authorization(format!(
                "A {} account cannot do that.",
                self.role
            )))
        }
    }

    pub fn to_row(&self) -> Row {
        vec![
            self.username.clone(),
            self.password.clone(),
            self.role.to_string(),
            self.email.clone(),
        ]
    }
}

impl TryFrom<&Row> for User {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        match row.as_slice() {
            [username, password, role, email] => Ok(Self {
                username: username.clone(),
                password: password.clone(),
                role: role.parse()?,
                email: email.clone(),
            }),
            _ => Err(AppError::Format(format!(
                "User row has {} fields, expected {}",
                row.len(),
                USER_FIELDS
            ))),
        }
    }
}
