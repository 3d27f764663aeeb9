use std::fmt;
use std::str::FromStr;

use crate::error::AppError;
use crate::store::Row;

pub const SESSION_FIELDS: usize = 8;

/// Joins appended notes inside the single notes field.
pub const NOTES_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Scheduled,
    Canceled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Canceled => "canceled",
        }
    }
}

impl FromStr for SessionStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(SessionStatus::Scheduled),
            "canceled" => Ok(SessionStatus::Canceled),
            _ => Err(AppError::Format(format!("Unknown session status: {}", s))),
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub coach_username: String,
    pub client_username: String,
    pub date: String,
    pub time: String,
    pub link: String,
    pub status: SessionStatus,
    pub notes: String,
}

impl Session {
    pub fn is_canceled(&self) -> bool {
        self.status == SessionStatus::Canceled
    }

    pub fn involves(&self, username: &str) -> bool {
        self.coach_username == username || self.client_username == username
    }

    /// Append a note; blank input leaves the notes untouched.
    pub fn append_note(&mut self, note: &str) {
        let note = note.trim();
        if note.is_empty() {
            return;
        }

        if self.notes.is_empty() {
            self.notes = note.to_string();
        } else {
            self.notes = format!("{}{}{}", self.notes, NOTES_SEPARATOR, note);
        }
    }

    pub fn to_row(&self) -> Row {
        vec![
            self.id.clone(),
            self.coach_username.clone(),
            self.client_username.clone(),
            self.date.clone(),
            self.time.clone(),
            self.link.clone(),
            self.status.to_string(),
            self.notes.clone(),
        ]
    }
}

impl TryFrom<&Row> for Session {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        match row.as_slice() {
            [id, coach, client, date, time, link, status, notes] => Ok(Self {
                id: id.clone(),
                coach_username: coach.clone(),
                client_username: client.clone(),
                date: date.clone(),
                time: time.clone(),
                link: link.clone(),
                status: status.parse()?,
                notes: notes.clone(),
            }),
            _ => Err(AppError::Format(format!(
                "Session row has {} fields, expected {}",
                row.len(),
                SESSION_FIELDS
            ))),
        }
    }
}
