//! Menu choices for the interactive shell.

use std::fmt;

/// A numbered menu. Options are shown as `1. <label>` in `ALL` order.
pub trait Menu: fmt::Display + Copy + Sized + 'static {
    const TITLE: &'static str;
    const ALL: &'static [Self];

    fn from_input(input: &str) -> Option<Self> {
        let index: usize = input.trim().parse().ok()?;
        index.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Register,
    Login,
    Exit,
}

impl Menu for MainChoice {
    const TITLE: &'static str = "Fitness Coach Manager";
    const ALL: &'static [Self] = &[MainChoice::Register, MainChoice::Login, MainChoice::Exit];
}

impl fmt::Display for MainChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainChoice::Register => write!(f, "Register"),
            MainChoice::Login => write!(f, "Login"),
            MainChoice::Exit => write!(f, "Exit"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoachChoice {
    Schedule,
    View,
    RefreshLink,
    Edit,
    Cancel,
    AddNotes,
    Logout,
}

impl Menu for CoachChoice {
    const TITLE: &'static str = "Coach Menu";
    const ALL: &'static [Self] = &[
        CoachChoice::Schedule,
        CoachChoice::View,
        CoachChoice::RefreshLink,
        CoachChoice::Edit,
        CoachChoice::Cancel,
        CoachChoice::AddNotes,
        CoachChoice::Logout,
    ];
}

impl fmt::Display for CoachChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoachChoice::Schedule => write!(f, "Schedule New Session"),
            CoachChoice::View => write!(f, "View My Sessions"),
            CoachChoice::RefreshLink => write!(f, "Generate/Refresh Session Link"),
            CoachChoice::Edit => write!(f, "Edit Session"),
            CoachChoice::Cancel => write!(f, "Cancel Session"),
            CoachChoice::AddNotes => write!(f, "Add Session Notes"),
            CoachChoice::Logout => write!(f, "Logout"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientChoice {
    View,
    Join,
    Logout,
}

impl Menu for ClientChoice {
    const TITLE: &'static str = "Client Menu";
    const ALL: &'static [Self] = &[ClientChoice::View, ClientChoice::Join, ClientChoice::Logout];
}

impl fmt::Display for ClientChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientChoice::View => write!(f, "View My Sessions"),
            ClientChoice::Join => write!(f, "Join Session (get meeting link)"),
            ClientChoice::Logout => write!(f, "Logout"),
        }
    }
}
