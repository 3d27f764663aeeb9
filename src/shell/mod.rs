//! Interactive console: a main menu plus one menu loop per role.
//!
//! Recoverable errors are printed and the current menu is shown again.
//! Storage failures end the shell. End of input acts like Exit/Logout.

pub mod menus;

use std::io::{BufRead, Write};

use tracing::info;

use crate::auth::{Role, User, authenticate_user, list_clients, register_user};
use crate::db::UpdateOutcome;
use crate::error::AppError;
use crate::links::LinkGenerator;
use crate::models::Session;
use crate::store::RecordStore;
use crate::workflows;

pub use menus::{ClientChoice, CoachChoice, MainChoice, Menu};

const RULE_WIDTH: usize = 60;

pub struct Shell<'a, R, W> {
    input: R,
    output: W,
    store: &'a dyn RecordStore,
    links: LinkGenerator,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(input: R, output: W, store: &'a dyn RecordStore, links: LinkGenerator) -> Self {
        Self {
            input,
            output,
            store,
            links,
        }
    }

    /// Show `label` and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, message: &str) -> Result<(), AppError> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Print a recoverable error; pass fatal ones up.
    fn report(&mut self, err: AppError, ctx: &str) -> Result<(), AppError> {
        err.log_and_record(ctx);
        if err.is_fatal() {
            return Err(err);
        }
        writeln!(self.output, "{}\n", err.user_message())?;
        Ok(())
    }

    fn choose<M: Menu>(&mut self) -> Result<Option<M>, AppError> {
        loop {
            writeln!(self.output, "=== {} ===", M::TITLE)?;
            for (i, choice) in M::ALL.iter().enumerate() {
                writeln!(self.output, "{}. {}", i + 1, choice)?;
            }

            let Some(input) = self.prompt("Choose an option: ")? else {
                return Ok(None);
            };
            match M::from_input(&input) {
                Some(choice) => return Ok(Some(choice)),
                None => self.say("Invalid choice. Try again.\n")?,
            }
        }
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        info!("Shell started");

        while let Some(choice) = self.choose::<MainChoice>()? {
            match choice {
                MainChoice::Register => self.register()?,
                MainChoice::Login => {
                    if let Some(user) = self.login()? {
                        match user.role {
                            Role::Coach => self.coach_menu(&user)?,
                            Role::Client => self.client_menu(&user)?,
                        }
                    }
                }
                MainChoice::Exit => break,
            }
        }

        self.say("Goodbye!")?;
        info!("Shell stopped");
        Ok(())
    }

    fn register(&mut self) -> Result<(), AppError> {
        self.say("\n=== Register New User ===")?;
        let Some(username) = self.prompt("Choose a username: ")? else {
            return Ok(());
        };
        let Some(password) = self.prompt("Choose a password: ")? else {
            return Ok(());
        };
        let Some(role) = self.prompt("Choose role ('coach' or 'client'): ")? else {
            return Ok(());
        };
        let Some(email) = self.prompt("Enter your email: ")? else {
            return Ok(());
        };

        match register_user(self.store, &username, &password, &role, &email) {
            Ok(user) => self.say(&format!(
                "User '{}' registered successfully as {}!\n",
                user.username, user.role
            )),
            Err(e) => self.report(e, "register"),
        }
    }

    fn login(&mut self) -> Result<Option<User>, AppError> {
        self.say("\n=== Login ===")?;
        let Some(username) = self.prompt("Username: ")? else {
            return Ok(None);
        };
        let Some(password) = self.prompt("Password: ")? else {
            return Ok(None);
        };

        match authenticate_user(self.store, &username, &password) {
            Ok(Some(user)) => {
                self.say(&format!(
                    "Welcome, {}! You are logged in as {}.\n",
                    user.username, user.role
                ))?;
                Ok(Some(user))
            }
            Ok(None) => {
                self.say("Invalid username or password.\n")?;
                Ok(None)
            }
            Err(e) => {
                self.report(e, "login")?;
                Ok(None)
            }
        }
    }

    fn coach_menu(&mut self, user: &User) -> Result<(), AppError> {
        while let Some(choice) = self.choose::<CoachChoice>()? {
            match choice {
                CoachChoice::Schedule => self.schedule(user)?,
                CoachChoice::View => self.view(user)?,
                CoachChoice::RefreshLink => self.refresh_link(user)?,
                CoachChoice::Edit => self.edit(user)?,
                CoachChoice::Cancel => self.cancel(user)?,
                CoachChoice::AddNotes => self.add_notes(user)?,
                CoachChoice::Logout => break,
            }
        }

        self.say("Logging out...\n")
    }

    fn client_menu(&mut self, user: &User) -> Result<(), AppError> {
        while let Some(choice) = self.choose::<ClientChoice>()? {
            match choice {
                ClientChoice::View => self.view(user)?,
                ClientChoice::Join => self.join(user)?,
                ClientChoice::Logout => break,
            }
        }

        self.say("Logging out...\n")
    }

    fn schedule(&mut self, user: &User) -> Result<(), AppError> {
        self.say("\n=== Schedule New Session ===")?;

        let clients = match list_clients(self.store) {
            Ok(clients) => clients,
            Err(e) => return self.report(e, "schedule"),
        };
        if clients.is_empty() {
            return self.say("No clients found. Ask someone to register as a client first.\n");
        }
        let names: Vec<&str> = clients.iter().map(|c| c.username.as_str()).collect();
        self.say(&format!("Known clients: {}", names.join(", ")))?;

        let Some(client) = self.prompt("Client username: ")? else {
            return Ok(());
        };
        let Some(date) = self.prompt("Session date (YYYY-MM-DD): ")? else {
            return Ok(());
        };
        let Some(time) = self.prompt("Session time (HH:MM, 24-hour): ")? else {
            return Ok(());
        };

        match workflows::schedule_session(self.store, &self.links, user, &client, &date, &time) {
            Ok(session) => {
                self.say("\nSession created!")?;
                self.say(&format!("Session ID: {}", session.id))?;
                self.say(&format!("Coach:      {}", session.coach_username))?;
                self.say(&format!("Client:     {}", session.client_username))?;
                self.say(&format!("When:       {} {}", session.date, session.time))?;
                self.say(&format!("Link:       {}\n", session.link))
            }
            Err(e) => self.report(e, "schedule"),
        }
    }

    fn render_session(&mut self, session: &Session) -> Result<(), AppError> {
        self.say(&"-".repeat(RULE_WIDTH))?;
        self.say(&format!("ID: {}", session.id))?;
        self.say(&format!(
            "Coach: {} | Client: {}",
            session.coach_username, session.client_username
        ))?;
        self.say(&format!(
            "When: {} {} | Status: {}",
            session.date, session.time, session.status
        ))?;
        self.say(&format!("Link: {}", session.link))?;
        if !session.notes.is_empty() {
            self.say(&format!("Notes: {}", session.notes))?;
        }
        Ok(())
    }

    fn view(&mut self, user: &User) -> Result<(), AppError> {
        self.say("\n=== My Sessions ===")?;

        let sessions = match workflows::view_sessions(self.store, user) {
            Ok(sessions) => sessions,
            Err(e) => return self.report(e, "view sessions"),
        };
        if sessions.is_empty() {
            self.say("No sessions found.")?;
        }
        for session in &sessions {
            self.render_session(session)?;
        }

        self.say("")
    }

    fn refresh_link(&mut self, user: &User) -> Result<(), AppError> {
        self.say("\n=== Generate/Refresh Session Link ===")?;
        let Some(id) = self.prompt("Enter Session ID: ")? else {
            return Ok(());
        };

        match workflows::regenerate_link(self.store, &self.links, user, &id) {
            Ok(link) => self.say(&format!("New meeting link: {}\n", link)),
            Err(e) => self.report(e, "regenerate link"),
        }
    }

    fn edit(&mut self, user: &User) -> Result<(), AppError> {
        self.say("\n=== Edit Session ===")?;
        let Some(id) = self.prompt("Enter Session ID to edit: ")? else {
            return Ok(());
        };
        let current = match workflows::owned_session(self.store, user, &id) {
            Ok(session) => session,
            Err(e) => return self.report(e, "edit session"),
        };

        self.say("Leave blank to keep unchanged.")?;
        let Some(date) = self.prompt(&format!("New date (YYYY-MM-DD) [current: {}]: ", current.date))?
        else {
            return Ok(());
        };
        let Some(time) = self.prompt(&format!("New time (HH:MM) [current: {}]: ", current.time))?
        else {
            return Ok(());
        };
        let Some(client) = self.prompt(&format!(
            "New client username [current: {}]: ",
            current.client_username
        ))?
        else {
            return Ok(());
        };

        match workflows::edit_session(self.store, &self.links, user, &id, &client, &date, &time) {
            Ok(_) => self.say("Session updated.\n"),
            Err(e) => self.report(e, "edit session"),
        }
    }

    fn cancel(&mut self, user: &User) -> Result<(), AppError> {
        self.say("\n=== Cancel Session ===")?;
        let Some(id) = self.prompt("Enter Session ID to cancel: ")? else {
            return Ok(());
        };

        match workflows::cancel_session(self.store, &self.links, user, &id) {
            Ok(UpdateOutcome::Updated(_)) => self.say("Session canceled.\n"),
            Ok(UpdateOutcome::AlreadyCanceled(_)) => self.say("Session already canceled.\n"),
            Err(e) => self.report(e, "cancel session"),
        }
    }

    fn add_notes(&mut self, user: &User) -> Result<(), AppError> {
        self.say("\n=== Add Session Notes ===")?;
        let Some(id) = self.prompt("Enter Session ID: ")? else {
            return Ok(());
        };
        let current = match workflows::owned_session(self.store, user, &id) {
            Ok(session) => session,
            Err(e) => return self.report(e, "add notes"),
        };

        self.say(&format!("Current notes: {:?}", current.notes))?;
        let Some(note) = self.prompt("Add note: ")? else {
            return Ok(());
        };

        match workflows::add_session_notes(self.store, &self.links, user, &id, &note) {
            Ok(_) => self.say("Notes updated.\n"),
            Err(e) => self.report(e, "add notes"),
        }
    }

    fn join(&mut self, user: &User) -> Result<(), AppError> {
        self.say("\n=== Join Session ===")?;
        let Some(id) = self.prompt("Enter your Session ID: ")? else {
            return Ok(());
        };

        match workflows::join_session(self.store, user, &id) {
            Ok(link) => self.say(&format!("Meeting link: {}\n", link)),
            Err(e) => self.report(e, "join session"),
        }
    }
}
