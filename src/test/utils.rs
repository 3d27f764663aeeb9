#[cfg(test)]
pub mod test_store {
    use crate::auth::{Role, User, find_user, register_user};
    use crate::error::AppError;
    use crate::links::LinkGenerator;
    use crate::models::{Session, SessionStatus};
    use crate::store::{MemoryStore, RecordStore, Resource};
    use crate::telemetry::init_test_tracing;

    pub static STANDARD_PASSWORD: &str = "password123";
    pub static FUTURE_DATE: &str = "2099-06-01";
    pub static PAST_DATE: &str = "2000-01-01";

    #[derive(Default)]
    pub struct TestStoreBuilder {
        users: Vec<TestUser>,
        sessions: Vec<Session>,
    }

    pub struct TestUser {
        pub username: String,
        pub role: Role,
        pub password: String,
    }

    impl TestStoreBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn coach(self, username: &str) -> Self {
            self.user_with_password(username, Role::Coach, STANDARD_PASSWORD)
        }

        pub fn client(self, username: &str) -> Self {
            self.user_with_password(username, Role::Client, STANDARD_PASSWORD)
        }

        pub fn user_with_password(mut self, username: &str, role: Role, password: &str) -> Self {
            self.users.push(TestUser {
                username: username.to_string(),
                role,
                password: password.to_string(),
            });
            self
        }

        /// Seed a session row directly, bypassing scheduling checks.
        pub fn session(
            mut self,
            id: &str,
            coach: &str,
            client: &str,
            status: SessionStatus,
            notes: &str,
        ) -> Self {
            self.sessions.push(Session {
                id: id.to_string(),
                coach_username: coach.to_string(),
                client_username: client.to_string(),
                date: FUTURE_DATE.to_string(),
                time: "10:00".to_string(),
                link: format!("https://meet.jit.si/FitnessSession_{}", id),
                status,
                notes: notes.to_string(),
            });
            self
        }

        pub fn build(self) -> Result<TestStore, AppError> {
            init_test_tracing();

            let store = MemoryStore::new();

            for user in &self.users {
                register_user(
                    &store,
                    &user.username,
                    &user.password,
                    user.role.as_str(),
                    &format!("{}@example.com", user.username),
                )?;
            }

            let rows: Vec<_> = self.sessions.iter().map(Session::to_row).collect();
            store.save(Resource::Sessions, &rows)?;

            Ok(TestStore {
                store,
                links: LinkGenerator::default(),
            })
        }
    }

    pub struct TestStore {
        pub store: MemoryStore,
        pub links: LinkGenerator,
    }

    impl TestStore {
        pub fn user(&self, username: &str) -> User {
            find_user(&self.store, username)
                .expect("Failed to read users")
                .expect("User not found")
        }

        pub fn session(&self, id: &str) -> Session {
            crate::db::find_session_by_id(&self.store, id)
                .expect("Failed to read sessions")
                .map(|(_, session)| session)
                .expect("Session not found")
        }

        pub fn session_rows(&self) -> Vec<Vec<String>> {
            self.store
                .load(Resource::Sessions)
                .expect("Failed to read sessions")
        }
    }

    /// coach1 and coach2, clients cli1 and cli2, and one scheduled session
    /// `S1` between coach1 and cli1.
    pub fn create_standard_test_store() -> TestStore {
        TestStoreBuilder::new()
            .coach("coach1")
            .coach("coach2")
            .client("cli1")
            .client("cli2")
            .session("S1", "coach1", "cli1", SessionStatus::Scheduled, "")
            .build()
            .expect("Failed to build test store")
    }
}
