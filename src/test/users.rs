#[cfg(test)]
mod tests {
    use crate::auth::{
        Permission, Role, User, authenticate_user, find_user, list_clients, register_user,
        require_client,
    };
    use crate::error::AppError;
    use crate::store::{MemoryStore, RecordStore, Resource};
    use crate::test::test_store::{STANDARD_PASSWORD, TestStoreBuilder};

    #[test]
    fn test_register_and_authenticate() {
        let store = MemoryStore::new();

        register_user(&store, "coach1", "pw", "coach", "c@x.com").expect("Failed to register coach");
        register_user(&store, "cli1", "pw", "client", "d@y.com").expect("Failed to register client");

        let rows = store.load(Resource::Users).expect("Failed to load users");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["coach1", "pw", "coach", "c@x.com"]);

        let wrong = authenticate_user(&store, "coach1", "wrong").expect("Failed to authenticate");
        assert!(wrong.is_none());

        let user = authenticate_user(&store, "coach1", "pw")
            .expect("Failed to authenticate")
            .expect("Expected a user");
        assert_eq!(user.role, Role::Coach);
        assert_eq!(user.email, "c@x.com");
    }

    #[test]
    fn test_authenticate_is_case_sensitive() {
        let test_store = TestStoreBuilder::new()
            .coach("Coach1")
            .build()
            .expect("Failed to build test store");

        let result = authenticate_user(&test_store.store, "coach1", STANDARD_PASSWORD)
            .expect("Failed to authenticate");
        assert!(result.is_none());

        let result = authenticate_user(&test_store.store, "Coach1", &STANDARD_PASSWORD.to_uppercase())
            .expect("Failed to authenticate");
        assert!(result.is_none());
    }

    #[test]
    fn test_authenticate_skips_malformed_rows() {
        let store = MemoryStore::new();
        store
            .save(
                Resource::Users,
                &[
                    vec!["coach1".to_string(), "pw".to_string()],
                    vec![
                        "coach1".to_string(),
                        "pw".to_string(),
                        "coach".to_string(),
                        "c@x.com".to_string(),
                    ],
                ],
            )
            .expect("Failed to seed users");

        let user = authenticate_user(&store, "coach1", "pw")
            .expect("Failed to authenticate")
            .expect("Expected the well-formed row to match");
        assert_eq!(user.email, "c@x.com");
    }

    #[test]
    fn test_register_rejects_duplicate_username() {
        let test_store = TestStoreBuilder::new()
            .coach("coach1")
            .build()
            .expect("Failed to build test store");

        let result = register_user(&test_store.store, "coach1", "other", "client", "e@z.com");

        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("already taken")),
            other => panic!("Expected Validation error, got {:?}", other),
        }

        let rows = test_store
            .store
            .load(Resource::Users)
            .expect("Failed to load users");
        assert_eq!(rows.len(), 1, "Rejected registration must not be stored");
    }

    #[test]
    fn test_register_validation_errors() {
        let store = MemoryStore::new();

        let cases = [
            ("", "pw", "coach", "a@x.com", "Username cannot be empty"),
            ("a,b", "pw", "coach", "a@x.com", "not allowed"),
            ("alice", "", "coach", "a@x.com", "Password cannot be empty"),
            ("alice", "pw", "admin", "a@x.com", "Role must be"),
            ("alice", "pw", "coach", "", "Email cannot be empty"),
            ("alice", "pw", "coach", "a,b@x.com", "not allowed"),
        ];

        for (username, password, role, email, expected) in cases {
            match register_user(&store, username, password, role, email) {
                Err(AppError::Validation(msg)) => assert!(
                    msg.contains(expected),
                    "Expected '{}' in '{}' for {:?}",
                    expected,
                    msg,
                    (username, password, role, email)
                ),
                other => panic!("Expected Validation error, got {:?}", other),
            }
        }

        assert!(store.load(Resource::Users).expect("Failed to load").is_empty());
    }

    #[test]
    fn test_register_trims_and_normalizes_role() {
        let store = MemoryStore::new();

        let user = register_user(&store, "  cli1 ", " pw ", " Client ", " d@y.com ")
            .expect("Failed to register");

        assert_eq!(
            user,
            User {
                username: "cli1".to_string(),
                password: "pw".to_string(),
                role: Role::Client,
                email: "d@y.com".to_string(),
            }
        );
    }

    #[test]
    fn test_list_and_require_clients() {
        let test_store = TestStoreBuilder::new()
            .client("zoe")
            .coach("coach1")
            .client("adam")
            .build()
            .expect("Failed to build test store");

        let clients = list_clients(&test_store.store).expect("Failed to list clients");
        let names: Vec<&str> = clients.iter().map(|c| c.username.as_str()).collect();
        assert_eq!(names, vec!["adam", "zoe"]);

        assert!(require_client(&test_store.store, "zoe").is_ok());
        assert!(matches!(
            require_client(&test_store.store, "coach1"),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            require_client(&test_store.store, "nobody"),
            Err(AppError::NotFound(_))
        ));
        assert!(
            find_user(&test_store.store, "nobody")
                .expect("Failed to find user")
                .is_none()
        );
    }

    #[test]
    fn test_role_permissions() {
        assert!(Role::Coach.has_permission(Permission::ScheduleSessions));
        assert!(Role::Coach.has_permission(Permission::ManageOwnSessions));
        assert!(!Role::Coach.has_permission(Permission::JoinSessions));

        assert!(Role::Client.has_permission(Permission::JoinSessions));
        assert!(Role::Client.has_permission(Permission::ViewOwnSessions));
        assert!(!Role::Client.has_permission(Permission::ScheduleSessions));
    }
}
