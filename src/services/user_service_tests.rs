// src/services/user_service_tests.rs
//
// USER SERVICE UNIT TESTS
//
// PURPOSE:
// - Prove friendship symmetry: adding or removing a friend always
//   touches both directions, and reads from either side agree
// - Prove that unfriending someone who was never a friend is an error
// - Prove common-friend intersection
// - Prove the create/update error contract and the display-name
//   fallback to the login
//
// As with the film tests, the bulk runs in memory and a short SQLite
// module repeats the flows that depend on relational state.

#[cfg(test)]
mod memory_backend_tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use crate::domain::user::{User, UserId};
    use crate::domain::DomainError;
    use crate::error::AppError;
    use crate::repositories::{
        FriendRepository, InMemoryFriendRepository, InMemoryUserRepository, MemoryStore,
        UserRepository,
    };
    use crate::services::user_service::UserService;

    fn memory_service() -> UserService {
        let store = Arc::new(MemoryStore::new());
        let user_repo: Arc<dyn UserRepository> =
            Arc::new(InMemoryUserRepository::new(store.clone()));
        let friend_repo: Arc<dyn FriendRepository> = Arc::new(InMemoryFriendRepository::new(store));
        UserService::new(user_repo, friend_repo)
    }

    fn user(login: &str) -> User {
        User::new(
            None,
            format!("{}@example.com", login),
            login.to_string(),
            Some(login.to_uppercase()),
            NaiveDate::from_ymd_opt(1990, 5, 20),
        )
    }

    /// Registers `n` users and returns their assigned ids.
    fn register(service: &UserService, n: usize) -> Vec<UserId> {
        (1..=n)
            .map(|i| {
                service
                    .create_user(user(&format!("user{}", i)))
                    .unwrap()
                    .id
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_create_assigns_id_and_starts_friendless() {
        let service = memory_service();

        let created = service.create_user(user("neo")).unwrap();

        assert_eq!(created.id, Some(1));
        assert!(created.friends.is_empty());
    }

    /// A missing or blank display name falls back to the login
    #[test]
    fn test_blank_name_falls_back_to_login() {
        let service = memory_service();

        let no_name = User::new(None, "a@example.com".into(), "trinity".into(), None, None);
        assert_eq!(service.create_user(no_name).unwrap().name, "trinity");

        let blank_name = User::new(
            None,
            "b@example.com".into(),
            "morpheus".into(),
            Some("   ".into()),
            None,
        );
        assert_eq!(service.create_user(blank_name).unwrap().name, "morpheus");
    }

    #[test]
    fn test_create_rejects_invalid_users() {
        let service = memory_service();

        let bad_email = User::new(None, "not-an-email".into(), "neo".into(), None, None);
        assert!(matches!(
            service.create_user(bad_email),
            Err(AppError::Domain(DomainError::InvalidEmail(_)))
        ));

        let bad_login = User::new(None, "a@example.com".into(), "two words".into(), None, None);
        assert!(matches!(
            service.create_user(bad_login),
            Err(AppError::Domain(DomainError::InvalidLogin(_)))
        ));

        let unborn = User::new(
            None,
            "a@example.com".into(),
            "neo".into(),
            None,
            NaiveDate::from_ymd_opt(2120, 1, 1),
        );
        assert!(matches!(
            service.create_user(unborn),
            Err(AppError::Domain(DomainError::BirthdayInFuture))
        ));
    }

    /// One add makes the friendship visible from both sides
    #[test]
    fn test_add_friend_is_symmetric() {
        let service = memory_service();
        let ids = register(&service, 2);

        service.add_friend(ids[0], ids[1]).unwrap();

        let first = service.get_user(ids[0]).unwrap();
        let second = service.get_user(ids[1]).unwrap();
        assert!(first.friends.contains(&ids[1]));
        assert!(second.friends.contains(&ids[0]));
    }

    #[test]
    fn test_add_friend_is_idempotent() {
        let service = memory_service();
        let ids = register(&service, 2);

        service.add_friend(ids[0], ids[1]).unwrap();
        service.add_friend(ids[0], ids[1]).unwrap();

        assert_eq!(service.friends(ids[0]).unwrap().len(), 1);
        assert_eq!(service.friends(ids[1]).unwrap().len(), 1);
    }

    /// One remove dissolves the friendship from both sides
    #[test]
    fn test_remove_friend_is_symmetric() {
        let service = memory_service();
        let ids = register(&service, 2);
        service.add_friend(ids[0], ids[1]).unwrap();

        service.remove_friend(ids[1], ids[0]).unwrap();

        assert!(service.friends(ids[0]).unwrap().is_empty());
        assert!(service.friends(ids[1]).unwrap().is_empty());
    }

    /// Unfriending someone who was never a friend is an error and the
    /// message names the side that is missing
    #[test]
    fn test_remove_friend_is_strict() {
        let service = memory_service();
        let ids = register(&service, 2);

        match service.remove_friend(ids[0], ids[1]) {
            Err(AppError::NotFound(message)) => {
                assert!(message.contains(&format!("user {} has no friend", ids[0])));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_friend_ops_require_both_users() {
        let service = memory_service();
        let ids = register(&service, 1);

        assert!(matches!(
            service.add_friend(ids[0], 42),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.add_friend(42, ids[0]),
            Err(AppError::NotFound(_))
        ));
        // Negative ids are users that cannot exist
        assert!(matches!(
            service.add_friend(ids[0], -1),
            Err(AppError::NotFound(_))
        ));
    }

    /// friends(1) = {2,3,4} and friends(3) = {1,2,4} intersect at {2,4}
    #[test]
    fn test_common_friends() {
        let service = memory_service();
        let ids = register(&service, 4);

        service.add_friend(ids[0], ids[1]).unwrap();
        service.add_friend(ids[0], ids[2]).unwrap();
        service.add_friend(ids[0], ids[3]).unwrap();
        service.add_friend(ids[2], ids[1]).unwrap();
        service.add_friend(ids[2], ids[3]).unwrap();

        let common = service.common_friends(ids[0], ids[2]).unwrap();
        let common_ids: Vec<UserId> = common.iter().filter_map(|u| u.id).collect();
        assert_eq!(common_ids, vec![ids[1], ids[3]]);
    }

    #[test]
    fn test_common_friends_without_overlap_is_empty() {
        let service = memory_service();
        let ids = register(&service, 3);
        service.add_friend(ids[0], ids[1]).unwrap();

        assert!(service.common_friends(ids[0], ids[2]).unwrap().is_empty());
    }

    #[test]
    fn test_get_user_not_found() {
        let service = memory_service();

        assert!(matches!(service.get_user(9), Err(AppError::NotFound(_))));
        assert!(matches!(service.get_user(-9), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_update_requires_a_known_id() {
        let service = memory_service();
        service.create_user(user("neo")).unwrap();

        let mut no_id = user("neo");
        no_id.id = None;
        assert!(matches!(
            service.update_user(no_id),
            Err(AppError::Validation(_))
        ));

        let mut unknown = user("neo");
        unknown.id = Some(100);
        assert!(matches!(
            service.update_user(unknown),
            Err(AppError::NotFound(_))
        ));

        let mut negative = user("neo");
        negative.id = Some(-5);
        assert!(matches!(
            service.update_user(negative),
            Err(AppError::Validation(_))
        ));
    }

    /// Friendships live in the membership index; an update payload cannot
    /// overwrite them
    #[test]
    fn test_update_preserves_the_friend_index() {
        let service = memory_service();
        let ids = register(&service, 2);
        service.add_friend(ids[0], ids[1]).unwrap();

        let mut change = user("renamed");
        change.id = Some(ids[0]);
        change.friends.insert(99);
        let updated = service.update_user(change).unwrap();

        assert_eq!(updated.login, "renamed");
        assert_eq!(updated.friends.len(), 1);
        assert!(updated.friends.contains(&ids[1]));
    }
}

#[cfg(test)]
mod sqlite_backend_tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use crate::db::{create_test_pool, initialize_database};
    use crate::domain::user::{User, UserId};
    use crate::error::AppError;
    use crate::repositories::{SqliteFriendRepository, SqliteUserRepository};
    use crate::services::user_service::UserService;

    fn sqlite_service() -> UserService {
        let pool = create_test_pool().unwrap();
        initialize_database(&pool.get().unwrap()).unwrap();
        let pool = Arc::new(pool);
        UserService::new(
            Arc::new(SqliteUserRepository::new(pool.clone())),
            Arc::new(SqliteFriendRepository::new(pool)),
        )
    }

    fn user(login: &str) -> User {
        User::new(
            None,
            format!("{}@example.com", login),
            login.to_string(),
            None,
            NaiveDate::from_ymd_opt(1990, 5, 20),
        )
    }

    /// The relational backend honors the same friendship contract as the
    /// in-memory one
    #[test]
    fn test_friendship_flow_on_sqlite() {
        let service = sqlite_service();
        let alice = service.create_user(user("alice")).unwrap().id.unwrap();
        let bob = service.create_user(user("bob")).unwrap().id.unwrap();

        service.add_friend(alice, bob).unwrap();
        assert!(service.get_user(bob).unwrap().friends.contains(&alice));

        service.remove_friend(bob, alice).unwrap();
        assert!(service.friends(alice).unwrap().is_empty());
        assert!(matches!(
            service.remove_friend(alice, bob),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_common_friends_on_sqlite() {
        let service = sqlite_service();
        let ids: Vec<UserId> = ["alice", "bob", "carol", "dave"]
            .iter()
            .map(|login| service.create_user(user(login)).unwrap().id.unwrap())
            .collect();

        service.add_friend(ids[0], ids[1]).unwrap();
        service.add_friend(ids[0], ids[3]).unwrap();
        service.add_friend(ids[2], ids[1]).unwrap();
        service.add_friend(ids[2], ids[3]).unwrap();

        let common = service.common_friends(ids[0], ids[2]).unwrap();
        let common_ids: Vec<UserId> = common.iter().filter_map(|u| u.id).collect();
        assert_eq!(common_ids, vec![ids[1], ids[3]]);
    }
}
