use super::*;
use crate::store::MemoryStore;

fn seeded(store: &MemoryStore, keys: &StorageKeys) {
    UserStore::new(store, keys).ensure_defaults().expect("seed");
}

#[test]
fn ensure_defaults_seeds_only_when_empty() {
    let store = MemoryStore::new();
    let keys = StorageKeys::default();
    let users = UserStore::new(&store, &keys);

    assert!(users.ensure_defaults().expect("first seed"));
    assert!(!users.ensure_defaults().expect("second seed"));
    assert_eq!(users.all().len(), 2);
}

#[test]
fn ensure_defaults_keeps_existing_accounts() {
    let store = MemoryStore::new();
    let keys = StorageKeys::default();
    write_json(&store, &keys.users, &[User::new("ram", "pw", Role::User)]).expect("write");

    let users = UserStore::new(&store, &keys);
    assert!(!users.ensure_defaults().expect("seed"));
    assert_eq!(users.all().len(), 1);
}

#[test]
fn login_records_bare_username_in_session() {
    let store = MemoryStore::new();
    let keys = StorageKeys::default();
    seeded(&store, &keys);

    let actor = UserStore::new(&store, &keys).login("sohaum", "sohaum").expect("login");

    assert!(actor.is_admin());
    assert_eq!(store.get_item("currentUser").expect("get").as_deref(), Some("sohaum"));
}

#[test]
fn login_rejects_wrong_password_without_touching_session() {
    let store = MemoryStore::new();
    let keys = StorageKeys::default();
    seeded(&store, &keys);
    let users = UserStore::new(&store, &keys);

    let err = users.login("sneha", "nope").expect_err("should fail");
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(users.current_username(), None);
    assert_eq!(err.notice(), "Invalid username or password.");
}

#[test]
fn logout_clears_session() {
    let store = MemoryStore::new();
    let keys = StorageKeys::default();
    seeded(&store, &keys);
    let users = UserStore::new(&store, &keys);
    users.login("sneha", "sneha").expect("login");

    users.logout().expect("logout");

    assert_eq!(users.current_actor(), None);
    assert!(!users.is_admin());
}

#[test]
fn current_actor_resolves_role_from_user_list() {
    let store = MemoryStore::new();
    let keys = StorageKeys::default();
    seeded(&store, &keys);
    let users = UserStore::new(&store, &keys);

    store.set_item("currentUser", "sneha").expect("set");
    assert_eq!(users.current_actor(), Some(Actor::new("sneha", Role::User)));

    store.set_item("currentUser", "sohaum").expect("set");
    assert!(users.is_admin());
}

#[test]
fn unknown_session_user_is_an_ordinary_user() {
    let store = MemoryStore::new();
    let keys = StorageKeys::default();
    seeded(&store, &keys);
    store.set_item("currentUser", "mallory").expect("set");

    let actor = UserStore::new(&store, &keys).current_actor().expect("actor");
    assert_eq!(actor.role, Role::User);
}

#[test]
fn custom_keys_are_respected() {
    let store = MemoryStore::new();
    let keys = StorageKeys {
        users: "nb_users_v1".to_owned(),
        current_user: "nb_logged_in_user".to_owned(),
        ..StorageKeys::default()
    };
    seeded(&store, &keys);
    UserStore::new(&store, &keys).login("sneha", "sneha").expect("login");

    assert!(store.get_item("nb_users_v1").expect("get").is_some());
    assert_eq!(store.get_item("nb_logged_in_user").expect("get").as_deref(), Some("sneha"));
}
