use market::store::MemoryStore;
use market::testing::TestClock;

use super::*;

type TestMarket = Marketplace<MemoryStore, TestClock>;

fn market() -> TestMarket {
    Marketplace::new(MemoryStore::new(), TestClock::default())
}

fn capped(limit: usize) -> TestMarket {
    let config = MarketConfig { pin_limit: PinLimit::Capped(limit), ..MarketConfig::default() };
    Marketplace::with_config(MemoryStore::new(), TestClock::default(), config)
}

fn exec(market: &TestMarket, command: Command) -> Result<String, CliError> {
    let mut out = Vec::new();
    run(market, command, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn login(market: &TestMarket, username: &str) {
    exec(market, Command::Login { username: username.to_owned(), password: username.to_owned() }).unwrap();
}

fn post(market: &TestMarket, title: &str) -> String {
    let args = PostArgs { title: title.to_owned(), contact: "9800000000".to_owned(), ..PostArgs::default() };
    exec(market, Command::Post(args)).unwrap();
    market.listings().get_all().into_iter().find(|l| l.title == title).map(|l| l.id).unwrap()
}

#[test]
fn seed_is_idempotent() {
    let market = market();
    assert_eq!(exec(&market, Command::Seed).unwrap(), "seeded default users\n");
    assert_eq!(exec(&market, Command::Seed).unwrap(), "users already present\n");
}

#[test]
fn login_then_whoami_reports_role() {
    let market = market();
    login(&market, "sohaum");
    assert_eq!(exec(&market, Command::Whoami).unwrap(), "sohaum (admin)\n");

    exec(&market, Command::Logout).unwrap();
    assert!(matches!(exec(&market, Command::Whoami), Err(CliError::NotLoggedIn)));
}

#[test]
fn wrong_password_is_rejected() {
    let market = market();
    let err = exec(&market, Command::Login { username: "sneha".to_owned(), password: "nope".to_owned() }).unwrap_err();
    assert_eq!(err.to_string(), "Invalid username or password.");
}

#[test]
fn free_post_lists_as_free() {
    let market = market();
    let id = post(&market, "Bike");
    let listed = exec(&market, Command::List(ListArgs { page: 1, ..ListArgs::default() })).unwrap();
    assert!(listed.starts_with(&format!("{id}\tBike\tFREE")));
    assert!(listed.ends_with("page 1/1 (1 listings)\n"));
}

#[test]
fn invalid_contact_post_stores_nothing() {
    let market = market();
    let args = PostArgs { title: "Bike".to_owned(), contact: "notanemail".to_owned(), ..PostArgs::default() };
    let err = exec(&market, Command::Post(args)).unwrap_err();
    assert!(err.to_string().starts_with("❌ "));
    assert!(market.listings().get_all().is_empty());
}

#[test]
fn list_filters_by_query_and_price() {
    let market = market();
    post(&market, "Mountain bike");
    let args = PostArgs {
        title: "Sofa".to_owned(),
        contact: "a@b.np".to_owned(),
        price: "25000".to_owned(),
        ..PostArgs::default()
    };
    exec(&market, Command::Post(args)).unwrap();

    let by_text = ListArgs { all: true, query: Some("bike".to_owned()), ..ListArgs::default() };
    let out = exec(&market, Command::List(by_text)).unwrap();
    assert_eq!(out.lines().count(), 1);
    assert!(out.contains("Mountain bike"));

    let by_price = ListArgs { all: true, price: Some("10000-".to_owned()), ..ListArgs::default() };
    let out = exec(&market, Command::List(by_price)).unwrap();
    assert_eq!(out.lines().count(), 1);
    assert!(out.contains("Rs. 25,000"));
}

#[test]
fn mine_requires_login() {
    let market = market();
    let args = ListArgs { mine: true, page: 1, ..ListArgs::default() };
    assert!(matches!(exec(&market, Command::List(args)), Err(CliError::NotLoggedIn)));
}

#[test]
fn owner_deletes_only_from_profile() {
    let market = market();
    login(&market, "sneha");
    let id = post(&market, "Lamp");

    let err = exec(&market, Command::Delete { id: id.clone(), from_profile: false }).unwrap_err();
    assert!(matches!(err, CliError::Delete(DeleteError::NotPermitted)));

    assert_eq!(exec(&market, Command::Delete { id: id.clone(), from_profile: true }).unwrap(), format!("deleted {id}\n"));
    assert!(market.listings().get(&id).is_none());
}

#[test]
fn deleting_missing_listing_reports_not_found() {
    let market = market();
    login(&market, "sohaum");
    let err = exec(&market, Command::Delete { id: "nope".to_owned(), from_profile: false }).unwrap_err();
    assert!(matches!(err, CliError::NotFound(id) if id == "nope"));
}

#[test]
fn non_admin_cannot_pin() {
    let market = market();
    login(&market, "sneha");
    let id = post(&market, "Lamp");
    let err = exec(&market, Command::Pin { id: id.clone(), replace: None }).unwrap_err();
    assert!(matches!(err, CliError::Pin(PinError::NotAdmin)));
    assert!(!market.listings().get(&id).unwrap().pinned);
}

#[test]
fn pin_limit_requires_replace() {
    let market = capped(1);
    login(&market, "sohaum");
    let first = post(&market, "First");
    let second = post(&market, "Second");
    exec(&market, Command::Pin { id: first.clone(), replace: None }).unwrap();

    let err = exec(&market, Command::Pin { id: second.clone(), replace: None }).unwrap_err();
    assert!(matches!(err, CliError::Pin(PinError::LimitReached { limit: 1, .. })));

    let out = exec(&market, Command::Pin { id: second.clone(), replace: Some(first.clone()) }).unwrap();
    assert_eq!(out, format!("pinned {second}\n"));
    assert!(!market.listings().get(&first).unwrap().pinned);

    let hero = exec(&market, Command::Hero).unwrap();
    assert!(hero.starts_with(&format!("{second}\tSecond 📌")));
}

#[test]
fn show_missing_listing_is_not_found() {
    let market = market();
    assert!(matches!(exec(&market, Command::Show { id: "x".to_owned() }), Err(CliError::NotFound(_))));
}

#[test]
fn load_upload_sniffs_mime_from_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.bin");
    fs::write(&path, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).unwrap();
    let upload = load_upload(&path).unwrap();
    assert_eq!(upload.file_name, "photo.bin");
    assert_eq!(upload.mime, "image/png");
}

#[test]
fn load_upload_reports_missing_file() {
    let err = load_upload(Path::new("/definitely/not/here.png")).unwrap_err();
    assert!(matches!(err, CliError::ReadImage { .. }));
}
