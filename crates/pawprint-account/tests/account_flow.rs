use pawprint_account::{
    AccountPayload, AccountRepository, AccountTheme, Coordinate, EMAIL_PLACEHOLDER, FixedLocation,
    LOCATE_TIMEOUT, Suggestions,
};
use pawprint_core::Notice;
use pawprint_store::{FileStore, ProfileRepository};

#[tokio::test]
async fn test_detect_choose_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut repo = AccountRepository::new(FileStore::new(dir.path()));

    let mut account = repo.load();
    assert_eq!(account.email, EMAIL_PLACEHOLDER);

    let mut suggestions = Suggestions::default();
    let provider = FixedLocation::new(Coordinate::new(43.2, 27.9));
    suggestions.detect(&provider, LOCATE_TIMEOUT).await;

    let notice = suggestions.choose(0, &mut account, &mut repo);
    assert_eq!(notice, Some(Notice::AccountSaved));

    let reloaded = AccountRepository::new(FileStore::new(dir.path())).load();
    assert_eq!(reloaded.location, "Varna, BG");
    // the placeholder was on the form when it was saved
    assert_eq!(reloaded.email, EMAIL_PLACEHOLDER);
}

#[test]
fn test_account_and_profile_share_a_directory() {
    let dir = tempfile::tempdir().unwrap();

    let mut profiles = ProfileRepository::new(FileStore::new(dir.path()));
    let (mut profile, _) = profiles.load();
    profile.set_nick("Tofu");
    profile.bg_color = "#102030".to_string();
    profiles.save(&profile).unwrap();

    let mut accounts = AccountRepository::new(FileStore::new(dir.path()));
    accounts
        .save(&AccountPayload {
            email: "tofu@example.net".to_string(),
            ..Default::default()
        })
        .unwrap();

    let theme = AccountTheme::load(&ProfileRepository::new(FileStore::new(dir.path())));
    assert_eq!(theme.nick, "Tofu");
    assert_eq!(theme.vars().unwrap().bg_1, "#102030");
    assert_eq!(accounts.load().email, "tofu@example.net");
}
