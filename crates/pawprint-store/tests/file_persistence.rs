use pawprint_core::{Category, Profile};
use pawprint_store::{FileStore, KeyValueStore, PROFILE_KEY, ProfileRepository, ProfileSession};
use std::time::Duration;

#[tokio::test]
async fn test_profile_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut session = ProfileSession::open(FileStore::new(dir.path()), Duration::from_millis(20));
    session.set(Category::Shirt, 38).await.unwrap();
    session.clear(Category::Hat).await.unwrap();
    session.set_nick("  Biscuit  ");
    session.set_bg_color("#223344");
    let written = session.close().await;

    let (loaded, report) = ProfileRepository::new(FileStore::new(dir.path())).load();
    assert_eq!(loaded, written);
    assert_eq!(loaded.nick, "Biscuit");
    assert_eq!(loaded.selection.hat, None);
    assert!(report.is_clean());
}

#[test]
fn test_record_uses_wire_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut repo = ProfileRepository::new(FileStore::new(dir.path()));

    let mut profile = Profile::default();
    profile.selection.set(Category::Expression, 31).unwrap();
    profile.bg_color = "#abcdef".to_string();
    repo.save(&profile).unwrap();

    let raw = FileStore::new(dir.path()).get(PROFILE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["expr"], 31);
    assert_eq!(value["bgColor"], "#abcdef");
    assert_eq!(value["skin"], 0);
}

#[test]
fn test_hand_edited_record() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(format!("{}.json", PROFILE_KEY)),
        r#"{"skin": 9.0, "hat": -1, "shirt": "36", "pronouns": "they/them", "accent": ""}"#,
    )
    .unwrap();

    let (profile, report) = ProfileRepository::new(FileStore::new(dir.path())).load();
    assert_eq!(profile.selection.skin, Some(9));
    assert_eq!(profile.selection.hat, Some(20));
    assert_eq!(profile.selection.shirt, Some(35));
    assert_eq!(profile.pronouns, "they/them");
    assert!(report.was_rejected("hat"));
    assert!(report.was_rejected("shirt"));
    assert!(report.missing.contains(&"accent"));
}
