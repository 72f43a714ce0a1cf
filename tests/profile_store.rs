use std::path::Path;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;
use wenzday_profile::{
    BasicInfoUpdate, EducationEntry, Gender, ProfileRecord, ProfileStorage, ProfileStore,
    PROFILE_FILE_NAME,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Polls until the primary file decodes and satisfies the predicate. Saves
/// are detached and writes are not atomic, so reads are retried.
async fn wait_for_saved(path: &Path, predicate: impl Fn(&ProfileRecord) -> bool) {
    for _ in 0..200 {
        if let Ok(bytes) = std::fs::read(path) {
            if let Ok(record) = serde_json::from_slice::<ProfileRecord>(&bytes) {
                if predicate(&record) {
                    return;
                }
            }
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("timed out waiting for save at {}", path.display());
}

#[tokio::test]
async fn seed_then_edits_survive_a_restart() {
    init_logging();

    let dir = TempDir::new().unwrap();
    let primary = dir.path().join(PROFILE_FILE_NAME);
    let seed_path = dir.path().join("seed").join(PROFILE_FILE_NAME);

    // Ship a seed profile the way the app bundle would.
    let seed = ProfileRecord {
        chinese_name: "李雷".to_string(),
        english_name: "Li Lei".to_string(),
        birth_date: Some(Utc.with_ymd_and_hms(2010, 9, 15, 0, 0, 0).unwrap()),
        gender: Gender::Male,
        email: String::new(),
        education_history: Vec::new(),
    };
    std::fs::create_dir_all(seed_path.parent().unwrap()).unwrap();
    std::fs::write(&seed_path, serde_json::to_vec_pretty(&seed).unwrap()).unwrap();

    // First run: no primary yet, so the seed is what loads.
    let store = ProfileStore::new(ProfileStorage::new(primary.clone(), Some(seed_path.clone())));
    store.initialize().await;
    assert_eq!(store.record().await, seed);

    // Let each detached save land before the next mutation, so the final
    // on-disk state is not subject to the last-writer-wins race.
    store
        .update_basic_info(BasicInfoUpdate {
            email: Some("lilei@example.com".to_string()),
            ..BasicInfoUpdate::default()
        })
        .await;
    wait_for_saved(&primary, |r| r.email == "lilei@example.com").await;

    store
        .add_education_entry(EducationEntry::new(
            Utc.with_ymd_and_hms(2016, 9, 1, 0, 0, 0).unwrap(),
            None,
            "Maple School".to_string(),
            "Elementary Grade 1".to_string(),
        ))
        .await;
    wait_for_saved(&primary, |r| r.education_history.len() == 1).await;

    // Restart: the primary now wins over the seed.
    let reopened = ProfileStore::new(ProfileStorage::new(primary, Some(seed_path)));
    reopened.initialize().await;

    let record = reopened.record().await;
    assert_eq!(record.chinese_name, "李雷");
    assert_eq!(record.email, "lilei@example.com");
    assert_eq!(record.education_history.len(), 1);
    assert_eq!(
        record.education_history[0].date_range_string(),
        "Sep 2016 - Present"
    );
    assert_eq!(
        record.age_at(chrono::NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()),
        Some(15)
    );
}
