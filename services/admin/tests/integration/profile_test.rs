use corporate_admin::domain::types::DEFAULT_AVATAR;
use corporate_admin::error::AdminServiceError;
use corporate_admin::usecase::profile::{UpdateProfileInput, UpdateProfileUseCase};

use crate::helpers::{MockAccountRepo, MockFileStore, png_upload, test_account};

#[tokio::test]
async fn should_rename_without_touching_avatar() {
    let account = test_account("admin@corp.test");
    let files = MockFileStore::default();
    let stored = files.files_handle();
    let uc = UpdateProfileUseCase {
        accounts: MockAccountRepo::new(vec![account.clone()]),
        files,
    };

    let updated = uc
        .execute(
            &account,
            UpdateProfileInput {
                name: Some("  Renamed ".to_owned()),
                avatar: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.avatar, DEFAULT_AVATAR);
    assert!(stored.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_replace_custom_avatar_and_remove_old_file() {
    let mut account = test_account("admin@corp.test");
    account.avatar = "1700000000-0001.png".to_owned();
    let files = MockFileStore::with_files(&["1700000000-0001.png"]);
    let stored = files.files_handle();
    let uc = UpdateProfileUseCase {
        accounts: MockAccountRepo::new(vec![account.clone()]),
        files,
    };

    let updated = uc
        .execute(
            &account,
            UpdateProfileInput {
                name: None,
                avatar: Some(png_upload()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, account.name);
    assert_ne!(updated.avatar, account.avatar);
    let stored = stored.lock().unwrap();
    assert!(stored.contains_key(&updated.avatar));
    assert!(!stored.contains_key("1700000000-0001.png"));
}

#[tokio::test]
async fn should_require_name_or_avatar() {
    let account = test_account("admin@corp.test");
    let uc = UpdateProfileUseCase {
        accounts: MockAccountRepo::new(vec![account.clone()]),
        files: MockFileStore::default(),
    };

    let result = uc
        .execute(
            &account,
            UpdateProfileInput {
                name: None,
                avatar: None,
            },
        )
        .await;

    match result {
        Err(AdminServiceError::Validation(errors)) => {
            assert_eq!(
                errors["name"],
                vec!["The name field is required when avatar is not present."]
            );
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}
