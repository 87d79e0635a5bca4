use chrono::NaiveDate;

use corporate_admin::domain::content::EventInput;
use corporate_admin::domain::types::PublicUrls;
use corporate_admin::error::AdminServiceError;
use corporate_admin::usecase::content::{ContentInput, ContentUseCase};
use corporate_domain::content::{Event, EventStatus};
use corporate_domain::id::ContentId;
use corporate_domain::pagination::PageRequest;

use crate::helpers::{MockEventRepo, MockFileStore, png_upload};

type EventUseCase = ContentUseCase<Event, MockEventRepo, MockFileStore>;

fn use_case(repo: MockEventRepo, files: MockFileStore) -> EventUseCase {
    ContentUseCase::new(repo, files, PublicUrls::new("http://localhost:8000/"))
}

fn event_fields() -> EventInput {
    EventInput {
        title: Some("Launch".to_owned()),
        link: Some("https://corp.test/launch".to_owned()),
        description: Some("Product launch".to_owned()),
        end_date: Some("2026-12-31".to_owned()),
        status: None,
    }
}

fn create_input(photo: bool) -> ContentInput<Event> {
    ContentInput {
        fields: event_fields(),
        photo: photo.then(png_upload),
    }
}

fn patch_input(fields: EventInput, photo: bool) -> ContentInput<Event> {
    ContentInput {
        fields,
        photo: photo.then(png_upload),
    }
}

#[tokio::test]
async fn should_create_event_with_default_status_and_photo_url() {
    let files = MockFileStore::default();
    let stored = files.files_handle();
    let uc = use_case(MockEventRepo::default(), files);

    let event = uc.create(create_input(true)).await.unwrap();

    assert_eq!(event.status, EventStatus::Upcoming);
    assert_eq!(event.end_date, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    let photo = event.photo.clone().unwrap();
    assert_eq!(
        event.photo_url.as_deref(),
        Some(format!("http://localhost:8000/images/{photo}").as_str())
    );
    assert!(stored.lock().unwrap().contains_key(&photo));
}

#[tokio::test]
async fn should_reject_invalid_event_fields() {
    let files = MockFileStore::default();
    let stored = files.files_handle();
    let uc = use_case(MockEventRepo::default(), files);

    let result = uc
        .create(ContentInput {
            fields: EventInput {
                title: Some("t".repeat(256)),
                link: None,
                description: Some("ok".to_owned()),
                end_date: Some("31/12/2026".to_owned()),
                status: Some("someday".to_owned()),
            },
            photo: Some(png_upload()),
        })
        .await;

    match result {
        Err(AdminServiceError::Validation(errors)) => {
            assert_eq!(
                errors["title"],
                vec!["The title field must not be greater than 255 characters."]
            );
            assert_eq!(errors["link"], vec!["The link field is required."]);
            assert_eq!(errors["end_date"], vec!["The end date field must be a valid date."]);
            assert_eq!(errors["status"], vec!["The selected status is invalid."]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    assert!(stored.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_report_missing_event_as_not_found() {
    let uc = use_case(MockEventRepo::default(), MockFileStore::default());

    let get = uc.get(ContentId(42)).await;
    let update = uc
        .update(ContentId(42), patch_input(EventInput::default(), false))
        .await;
    let delete = uc.delete(ContentId(42)).await;

    for result in [get.map(|_| ()), update.map(|_| ()), delete] {
        assert!(
            matches!(result, Err(AdminServiceError::NotFound("Event"))),
            "expected NotFound, got {result:?}"
        );
    }
}

#[tokio::test]
async fn should_change_only_supplied_fields() {
    let uc = use_case(MockEventRepo::default(), MockFileStore::default());
    let created = uc.create(create_input(false)).await.unwrap();

    let updated = uc
        .update(
            created.id,
            patch_input(
                EventInput {
                    status: Some("past".to_owned()),
                    ..EventInput::default()
                },
                false,
            ),
        )
        .await
        .unwrap();

    assert_eq!(updated.status, EventStatus::Past);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.link, created.link);
    assert_eq!(updated.end_date, created.end_date);
}

#[tokio::test]
async fn should_reject_blank_required_field_on_update() {
    let uc = use_case(MockEventRepo::default(), MockFileStore::default());
    let created = uc.create(create_input(false)).await.unwrap();

    let result = uc
        .update(
            created.id,
            patch_input(
                EventInput {
                    title: Some("  ".to_owned()),
                    ..EventInput::default()
                },
                false,
            ),
        )
        .await;

    assert!(
        matches!(result, Err(AdminServiceError::Validation(_))),
        "expected Validation, got {result:?}"
    );
}

#[tokio::test]
async fn should_replace_photo_and_remove_previous_file() {
    let files = MockFileStore::default();
    let stored = files.files_handle();
    let uc = use_case(MockEventRepo::default(), files);
    let created = uc.create(create_input(true)).await.unwrap();
    let old_photo = created.photo.clone().unwrap();
    // Pin the old photo to a fixed name so it cannot collide with the replacement.
    stored.lock().unwrap().remove(&old_photo);
    stored.lock().unwrap().insert("old.png".to_owned(), 1);
    uc.repo.events_handle().lock().unwrap()[0].photo = Some("old.png".to_owned());

    let updated = uc
        .update(created.id, patch_input(EventInput::default(), true))
        .await
        .unwrap();

    let new_photo = updated.photo.clone().unwrap();
    assert_ne!(new_photo, "old.png");
    let stored = stored.lock().unwrap();
    assert!(stored.contains_key(&new_photo));
    assert!(!stored.contains_key("old.png"));
}

#[tokio::test]
async fn should_delete_event_and_its_photo() {
    let files = MockFileStore::default();
    let stored = files.files_handle();
    let uc = use_case(MockEventRepo::default(), files);
    let created = uc.create(create_input(true)).await.unwrap();

    uc.delete(created.id).await.unwrap();

    assert!(uc.repo.events_handle().lock().unwrap().is_empty());
    assert!(stored.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_list_newest_first_with_clamped_page() {
    let uc = use_case(MockEventRepo::default(), MockFileStore::default());
    for _ in 0..3 {
        uc.create(create_input(false)).await.unwrap();
    }

    let (events, page) = uc
        .list(PageRequest {
            per_page: 500,
            page: 0,
        })
        .await
        .unwrap();

    assert_eq!(page, PageRequest { per_page: 100, page: 1 });
    let ids: Vec<i64> = events.iter().map(|e| e.id.0).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}
