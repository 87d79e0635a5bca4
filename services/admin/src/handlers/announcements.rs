use axum_typed_multipart::{FieldData, TryFromMultipart};
use bytes::Bytes;

use corporate_domain::content::Announcement;

use crate::domain::content::AnnouncementInput;
use crate::handlers::content::ContentRoute;
use crate::handlers::upload;
use crate::infra::content::DbAnnouncementRepository;
use crate::state::AppState;
use crate::usecase::content::ContentInput;

#[derive(TryFromMultipart)]
pub struct AnnouncementForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub end_date: Option<String>,
    #[form_data(limit = "unlimited")]
    pub photo: Option<FieldData<Bytes>>,
    #[form_data(field_name = "_method")]
    pub method: Option<String>,
}

impl ContentRoute for Announcement {
    type Form = AnnouncementForm;
    type Repo = DbAnnouncementRepository;

    fn repo(state: &AppState) -> DbAnnouncementRepository {
        state.announcement_repo()
    }

    fn split(form: AnnouncementForm) -> (ContentInput<Self>, Option<String>) {
        let input = ContentInput {
            fields: AnnouncementInput {
                title: form.title,
                description: form.description,
                link: form.link,
                end_date: form.end_date,
            },
            photo: upload(form.photo),
        };
        (input, form.method)
    }
}
