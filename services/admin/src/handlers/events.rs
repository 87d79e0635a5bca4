use axum_typed_multipart::{FieldData, TryFromMultipart};
use bytes::Bytes;

use corporate_domain::content::Event;

use crate::domain::content::EventInput;
use crate::handlers::content::ContentRoute;
use crate::handlers::upload;
use crate::infra::content::DbEventRepository;
use crate::state::AppState;
use crate::usecase::content::ContentInput;

#[derive(TryFromMultipart)]
pub struct EventForm {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    #[form_data(limit = "unlimited")]
    pub photo: Option<FieldData<Bytes>>,
    #[form_data(field_name = "_method")]
    pub method: Option<String>,
}

impl ContentRoute for Event {
    type Form = EventForm;
    type Repo = DbEventRepository;

    fn repo(state: &AppState) -> DbEventRepository {
        state.event_repo()
    }

    fn split(form: EventForm) -> (ContentInput<Self>, Option<String>) {
        let input = ContentInput {
            fields: EventInput {
                title: form.title,
                link: form.link,
                description: form.description,
                end_date: form.end_date,
                status: form.status,
            },
            photo: upload(form.photo),
        };
        (input, form.method)
    }
}
