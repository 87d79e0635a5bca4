use axum_typed_multipart::{FieldData, TryFromMultipart};
use bytes::Bytes;

use corporate_domain::content::Member;

use crate::domain::content::MemberInput;
use crate::handlers::content::ContentRoute;
use crate::handlers::upload;
use crate::infra::content::DbMemberRepository;
use crate::state::AppState;
use crate::usecase::content::ContentInput;

#[derive(TryFromMultipart)]
pub struct MemberForm {
    pub name: Option<String>,
    pub position: Option<String>,
    pub rank: Option<String>,
    #[form_data(limit = "unlimited")]
    pub photo: Option<FieldData<Bytes>>,
    #[form_data(field_name = "_method")]
    pub method: Option<String>,
}

impl ContentRoute for Member {
    type Form = MemberForm;
    type Repo = DbMemberRepository;

    fn repo(state: &AppState) -> DbMemberRepository {
        state.member_repo()
    }

    fn split(form: MemberForm) -> (ContentInput<Self>, Option<String>) {
        let input = ContentInput {
            fields: MemberInput {
                name: form.name,
                position: form.position,
                rank: form.rank,
            },
            photo: upload(form.photo),
        };
        (input, form.method)
    }
}
