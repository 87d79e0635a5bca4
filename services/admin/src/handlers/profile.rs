use axum::{Json, extract::State};
use axum_typed_multipart::{FieldData, TryFromMultipart, TypedMultipart, TypedMultipartError};
use bytes::Bytes;

use corporate_domain::auth::ProfileResponse;

use crate::error::AdminServiceError;
use crate::extract::CurrentAdmin;
use crate::handlers::{form_body, upload};
use crate::state::AppState;
use crate::usecase::profile::{UpdateProfileInput, UpdateProfileUseCase};

#[derive(TryFromMultipart)]
pub struct ProfileForm {
    pub name: Option<String>,
    #[form_data(limit = "unlimited")]
    pub avatar: Option<FieldData<Bytes>>,
}

/// `POST /api/profile/update`
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentAdmin(account): CurrentAdmin,
    form: Result<TypedMultipart<ProfileForm>, TypedMultipartError>,
) -> Result<Json<ProfileResponse>, AdminServiceError> {
    let form = form_body(form)?;
    let usecase = UpdateProfileUseCase {
        accounts: state.account_repo(),
        files: state.files.clone(),
    };

    let updated = usecase
        .execute(
            &account,
            UpdateProfileInput {
                name: form.name,
                avatar: upload(form.avatar),
            },
        )
        .await?;

    Ok(Json(ProfileResponse {
        status: "success".to_owned(),
        message: "Profile updated".to_owned(),
        admin: updated.profile(&state.urls),
    }))
}
