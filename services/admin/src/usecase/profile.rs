use chrono::Utc;

use crate::domain::repository::{AccountChanges, AccountRepository, FileStore};
use crate::domain::types::{Account, DEFAULT_AVATAR, Upload, stored_file_name};
use crate::domain::validation::{AVATAR_MAX_KIB, Validator};
use crate::error::AdminServiceError;

pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub avatar: Option<Upload>,
}

pub struct UpdateProfileUseCase<A, F>
where
    A: AccountRepository,
    F: FileStore,
{
    pub accounts: A,
    pub files: F,
}

impl<A, F> UpdateProfileUseCase<A, F>
where
    A: AccountRepository,
    F: FileStore,
{
    pub async fn execute(
        &self,
        account: &Account,
        input: UpdateProfileInput,
    ) -> Result<Account, AdminServiceError> {
        let mut v = Validator::new();
        if input.name.is_none() && input.avatar.is_none() {
            v.add("name", "The name field is required when avatar is not present.");
        }
        let name = match input.name.as_deref() {
            Some(raw) => {
                let name = v.required("name", Some(raw));
                if let Some(name) = &name {
                    v.max_chars("name", name, 255);
                }
                name
            }
            None => None,
        };
        let avatar_kind = input
            .avatar
            .as_ref()
            .and_then(|upload| v.image("avatar", upload, AVATAR_MAX_KIB));
        v.conclude()?;

        let avatar = match (&input.avatar, avatar_kind) {
            (Some(upload), Some(kind)) => {
                let file = stored_file_name(kind, Utc::now());
                self.files.put(&file, upload).await?;
                Some(file)
            }
            _ => None,
        };

        let changes = AccountChanges {
            name,
            avatar: avatar.clone(),
            ..AccountChanges::default()
        };
        let Some(updated) = self.accounts.update(account.id, &changes).await? else {
            if let Some(file) = &avatar {
                self.files.remove(file).await?;
            }
            return Err(AdminServiceError::Unauthenticated);
        };

        if avatar.is_some() && account.avatar != DEFAULT_AVATAR && account.avatar != updated.avatar {
            self.files.remove(&account.avatar).await?;
        }
        tracing::info!(account_id = %account.id, "profile updated");
        Ok(updated)
    }
}
