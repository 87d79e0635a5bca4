use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{
    AccountRepository, FileStore, NewAccount, PasswordHasher, TokenRepository,
};
use crate::domain::types::{Account, DEFAULT_AVATAR, Upload, normalize_email, stored_file_name};
use crate::domain::validation::{AVATAR_MAX_KIB, Validator};
use crate::error::AdminServiceError;
use crate::usecase::session::issue_token;

pub const EMAIL_TAKEN: &str = "The email has already been taken.";

pub struct RegisterInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    pub avatar: Option<Upload>,
}

#[derive(Debug)]
pub struct RegisterOutput {
    pub token: String,
    pub account: Account,
}

pub struct RegisterUseCase<A, T, H, F>
where
    A: AccountRepository,
    T: TokenRepository,
    H: PasswordHasher,
    F: FileStore,
{
    pub accounts: A,
    pub tokens: T,
    pub hasher: H,
    pub files: F,
}

impl<A, T, H, F> RegisterUseCase<A, T, H, F>
where
    A: AccountRepository,
    T: TokenRepository,
    H: PasswordHasher,
    F: FileStore,
{
    pub async fn execute(&self, input: RegisterInput) -> Result<RegisterOutput, AdminServiceError> {
        // 1. Validate every field, collecting all messages
        let mut v = Validator::new();
        let name = v.required("name", input.name.as_deref());
        if let Some(name) = &name {
            v.max_chars("name", name, 255);
        }
        let email = v
            .required("email", input.email.as_deref())
            .map(|e| normalize_email(&e));
        if let Some(email) = &email {
            v.email("email", email);
            if !v.has_error("email") && self.accounts.find_by_email(email).await?.is_some() {
                v.add("email", EMAIL_TAKEN);
            }
        }
        // Passwords are not trimmed.
        let password = input.password.filter(|p| !p.is_empty());
        match &password {
            Some(password) => {
                v.min_chars("password", password, 8);
                v.confirmed("password", password, input.password_confirmation.as_deref());
            }
            None => v.add("password", "The password field is required."),
        }
        let avatar_kind = input
            .avatar
            .as_ref()
            .and_then(|upload| v.image("avatar", upload, AVATAR_MAX_KIB));
        v.conclude()?;
        let (name, email, password) = (
            name.unwrap_or_default(),
            email.unwrap_or_default(),
            password.unwrap_or_default(),
        );

        // 2. Store the avatar
        let now = Utc::now();
        let avatar = match (&input.avatar, avatar_kind) {
            (Some(upload), Some(kind)) => {
                let file = stored_file_name(kind, now);
                self.files.put(&file, upload).await?;
                Some(file)
            }
            _ => None,
        };

        // 3. Create the account
        let account = NewAccount {
            id: Uuid::now_v7(),
            name,
            email,
            password_hash: self.hasher.hash(&password).await?,
            avatar: avatar.clone().unwrap_or_else(|| DEFAULT_AVATAR.to_owned()),
            created_at: now,
        };
        if !self.accounts.create(&account).await? {
            if let Some(file) = &avatar {
                self.files.remove(file).await?;
            }
            return Err(AdminServiceError::invalid_field("email", EMAIL_TAKEN));
        }

        // 4. Sign in immediately
        let token = issue_token(&self.tokens, account.id).await?;
        tracing::info!(account_id = %account.id, "admin registered");
        Ok(RegisterOutput {
            token,
            account: Account {
                id: account.id,
                name: account.name,
                email: account.email,
                password_hash: account.password_hash,
                avatar: account.avatar,
                created_at: now,
                updated_at: now,
            },
        })
    }
}
