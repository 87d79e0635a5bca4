use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, SqlErr, sea_query::OnConflict,
};
use uuid::Uuid;

use corporate_admin_schema::{access_tokens, admins, one_time_passcodes};

use crate::domain::repository::{
    AccountChanges, AccountRepository, NewAccount, OtpRepository, TokenRepository,
};
use crate::domain::types::{Account, OneTimePasscode, SessionToken};
use crate::error::AdminServiceError;

// ── Account repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AdminServiceError> {
        let model = admins::Entity::find()
            .filter(admins::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find admin by email")?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AdminServiceError> {
        let model = admins::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find admin by id")?;
        Ok(model.map(account_from_model))
    }

    async fn create(&self, account: &NewAccount) -> Result<bool, AdminServiceError> {
        let result = admins::ActiveModel {
            id: Set(account.id),
            name: Set(account.name.clone()),
            email: Set(account.email.clone()),
            password_hash: Set(account.password_hash.clone()),
            avatar: Set(account.avatar.clone()),
            created_at: Set(account.created_at),
            updated_at: Set(account.created_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(false)
            }
            Err(e) => Err(anyhow::Error::new(e).context("create admin").into()),
        }
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &AccountChanges,
    ) -> Result<Option<Account>, AdminServiceError> {
        let Some(model) = admins::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find admin for update")?
        else {
            return Ok(None);
        };

        let mut active: admins::ActiveModel = model.into();
        if let Some(name) = &changes.name {
            active.name = Set(name.clone());
        }
        if let Some(avatar) = &changes.avatar {
            active.avatar = Set(avatar.clone());
        }
        if let Some(password_hash) = &changes.password_hash {
            active.password_hash = Set(password_hash.clone());
        }
        active.updated_at = Set(Utc::now());
        let model = active.update(&self.db).await.context("update admin")?;
        Ok(Some(account_from_model(model)))
    }
}

fn account_from_model(model: admins::Model) -> Account {
    Account {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        avatar: model.avatar,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── One-time passcode repository ──────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn upsert(&self, otp: &OneTimePasscode) -> Result<(), AdminServiceError> {
        let model = one_time_passcodes::ActiveModel {
            email: Set(otp.email.clone()),
            code: Set(otp.code.clone()),
            created_at: Set(otp.created_at),
        };
        one_time_passcodes::Entity::insert(model)
            .on_conflict(
                OnConflict::column(one_time_passcodes::Column::Email)
                    .update_columns([
                        one_time_passcodes::Column::Code,
                        one_time_passcodes::Column::CreatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("upsert one-time passcode")?;
        Ok(())
    }

    async fn find(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<OneTimePasscode>, AdminServiceError> {
        let model = one_time_passcodes::Entity::find()
            .filter(one_time_passcodes::Column::Email.eq(email))
            .filter(one_time_passcodes::Column::Code.eq(code))
            .one(&self.db)
            .await
            .context("find one-time passcode")?;
        Ok(model.map(|m| OneTimePasscode {
            email: m.email,
            code: m.code,
            created_at: m.created_at,
        }))
    }

    async fn consume(&self, email: &str, code: &str) -> Result<bool, AdminServiceError> {
        let result = one_time_passcodes::Entity::delete_many()
            .filter(one_time_passcodes::Column::Email.eq(email))
            .filter(one_time_passcodes::Column::Code.eq(code))
            .exec(&self.db)
            .await
            .context("consume one-time passcode")?;
        Ok(result.rows_affected > 0)
    }
}

// ── Token repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTokenRepository {
    pub db: DatabaseConnection,
}

impl TokenRepository for DbTokenRepository {
    async fn create(&self, token: &SessionToken) -> Result<(), AdminServiceError> {
        access_tokens::ActiveModel {
            id: Set(token.id),
            admin_id: Set(token.account_id),
            name: Set(token.name.clone()),
            token_hash: Set(token.token_hash.clone()),
            last_used_at: Set(token.last_used_at),
            created_at: Set(token.created_at),
        }
        .insert(&self.db)
        .await
        .context("create access token")?;
        Ok(())
    }

    async fn find_account(&self, token_hash: &[u8]) -> Result<Option<Account>, AdminServiceError> {
        let found = access_tokens::Entity::find()
            .filter(access_tokens::Column::TokenHash.eq(token_hash.to_vec()))
            .find_also_related(admins::Entity)
            .one(&self.db)
            .await
            .context("find access token")?;
        let Some((token, Some(admin))) = found else {
            return Ok(None);
        };

        access_tokens::Entity::update_many()
            .col_expr(
                access_tokens::Column::LastUsedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(access_tokens::Column::Id.eq(token.id))
            .exec(&self.db)
            .await
            .context("touch access token")?;
        Ok(Some(account_from_model(admin)))
    }

    async fn revoke_all(&self, account_id: Uuid) -> Result<u64, AdminServiceError> {
        let result = access_tokens::Entity::delete_many()
            .filter(access_tokens::Column::AdminId.eq(account_id))
            .exec(&self.db)
            .await
            .context("revoke access tokens")?;
        Ok(result.rows_affected)
    }
}
