use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, DatabaseConnection, EntityTrait,
    QueryOrder, QuerySelect,
};

use corporate_admin_schema::{announcements, events, members};
use corporate_domain::content::{Announcement, Event, EventStatus, Member};
use corporate_domain::id::ContentId;
use corporate_domain::pagination::PageRequest;

use crate::domain::content::{
    AnnouncementDraft, AnnouncementPatch, EventDraft, EventPatch, MemberDraft, MemberPatch,
};
use crate::domain::repository::ContentRepository;
use crate::error::AdminServiceError;

// ── Events ────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEventRepository {
    pub db: DatabaseConnection,
}

impl ContentRepository<Event> for DbEventRepository {
    async fn list(&self, page: PageRequest) -> Result<Vec<Event>, AdminServiceError> {
        let models = events::Entity::find()
            .order_by_desc(events::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list events")?;
        models.into_iter().map(event_from_model).collect()
    }

    async fn find(&self, id: ContentId) -> Result<Option<Event>, AdminServiceError> {
        let model = events::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find event")?;
        model.map(event_from_model).transpose()
    }

    async fn create(
        &self,
        draft: &EventDraft,
        photo: Option<&str>,
    ) -> Result<Event, AdminServiceError> {
        let now = Utc::now();
        let model = events::ActiveModel {
            id: NotSet,
            title: Set(draft.title.clone()),
            link: Set(draft.link.clone()),
            description: Set(draft.description.clone()),
            photo: Set(photo.map(str::to_owned)),
            end_date: Set(draft.end_date),
            status: Set(draft.status.as_str().to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .context("create event")?;
        event_from_model(model)
    }

    async fn update(
        &self,
        id: ContentId,
        patch: &EventPatch,
        photo: Option<&str>,
    ) -> Result<Option<Event>, AdminServiceError> {
        let Some(model) = events::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find event for update")?
        else {
            return Ok(None);
        };

        let mut active: events::ActiveModel = model.into();
        if let Some(title) = &patch.title {
            active.title = Set(title.clone());
        }
        if let Some(link) = &patch.link {
            active.link = Set(link.clone());
        }
        if let Some(description) = &patch.description {
            active.description = Set(description.clone());
        }
        if let Some(end_date) = patch.end_date {
            active.end_date = Set(end_date);
        }
        if let Some(status) = patch.status {
            active.status = Set(status.as_str().to_owned());
        }
        if let Some(photo) = photo {
            active.photo = Set(Some(photo.to_owned()));
        }
        active.updated_at = Set(Utc::now());
        let model = active.update(&self.db).await.context("update event")?;
        event_from_model(model).map(Some)
    }

    async fn delete(&self, id: ContentId) -> Result<bool, AdminServiceError> {
        let result = events::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete event")?;
        Ok(result.rows_affected > 0)
    }
}

fn event_from_model(model: events::Model) -> Result<Event, AdminServiceError> {
    Ok(Event {
        id: ContentId(model.id),
        title: model.title,
        link: model.link,
        description: model.description,
        photo: model.photo,
        photo_url: None,
        end_date: model.end_date,
        status: model
            .status
            .parse::<EventStatus>()
            .context("decode event status")?,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Announcements ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAnnouncementRepository {
    pub db: DatabaseConnection,
}

impl ContentRepository<Announcement> for DbAnnouncementRepository {
    async fn list(&self, page: PageRequest) -> Result<Vec<Announcement>, AdminServiceError> {
        let models = announcements::Entity::find()
            .order_by_desc(announcements::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list announcements")?;
        Ok(models.into_iter().map(announcement_from_model).collect())
    }

    async fn find(&self, id: ContentId) -> Result<Option<Announcement>, AdminServiceError> {
        let model = announcements::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find announcement")?;
        Ok(model.map(announcement_from_model))
    }

    async fn create(
        &self,
        draft: &AnnouncementDraft,
        photo: Option<&str>,
    ) -> Result<Announcement, AdminServiceError> {
        let now = Utc::now();
        let model = announcements::ActiveModel {
            id: NotSet,
            title: Set(draft.title.clone()),
            description: Set(draft.description.clone()),
            link: Set(draft.link.clone()),
            end_date: Set(draft.end_date),
            photo: Set(photo.map(str::to_owned)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .context("create announcement")?;
        Ok(announcement_from_model(model))
    }

    async fn update(
        &self,
        id: ContentId,
        patch: &AnnouncementPatch,
        photo: Option<&str>,
    ) -> Result<Option<Announcement>, AdminServiceError> {
        let Some(model) = announcements::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find announcement for update")?
        else {
            return Ok(None);
        };

        let mut active: announcements::ActiveModel = model.into();
        if let Some(title) = &patch.title {
            active.title = Set(title.clone());
        }
        if let Some(description) = &patch.description {
            active.description = Set(description.clone());
        }
        if let Some(link) = &patch.link {
            active.link = Set(link.clone());
        }
        if let Some(end_date) = patch.end_date {
            active.end_date = Set(end_date);
        }
        if let Some(photo) = photo {
            active.photo = Set(Some(photo.to_owned()));
        }
        active.updated_at = Set(Utc::now());
        let model = active.update(&self.db).await.context("update announcement")?;
        Ok(Some(announcement_from_model(model)))
    }

    async fn delete(&self, id: ContentId) -> Result<bool, AdminServiceError> {
        let result = announcements::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete announcement")?;
        Ok(result.rows_affected > 0)
    }
}

fn announcement_from_model(model: announcements::Model) -> Announcement {
    Announcement {
        id: ContentId(model.id),
        title: model.title,
        description: model.description,
        link: model.link,
        end_date: model.end_date,
        photo: model.photo,
        photo_url: None,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Members ───────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMemberRepository {
    pub db: DatabaseConnection,
}

impl ContentRepository<Member> for DbMemberRepository {
    async fn list(&self, page: PageRequest) -> Result<Vec<Member>, AdminServiceError> {
        let models = members::Entity::find()
            .order_by_desc(members::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list members")?;
        Ok(models.into_iter().map(member_from_model).collect())
    }

    async fn find(&self, id: ContentId) -> Result<Option<Member>, AdminServiceError> {
        let model = members::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find member")?;
        Ok(model.map(member_from_model))
    }

    async fn create(
        &self,
        draft: &MemberDraft,
        photo: Option<&str>,
    ) -> Result<Member, AdminServiceError> {
        let now = Utc::now();
        let model = members::ActiveModel {
            id: NotSet,
            name: Set(draft.name.clone()),
            position: Set(draft.position.clone()),
            rank: Set(draft.rank),
            photo: Set(photo.map(str::to_owned)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .context("create member")?;
        Ok(member_from_model(model))
    }

    async fn update(
        &self,
        id: ContentId,
        patch: &MemberPatch,
        photo: Option<&str>,
    ) -> Result<Option<Member>, AdminServiceError> {
        let Some(model) = members::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find member for update")?
        else {
            return Ok(None);
        };

        let mut active: members::ActiveModel = model.into();
        if let Some(name) = &patch.name {
            active.name = Set(name.clone());
        }
        if let Some(position) = &patch.position {
            active.position = Set(position.clone());
        }
        if let Some(rank) = patch.rank {
            active.rank = Set(rank);
        }
        if let Some(photo) = photo {
            active.photo = Set(Some(photo.to_owned()));
        }
        active.updated_at = Set(Utc::now());
        let model = active.update(&self.db).await.context("update member")?;
        Ok(Some(member_from_model(model)))
    }

    async fn delete(&self, id: ContentId) -> Result<bool, AdminServiceError> {
        let result = members::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete member")?;
        Ok(result.rows_affected > 0)
    }
}

fn member_from_model(model: members::Model) -> Member {
    Member {
        id: ContentId(model.id),
        name: model.name,
        position: model.position,
        rank: model.rank,
        photo: model.photo,
        photo_url: None,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
