use std::marker::PhantomData;

use chrono::Utc;

use corporate_domain::id::ContentId;
use corporate_domain::pagination::PageRequest;

use crate::domain::content::ContentKind;
use crate::domain::repository::{ContentRepository, FileStore};
use crate::domain::types::{ImageKind, PublicUrls, Upload, stored_file_name};
use crate::domain::validation::{PHOTO_MAX_KIB, Validator};
use crate::error::AdminServiceError;

pub struct ContentInput<R: ContentKind> {
    pub fields: R::Input,
    pub photo: Option<Upload>,
}

/// List / get / create / update / delete for one content resource.
pub struct ContentUseCase<R, C, F>
where
    R: ContentKind,
    C: ContentRepository<R>,
    F: FileStore,
{
    pub repo: C,
    pub files: F,
    pub urls: PublicUrls,
    kind: PhantomData<fn() -> R>,
}

impl<R, C, F> ContentUseCase<R, C, F>
where
    R: ContentKind,
    C: ContentRepository<R>,
    F: FileStore,
{
    pub fn new(repo: C, files: F, urls: PublicUrls) -> Self {
        Self {
            repo,
            files,
            urls,
            kind: PhantomData,
        }
    }

    fn present(&self, mut record: R) -> R {
        let url = record.photo().map(|p| self.urls.image_url(p));
        record.set_photo_url(url);
        record
    }

    async fn store_photo(
        &self,
        photo: Option<(&Upload, ImageKind)>,
    ) -> Result<Option<String>, AdminServiceError> {
        let Some((upload, kind)) = photo else {
            return Ok(None);
        };
        let file = stored_file_name(kind, Utc::now());
        self.files.put(&file, upload).await?;
        Ok(Some(file))
    }

    pub async fn list(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<R>, PageRequest), AdminServiceError> {
        let page = page.clamped();
        let records = self.repo.list(page).await?;
        Ok((records.into_iter().map(|r| self.present(r)).collect(), page))
    }

    pub async fn get(&self, id: ContentId) -> Result<R, AdminServiceError> {
        self.repo
            .find(id)
            .await?
            .map(|r| self.present(r))
            .ok_or(AdminServiceError::NotFound(R::NAME))
    }

    pub async fn create(&self, input: ContentInput<R>) -> Result<R, AdminServiceError> {
        let mut v = Validator::new();
        let draft = R::draft(&input.fields, &mut v);
        let kind = input
            .photo
            .as_ref()
            .and_then(|upload| v.image("photo", upload, PHOTO_MAX_KIB));
        v.conclude()?;
        let draft = draft.ok_or_else(|| {
            anyhow::anyhow!("{} form rejected without field errors", R::NAME)
        })?;

        let photo = self.store_photo(input.photo.as_ref().zip(kind)).await?;
        let record = match self.repo.create(&draft, photo.as_deref()).await {
            Ok(record) => record,
            Err(e) => {
                if let Some(file) = &photo {
                    self.files.remove(file).await?;
                }
                return Err(e);
            }
        };
        tracing::info!(resource = R::PATH, id = %record.id(), "content created");
        Ok(self.present(record))
    }

    pub async fn update(
        &self,
        id: ContentId,
        input: ContentInput<R>,
    ) -> Result<R, AdminServiceError> {
        let existing = self
            .repo
            .find(id)
            .await?
            .ok_or(AdminServiceError::NotFound(R::NAME))?;

        let mut v = Validator::new();
        let patch = R::patch(&input.fields, &mut v);
        let kind = input
            .photo
            .as_ref()
            .and_then(|upload| v.image("photo", upload, PHOTO_MAX_KIB));
        v.conclude()?;

        let photo = self.store_photo(input.photo.as_ref().zip(kind)).await?;
        let Some(updated) = self.repo.update(id, &patch, photo.as_deref()).await? else {
            if let Some(file) = &photo {
                self.files.remove(file).await?;
            }
            return Err(AdminServiceError::NotFound(R::NAME));
        };
        if photo.is_some() {
            if let Some(old) = existing.photo() {
                self.files.remove(old).await?;
            }
        }
        tracing::info!(resource = R::PATH, %id, "content updated");
        Ok(self.present(updated))
    }

    pub async fn delete(&self, id: ContentId) -> Result<(), AdminServiceError> {
        let existing = self
            .repo
            .find(id)
            .await?
            .ok_or(AdminServiceError::NotFound(R::NAME))?;
        if !self.repo.delete(id).await? {
            return Err(AdminServiceError::NotFound(R::NAME));
        }
        if let Some(photo) = existing.photo() {
            self.files.remove(photo).await?;
        }
        tracing::info!(resource = R::PATH, %id, "content deleted");
        Ok(())
    }
}
