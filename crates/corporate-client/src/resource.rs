use std::marker::PhantomData;

use reqwest::multipart::Form;

use corporate_domain::auth::MessageResponse;
use corporate_domain::content::Resource;
use corporate_domain::id::ContentId;
use corporate_domain::pagination::{DataResponse, ListResponse, PageRequest};

use crate::client::{ApiClient, decode};
use crate::context::AuthContext;
use crate::error::ClientError;
use crate::upload::FileUpload;

/// Text fields and an optional photo for a content create or update.
///
/// Updates only send what is set here; the server leaves other columns untouched.
#[derive(Debug, Clone, Default)]
pub struct ContentForm {
    fields: Vec<(String, String)>,
    photo: Option<FileUpload>,
}

impl ContentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn photo(mut self, photo: FileUpload) -> Self {
        self.photo = Some(photo);
        self
    }

    fn into_multipart(self, method: Option<&'static str>) -> Result<Form, ClientError> {
        let mut form = Form::new();
        if let Some(method) = method {
            form = form.text("_method", method);
        }
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        if let Some(photo) = self.photo {
            form = form.part("photo", photo.into_part()?);
        }
        Ok(form)
    }
}

/// Typed access to one content resource under `/api/{R::PATH}`.
pub struct ResourceClient<'a, R: Resource> {
    client: &'a ApiClient,
    resource: PhantomData<fn() -> R>,
}

impl ApiClient {
    pub fn resource<R: Resource>(&self) -> ResourceClient<'_, R> {
        ResourceClient {
            client: self,
            resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<'_, R> {
    fn collection_url(&self) -> String {
        self.client.url(&format!("/{}", R::PATH))
    }

    fn record_url(&self, id: ContentId) -> String {
        self.client.url(&format!("/{}/{id}", R::PATH))
    }

    pub async fn list(&self, page: PageRequest) -> Result<ListResponse<R>, ClientError> {
        let url = format!(
            "{}?page={}&per-page={}",
            self.collection_url(),
            page.page,
            page.per_page
        );
        let response = self.client.http().get(url).send().await?;
        decode(response).await
    }

    pub async fn get(&self, id: ContentId) -> Result<R, ClientError> {
        let response = self.client.http().get(self.record_url(id)).send().await?;
        let body: DataResponse<R> = decode(response).await?;
        Ok(body.data)
    }

    pub async fn create(&self, ctx: &AuthContext, form: ContentForm) -> Result<R, ClientError> {
        let response = self
            .client
            .http()
            .post(self.collection_url())
            .bearer_auth(ApiClient::bearer(ctx)?)
            .multipart(form.into_multipart(None)?)
            .send()
            .await?;
        let body: DataResponse<R> = decode(response).await?;
        Ok(body.data)
    }

    /// Sent as `POST` with `_method=PUT` in the multipart body.
    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: ContentId,
        form: ContentForm,
    ) -> Result<R, ClientError> {
        let response = self
            .client
            .http()
            .post(self.record_url(id))
            .bearer_auth(ApiClient::bearer(ctx)?)
            .multipart(form.into_multipart(Some("PUT"))?)
            .send()
            .await?;
        let body: DataResponse<R> = decode(response).await?;
        Ok(body.data)
    }

    pub async fn delete(&self, ctx: &AuthContext, id: ContentId) -> Result<(), ClientError> {
        let response = self
            .client
            .http()
            .post(self.record_url(id))
            .bearer_auth(ApiClient::bearer(ctx)?)
            .multipart(ContentForm::new().into_multipart(Some("DELETE"))?)
            .send()
            .await?;
        decode::<MessageResponse>(response).await?;
        Ok(())
    }
}
