use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context as _;

use crate::domain::repository::FileStore;
use crate::domain::types::Upload;
use crate::error::AdminServiceError;

/// Uploaded images on local disk, served back by `ServeDir` under `/images`.
#[derive(Debug, Clone)]
pub struct DiskFileStore {
    pub root: PathBuf,
}

impl DiskFileStore {
    fn path_of(&self, name: &str) -> Result<PathBuf, AdminServiceError> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(anyhow::anyhow!("refusing to touch file {name:?}").into());
        }
        Ok(self.root.join(name))
    }
}

impl FileStore for DiskFileStore {
    async fn put(&self, name: &str, upload: &Upload) -> Result<(), AdminServiceError> {
        let path = self.path_of(name)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("create {}", self.root.display()))?;
        tokio::fs::write(&path, &upload.bytes)
            .await
            .with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), AdminServiceError> {
        let path = self.path_of(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("remove {}", path.display()))
                .into()),
        }
    }
}
