use async_trait::async_trait;
use callguard_application::ports::PhotoLoaderPort;
use callguard_domain::{DomainError, PhotoData};

/// Loads contact photos referenced by `file://` URIs.
#[derive(Debug, Default)]
pub struct FilePhotoLoader;

impl FilePhotoLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PhotoLoaderPort for FilePhotoLoader {
    async fn load_photo(&self, uri: &str) -> Result<PhotoData, DomainError> {
        let path = uri
            .strip_prefix("file://")
            .ok_or_else(|| DomainError::PhotoLoadFailed(format!("unsupported photo URI {}", uri)))?;

        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DomainError::NotFound(path.to_string()),
            _ => DomainError::PhotoLoadFailed(format!("{}: {}", path, e)),
        })?;

        if bytes.is_empty() {
            return Err(DomainError::PhotoLoadFailed(format!("{} is empty", path)));
        }
        Ok(PhotoData::new(bytes))
    }
}
