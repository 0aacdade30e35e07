use async_trait::async_trait;
use callguard_domain::{DomainError, PhotoData};

#[async_trait]
pub trait PhotoLoaderPort: Send + Sync {
    async fn load_photo(&self, uri: &str) -> Result<PhotoData, DomainError>;
}
