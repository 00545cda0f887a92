use crate::database::{AuthUser, Database, RestResponse};
use crate::error::Result;
use async_trait::async_trait;

/// The two network calls the probe makes.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn rest_health(&self) -> Result<RestResponse>;

    async fn current_user(&self) -> Result<Option<AuthUser>>;
}

#[async_trait]
impl Backend for Database {
    async fn rest_health(&self) -> Result<RestResponse> {
        self.test_connection().await
    }

    async fn current_user(&self) -> Result<Option<AuthUser>> {
        self.get_current_user().await
    }
}
