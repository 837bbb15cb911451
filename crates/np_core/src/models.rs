use async_trait::async_trait;
use crate::Result;

#[async_trait]
pub trait ChatModel: Send + Sync {
    fn name(&self) -> &str;

    /// Produce a reply to a free-text user message
    async fn reply(&self, user_message: &str) -> Result<String>;
}
