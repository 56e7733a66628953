use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::comment::Comment;
use crate::domain::diff::FileChange;
use crate::domain::pull_request::PullRequestRef;
use crate::error::AppResult;

#[async_trait]
pub trait PullRequestService: Send + Sync {
    /// Every file touched by the pull request, across all pages.
    async fn list_files(&self, pr: &PullRequestRef) -> AppResult<Vec<FileChange>>;

    /// Comments created at or after `since`, oldest first.
    async fn list_comments_since(
        &self,
        pr: &PullRequestRef,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<Comment>>;

    async fn create_comment(&self, pr: &PullRequestRef, body: &str) -> AppResult<()>;
}
