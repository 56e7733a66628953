use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{
    Client, RequestBuilder, Response,
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::comment::Comment;
use crate::domain::diff::FileChange;
use crate::domain::pull_request::PullRequestRef;
use crate::error::{AppError, AppResult};
use crate::services::PullRequestService;

const PER_PAGE: usize = 100;
const API_VERSION: &str = "2022-11-28";
const CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct GithubClient {
    http: Client,
    api_url: String,
    token: String,
}

impl GithubClient {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn pull_files_endpoint(&self, pr: &PullRequestRef) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}/files",
            self.api_url, pr.owner, pr.repo, pr.number
        )
    }

    fn issue_comments_endpoint(&self, pr: &PullRequestRef) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.api_url, pr.owner, pr.repo, pr.number
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    async fn send(&self, operation: &str, request: RequestBuilder) -> AppResult<Response> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|err| AppError::Api(format!("failed to {operation}: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Api(format!(
                "{operation} responded with {status}: {body}"
            )));
        }
        Ok(response)
    }

    /// Walks `page=1, 2, …` until GitHub returns a short page.
    async fn get_all_pages<T: DeserializeOwned>(
        &self,
        operation: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> AppResult<Vec<T>> {
        let mut page = 1_u32;
        let mut rows = Vec::new();
        loop {
            let request = self.http.get(url).query(query).query(&[
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ]);
            let chunk: Vec<T> = self
                .send(operation, request)
                .await?
                .json()
                .await
                .map_err(|err| AppError::Decode(format!("{operation}: {err}")))?;

            let chunk_len = chunk.len();
            rows.extend(chunk);
            log::debug!("{operation}: page {page} returned {chunk_len} entries");
            if chunk_len < PER_PAGE {
                break;
            }
            page = page.saturating_add(1);
        }
        Ok(rows)
    }
}

#[async_trait]
impl PullRequestService for GithubClient {
    async fn list_files(&self, pr: &PullRequestRef) -> AppResult<Vec<FileChange>> {
        self.get_all_pages("list pull request files", &self.pull_files_endpoint(pr), &[])
            .await
    }

    async fn list_comments_since(
        &self,
        pr: &PullRequestRef,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<Comment>> {
        // GitHub applies `since` to `updated_at`, so edited older comments come back too.
        let comments: Vec<GithubComment> = self
            .get_all_pages(
                "list issue comments",
                &self.issue_comments_endpoint(pr),
                &[("since", since.to_rfc3339_opts(SecondsFormat::Secs, true))],
            )
            .await?;

        Ok(comments
            .into_iter()
            .map(Comment::from)
            .filter(|comment| comment.created_at >= since)
            .collect())
    }

    async fn create_comment(&self, pr: &PullRequestRef, body: &str) -> AppResult<()> {
        let request = self
            .http
            .post(self.issue_comments_endpoint(pr))
            .json(&GithubCreateComment { body });
        self.send("create issue comment", request).await?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct GithubUser {
    login: String,
}

#[derive(Deserialize)]
struct GithubComment {
    user: Option<GithubUser>,
    body: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<GithubComment> for Comment {
    fn from(comment: GithubComment) -> Self {
        Self {
            author: comment.user.map(|user| user.login),
            body: comment.body,
            created_at: comment.created_at,
        }
    }
}

#[derive(Serialize)]
struct GithubCreateComment<'a> {
    body: &'a str,
}
