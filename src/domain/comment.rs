use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::diff::DiffSummary;

/// Substring every automated summary carries; used to recognise our own output.
pub const AUTOMATION_MARKER: &str = "This comment was made by";

/// Login GitHub assigns to comments posted with the workflow `GITHUB_TOKEN`.
pub const DEFAULT_BOT_LOGIN: &str = "github-actions[bot]";

/// An existing pull request comment. Author and body are optional because
/// GitHub returns `null` for deleted users and empty comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub author: Option<String>,
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentDecision {
    Post { body: String },
    Skip,
}

impl CommentDecision {
    pub fn should_post(&self) -> bool {
        matches!(self, CommentDecision::Post { .. })
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            CommentDecision::Post { body } => Some(body.as_str()),
            CommentDecision::Skip => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommentDeduplicator {
    bot_login: String,
    triggered_by: String,
}

impl CommentDeduplicator {
    pub fn new(bot_login: impl Into<String>, triggered_by: impl Into<String>) -> Self {
        Self {
            bot_login: bot_login.into(),
            triggered_by: triggered_by.into(),
        }
    }

    /// True when the comment was written by the automation identity and
    /// carries the marker.
    pub fn is_own_comment(&self, comment: &Comment) -> bool {
        let authored = comment.author.as_deref() == Some(self.bot_login.as_str());
        let marked = comment
            .body
            .as_deref()
            .is_some_and(|body| body.contains(AUTOMATION_MARKER));
        authored && marked
    }

    pub fn decide(
        &self,
        latest_today: Option<&Comment>,
        summary: &DiffSummary,
    ) -> CommentDecision {
        match latest_today {
            None => CommentDecision::Post {
                body: self.render_body(summary),
            },
            Some(comment) if self.is_own_comment(comment) => CommentDecision::Skip,
            Some(_) => CommentDecision::Post {
                body: self.render_body(summary),
            },
        }
    }

    fn render_body(&self, summary: &DiffSummary) -> String {
        format!(
            "{AUTOMATION_MARKER} an automated diff summary (triggered by {}).\n\n\
             This PR has been updated with:\n \
             - {} changes\n \
             - {} additions\n \
             - {} deletions\n",
            self.triggered_by, summary.changes, summary.additions, summary.deletions
        )
    }
}
