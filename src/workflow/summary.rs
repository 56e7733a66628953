use chrono::{DateTime, TimeZone};

use crate::context::AppContext;
use crate::domain::comment::CommentDeduplicator;
use crate::domain::day::start_of_day;
use crate::domain::diff::DiffSummary;
use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryWorkflowOutcome {
    pub summary: DiffSummary,
    pub posted: bool,
}

pub async fn post_diff_summary<Tz: TimeZone>(
    ctx: &AppContext,
    now: &DateTime<Tz>,
) -> AppResult<SummaryWorkflowOutcome> {
    let pr = &ctx.config.pull_request;

    let files = ctx.pull_requests.list_files(pr).await?;
    log::info!("{pr} changes {} file(s)", files.len());
    for file in &files {
        log::debug!(
            "{}: +{} -{} ({} changes)",
            file.filename,
            file.additions,
            file.deletions,
            file.changes
        );
    }

    let since = start_of_day(now);
    let comments = ctx.pull_requests.list_comments_since(pr, since).await?;
    let latest = comments.last();
    match latest {
        Some(comment) => log::debug!(
            "latest comment since {since}:\n{}",
            serde_json::to_string_pretty(comment).unwrap_or_else(|_| format!("{comment:?}"))
        ),
        None => log::debug!("no comments on {pr} since {since}"),
    }

    let summary = DiffSummary::from_files(&files);
    let deduplicator =
        CommentDeduplicator::new(ctx.config.bot_login.as_str(), ctx.config.triggered_by.as_str());

    let decision = deduplicator.decide(latest, &summary);
    match decision.body() {
        Some(body) => {
            ctx.pull_requests.create_comment(pr, body).await?;
            log::info!(
                "posted summary on {pr}: {} changes, {} additions, {} deletions",
                summary.changes,
                summary.additions,
                summary.deletions
            );
        }
        None => log::info!("latest comment on {pr} is already a diff summary; skipping"),
    }

    Ok(SummaryWorkflowOutcome {
        summary,
        posted: decision.should_post(),
    })
}
