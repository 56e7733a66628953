mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use chrono::Local;
use clap::Parser;
use log::LevelFilter;

use crate::config::{ActionInputs, AppConfig, DEFAULT_API_URL};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::github::GithubClient;
use crate::workflow::summary::post_diff_summary;

/// Inputs fall back to the `INPUT_*` variables GitHub Actions sets for `with:` values.
#[derive(Parser)]
#[command(
    name = "pr-diff-summary",
    author,
    version,
    about = "Comment a pull request with its diff statistics, once per day"
)]
struct Cli {
    /// Owner of the repository.
    #[arg(long, env = "INPUT_OWNER")]
    owner: Option<String>,
    /// Repository name.
    #[arg(long, env = "INPUT_REPO")]
    repo: Option<String>,
    /// Pull request number.
    #[arg(long, env = "INPUT_PR_NUMBER")]
    pr_number: Option<String>,
    /// Token used to call the GitHub API.
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Who triggered the run.
    #[arg(long, env = "INPUT_TRIGGERED_BY")]
    triggered_by: Option<String>,
    /// GitHub REST API base URL.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: Option<String>,
    /// Login whose marked comments count as an earlier summary.
    #[arg(long, env = "INPUT_BOT_LOGIN")]
    bot_login: Option<String>,
}

impl From<Cli> for ActionInputs {
    fn from(cli: Cli) -> Self {
        Self {
            owner: cli.owner,
            repo: cli.repo,
            pr_number: cli.pr_number,
            token: cli.token,
            triggered_by: cli.triggered_by,
            api_url: cli.api_url,
            bot_login: cli.bot_login,
        }
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(error) = run().await {
        log::error!("{error}");
        println!("::error::{}", escape_annotation(&error.to_string()));
        std::process::exit(1);
    }
}

fn init_logging() {
    let level = match std::env::var("RUNNER_DEBUG").as_deref() {
        Ok("1") => LevelFilter::Debug,
        _ => LevelFilter::Info,
    };
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter(Some("pr_diff_summary"), level)
        .parse_default_env()
        .init();
}

async fn run() -> AppResult<()> {
    log::info!("starting pull request diff summary");

    let config = AppConfig::from_inputs(Cli::parse().into())?;
    log::debug!("{config:?}");
    log::info!(
        "running on {} triggered by {}",
        config.pull_request,
        config.triggered_by
    );

    let github = Arc::new(GithubClient::new(
        config.api_url.clone(),
        config.token.clone(),
    ));
    let context = AppContext::new(config, github);

    let outcome = post_diff_summary(&context, &Local::now()).await?;
    log::info!(
        "done: {} changes in total, new comment posted: {}",
        outcome.summary.changes,
        outcome.posted
    );

    Ok(())
}

/// Workflow commands end at the first newline, so the message is percent-encoded.
fn escape_annotation(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
