use std::fmt;

use crate::domain::comment::DEFAULT_BOT_LOGIN;
use crate::domain::pull_request::PullRequestRef;
use crate::error::{AppError, AppResult};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Raw action inputs as they arrive from flags or `INPUT_*` variables.
#[derive(Debug, Clone, Default)]
pub struct ActionInputs {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub pr_number: Option<String>,
    pub token: Option<String>,
    pub triggered_by: Option<String>,
    pub api_url: Option<String>,
    pub bot_login: Option<String>,
}

#[derive(Clone)]
pub struct AppConfig {
    pub pull_request: PullRequestRef,
    pub token: String,
    pub triggered_by: String,
    pub api_url: String,
    pub bot_login: String,
}

impl AppConfig {
    pub fn from_inputs(inputs: ActionInputs) -> AppResult<Self> {
        let owner = required("owner", inputs.owner)?;
        let repo = required("repo", inputs.repo)?;
        let pr_number = parse_pr_number(&required("pr_number", inputs.pr_number)?)?;
        let token = required("token", inputs.token)?;
        let triggered_by = required("triggered_by", inputs.triggered_by)?;

        let api_url = optional(inputs.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let bot_login =
            optional(inputs.bot_login).unwrap_or_else(|| DEFAULT_BOT_LOGIN.to_string());

        Ok(Self {
            pull_request: PullRequestRef {
                owner,
                repo,
                number: pr_number,
            },
            token,
            triggered_by,
            api_url,
            bot_login,
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("pull_request", &self.pull_request)
            .field("token", &mask_secret(&self.token))
            .field("triggered_by", &self.triggered_by)
            .field("api_url", &self.api_url)
            .field("bot_login", &self.bot_login)
            .finish()
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(name: &str, value: Option<String>) -> AppResult<String> {
    optional(value)
        .ok_or_else(|| AppError::Input(format!("input required and not supplied: {name}")))
}

fn parse_pr_number(raw: &str) -> AppResult<u64> {
    match raw.parse::<u64>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(AppError::Input(format!(
            "pr_number must be a positive integer, got '{raw}'"
        ))),
    }
}

fn mask_secret(value: &str) -> String {
    match value.chars().count() {
        0 => "<not set>".to_string(),
        1..=6 => "***".to_string(),
        _ => {
            let prefix: String = value.chars().take(3).collect();
            let mut suffix: Vec<char> = value.chars().rev().take(3).collect();
            suffix.reverse();
            let suffix: String = suffix.into_iter().collect();
            format!("{prefix}***{suffix}")
        }
    }
}
