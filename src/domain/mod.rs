pub mod comment;
pub mod day;
pub mod diff;
pub mod pull_request;
