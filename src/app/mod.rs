pub mod export;
pub mod fetch_issues;
