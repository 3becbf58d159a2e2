use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    gh_issues_csv::cli::run().await
}
