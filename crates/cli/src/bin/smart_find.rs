use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    smart_find_cli::main_entry().await
}
