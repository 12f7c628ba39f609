use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    eventdesk::tui::run().await
}
