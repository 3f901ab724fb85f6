#[tokio::main]
async fn main() -> anyhow::Result<()> {
    promptsmith_server::start().await
}
