#[tokio::main]
async fn main() -> anyhow::Result<()> {
    flashforge_backend::run().await
}
