#[tokio::main]
async fn main() -> anyhow::Result<()> {
    neri::cli::run().await
}
