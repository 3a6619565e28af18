#[tokio::main]
async fn main() -> anyhow::Result<()> {
    deckforge_web::run().await
}
