use s3_log_hook::app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::main().await
}
