use tracing::error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_target(false).init();

    if let Err(err) = r2_provision::run().await {
        error!(error = %err, "provisioning failed");
        std::process::exit(1);
    }
}
