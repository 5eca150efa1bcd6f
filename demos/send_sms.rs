use std::io;
use std::time::Duration;

use frontsms::{Config, FrontSmsClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("frontsms=debug")),
        )
        .init();

    let config = Config::from_env()?;
    let phone = std::env::var("FRONTSMS_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "FRONTSMS_PHONE environment variable is required",
        )
    })?;
    let message = std::env::var("FRONTSMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the frontsms example.".to_owned());

    let client = FrontSmsClient::builder(config)
        .timeout(Duration::from_secs(30))
        .build()?;

    let reply = client.send(&phone, message).await?;
    for (key, value) in reply.iter() {
        println!("{key}: {value}");
    }

    Ok(())
}
