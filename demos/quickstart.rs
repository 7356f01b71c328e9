use roomlink_client::{Config, ConfigLocation, Credentials, RoomLinkClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), roomlink_client::Error> {
    tracing_subscriber::fmt::init();

    let config = Config::load(ConfigLocation::Env).await?;
    let client = RoomLinkClient::new(config)?;

    let username = std::env::var("ROOMLINK_USERNAME").unwrap_or_default();
    let password = std::env::var("ROOMLINK_PASSWORD").unwrap_or_default();
    client.login(&Credentials::new(username, password)).await?;

    let rooms: serde_json::Value = client.get("/rooms/active").await?;
    println!("{}", serde_json::to_string_pretty(&rooms)?);
    Ok(())
}
