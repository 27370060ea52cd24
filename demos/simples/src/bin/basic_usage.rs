use threec_client::application::auth::AuthClient;
use threec_client::utils::setup_logger;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();

    info!("Starting basic usage example");
    let auth = AuthClient::from_env()?;
    auth.config().validate()?;

    auth.login().await?;
    info!("Authenticated: {}", auth.is_authenticated().await);

    match auth.verificar_sessao().await {
        Ok(me) => info!(
            "Session valid for {}",
            me.get("name").and_then(|v| v.as_str()).unwrap_or("<unknown>")
        ),
        Err(e) => error!("Session check failed: {e}"),
    }

    auth.logout().await?;
    info!("Authenticated after logout: {}", auth.is_authenticated().await);
    Ok(())
}
