use std::sync::Arc;
use threec_client::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();

    let auth = Arc::new(AuthClient::from_env()?);
    auth.login().await?;

    let mailing = MailingClient::new(auth.clone()).with_on_mailing_created(|container| {
        info!("Hook: container {} ready", container.mailing_id);
    });

    let campaigns = mailing.listar_campanhas().await?;
    let Some(campaign) = campaigns.first() else {
        warn!("No active campaign found");
        auth.logout().await?;
        return Ok(());
    };
    info!("Using campaign {} ({})", campaign.name, campaign.id);

    let container = mailing
        .criar_mailing_container("Demo mailing", campaign.id)
        .await?;

    let contacts = vec![
        Contact::new("João Silva")
            .with_phone("+55 (11) 99999-0001")
            .with_external_id("demo-1"),
        Contact::new("Maria Souza")
            .with_phones(["11 98888-0002", "11 3333-0002"])
            .with_external_id("demo-2")
            .with_extra("valor", json!(1250.75)),
    ];
    let result = mailing
        .enviar_mailing_json(container.mailing_id, &contacts)
        .await?;
    info!("Upload result: {}", result);

    let weight = mailing.ajustar_peso_mailing(container.mailing_id, 5).await?;
    info!("Weight result: {}", weight);

    info!("Created mailings: {:?}", mailing.created_mailings().await);
    auth.logout().await?;
    Ok(())
}
