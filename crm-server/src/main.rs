use anyhow::Context;
use crm_server::{Server, ServerState, services, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. dotenv, config, logging
    let config = setup_environment();

    // 2. database and services
    let state = ServerState::initialize(&config)
        .await
        .context("failed to initialize server state")?;

    // 3. `crm-server seed` inserts demo data and exits
    if std::env::args().nth(1).as_deref() == Some("seed") {
        let report = services::seed::seed(&state.services, state.pool())
            .await
            .context("seeding failed")?;
        tracing::info!(
            customers = report.customers,
            products = report.products,
            orders = report.orders,
            "Seed finished"
        );
        return Ok(());
    }

    tracing::info!("CRM server starting...");
    Server::with_state(config, state)
        .run()
        .await
        .context("server error")?;
    Ok(())
}
