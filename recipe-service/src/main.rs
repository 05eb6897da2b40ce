use recipe_service::{config::RecipeConfig, startup::Application};
use service_core::observability::{init_metrics, init_tracing};

#[tokio::main]
async fn main() -> Result<(), service_core::error::AppError> {
    // Load configuration - fail fast if invalid
    let config = RecipeConfig::from_env()?;

    init_tracing(
        &config.service_name,
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    )?;
    init_metrics()?;

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        environment = ?config.environment,
        backend = ?config.database.backend,
        "Starting recipe service"
    );

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
