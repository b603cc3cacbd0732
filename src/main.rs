use cardex::config::AppConfig;
use cardex::db::{init_pool, run_migrations};
use cardex::error::AppError;
use cardex::routes::create_router;
use cardex::state::AppState;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("refusing to start: {err}");
            return Err(err);
        }
    };
    info!(?config, "configuration loaded");

    let db = init_pool(&config.database_url).await?;
    if let Err(err) = run_migrations(&db).await {
        error!("migration failed: {err:?}");
        return Err(err);
    }

    let state = AppState::new(config.clone(), db)?;

    if let Some(bootstrap) = &config.bootstrap_admin {
        let created = state
            .admins
            .ensure_admin(&bootstrap.username, &bootstrap.password)
            .await?;
        if created {
            info!(username = %bootstrap.username, "bootstrap admin provisioned");
        }
    }

    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,cardex=debug,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
