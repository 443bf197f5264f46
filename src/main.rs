use tracing::{error, info};

use yatube::posts::{GroupRepository, NewGroup};
use yatube::web::{AppState, WebServer};
use yatube::{Config, Database};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = yatube::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        yatube::logging::init_console_only(&config.logging.level);
    }

    info!("{} starting", config.site.name);

    if let Err(e) = run(config).await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> yatube::Result<()> {
    config.validate()?;

    let db = Database::open(&config.database.path).await?;

    let groups = GroupRepository::new(db.pool());
    for seed in &config.groups {
        let group = groups.ensure(&NewGroup::from(seed)).await?;
        info!("Group '{}' available at /group/{}/", group.title, group.slug);
    }

    let state = AppState::from_config(db, &config)?;
    let server = WebServer::new(&config.server, state)?;
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    server.run().await
}
