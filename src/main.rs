use bookkeeper::{
    config::{categories, database},
    core::SqliteBookkeeper,
    errors::Result,
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the default category configuration
    let config_path =
        std::env::var("BOOKKEEPER_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let app_config = categories::load_config_or_default(&config_path)
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Open the storage file and make sure the tables exist
    let database_url = database::get_database_url();
    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to open database: {}", e))?;
    database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 5. First-run defaults, then one refresh so spending is current
    let bookkeeper = SqliteBookkeeper::open(&db);
    bookkeeper.bootstrap(&app_config.categories).await?;

    for row in bookkeeper.budget_view().await? {
        info!(
            "Budget {:>5}: spent {:.2} of {:.2}, {:.2} remaining",
            row.period.as_str(), row.spent, row.limit, row.remaining
        );
    }
    info!(
        "{} categories, {} expenses on record.",
        bookkeeper.category_view().await?.len(),
        bookkeeper.expense_view().await?.len()
    );

    db.close().await?;
    Ok(())
}
