use clap::{Parser, Subcommand};
use medfind_core::{GeoPoint, RadiusKm};
use medfind_search::{MedicineQuery, MedicineSearch, SearchEngine};

#[derive(Debug, Parser)]
#[command(name = "medfind-cli")]
#[command(about = "medfind command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending database migrations.
    Migrate,
    /// Insert demo stores and medicines for local development.
    Seed,
    /// Proximity search for a medicine around a point.
    Search {
        query: String,
        #[arg(long)]
        latitude: f64,
        #[arg(long)]
        longitude: f64,
        #[arg(long, default_value_t = RadiusKm::DEFAULT_KM)]
        radius_km: f64,
    },
    /// List open stores around a point, nearest first.
    Nearby {
        #[arg(long)]
        latitude: f64,
        #[arg(long)]
        longitude: f64,
        #[arg(long, default_value_t = RadiusKm::DEFAULT_KM)]
        radius_km: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let pool = medfind_db::connect_pool_from_env().await?;

    match cli.command {
        Commands::Migrate => {
            medfind_db::run_migrations(&pool).await?;
            println!("migrations applied");
        }
        Commands::Seed => {
            medfind_db::run_migrations(&pool).await?;
            medfind_db::seed::seed_demo_data(&pool).await?;
            println!("demo data seeded");
        }
        Commands::Search {
            query,
            latitude,
            longitude,
            radius_km,
        } => {
            let catalog = medfind_db::PgCatalog::new(pool.clone());
            let engine = SearchEngine::new(catalog.clone(), catalog);
            let results = engine
                .search_medicines(MedicineSearch {
                    query: MedicineQuery::new(&query)?,
                    origin: GeoPoint::new(latitude, longitude)?,
                    radius: RadiusKm::new(radius_km)?,
                    actor: None,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Nearby {
            latitude,
            longitude,
            radius_km,
        } => {
            let catalog = medfind_db::PgCatalog::new(pool.clone());
            let engine = SearchEngine::new(catalog.clone(), catalog);
            let results = engine
                .nearby_stores(GeoPoint::new(latitude, longitude)?, RadiusKm::new(radius_km)?)
                .await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}
