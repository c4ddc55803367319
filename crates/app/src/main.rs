//! Catalog Application CLI

use std::process;

use catalog_app::{
    context::AppContext,
    database,
    domain::{categories::data::NewCategory, products::data::NewProduct},
};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Debug, Parser)]
#[command(name = "catalog-app", about = "Catalog service CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(DbCommand),
}

#[derive(Debug, Args)]
struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending schema migrations
    Migrate(DbArgs),
    /// Load the demo catalog (categories and products)
    Seed(DbArgs),
}

#[derive(Debug, Args)]
struct DbArgs {
    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://catalog.db")]
    database_url: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        #[expect(
            clippy::print_stderr,
            reason = "logging is not initialized in the CLI, errors go to stderr"
        )]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Db(DbCommand {
            command: DbSubcommand::Migrate(args),
        }) => migrate(args).await,
        Commands::Db(DbCommand {
            command: DbSubcommand::Seed(args),
        }) => seed(args).await,
    }
}

async fn migrate(args: DbArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::run_migrations(&pool)
        .await
        .map_err(|error| format!("failed to run migrations: {error}"))?;

    #[expect(clippy::print_stdout, reason = "command status belongs on the CLI's stdout")]
    {
        println!("migrations applied");
    }

    Ok(())
}

async fn seed(args: DbArgs) -> Result<(), String> {
    let app = AppContext::from_database_url(&args.database_url)
        .await
        .map_err(|error| format!("failed to initialize app context: {error}"))?;

    let electronics =
        seed_category(&app, "Electronics", "Electronic devices and gadgets").await?;
    let books = seed_category(&app, "Books", "Books and educational materials").await?;
    seed_category(&app, "Clothing", "Fashion and apparel").await?;

    seed_product(
        &app,
        "Laptop",
        "High-performance laptop",
        Decimal::new(99999, 2),
        50,
        electronics,
    )
    .await?;
    seed_product(
        &app,
        "Smartphone",
        "Latest smartphone model",
        Decimal::new(69999, 2),
        100,
        electronics,
    )
    .await?;
    seed_product(
        &app,
        "Programming Book",
        "Learn programming basics",
        Decimal::new(2999, 2),
        200,
        books,
    )
    .await?;

    #[expect(clippy::print_stdout, reason = "command status belongs on the CLI's stdout")]
    {
        println!("demo catalog loaded");
    }

    Ok(())
}

async fn seed_category(app: &AppContext, name: &str, description: &str) -> Result<i64, String> {
    let category = app
        .categories
        .create_category(NewCategory {
            name: name.to_string(),
            description: Some(description.to_string()),
        })
        .await
        .map_err(|error| format!("failed to seed category '{name}': {error}"))?;

    Ok(category.id)
}

async fn seed_product(
    app: &AppContext,
    name: &str,
    description: &str,
    price: Decimal,
    stock: i64,
    category_id: i64,
) -> Result<(), String> {
    app.products
        .create_product(NewProduct {
            name: name.to_string(),
            description: Some(description.to_string()),
            price,
            stock,
            category_id,
        })
        .await
        .map_err(|error| format!("failed to seed product '{name}': {error}"))?;

    Ok(())
}
