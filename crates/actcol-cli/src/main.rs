mod brands;

use actcol_sheets::{BrandCatalog, SheetSourceConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "actcol-cli")]
#[command(about = "Inspect the brand catalog published from the spreadsheet")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Brand listing and detail lookups.
    Brands {
        #[command(subcommand)]
        command: BrandsCommands,
    },
    /// Print every filter category and its options.
    Filters,
    /// Print a summary of the sheet as it was ingested.
    Debug,
}

#[derive(Debug, Subcommand)]
enum BrandsCommands {
    /// List brands, optionally narrowed by filters.
    List {
        /// `category=value[,value...]`; repeat for more categories.
        #[arg(long = "filter", value_parser = parse_filter_arg)]
        filters: Vec<(String, String)>,
    },
    /// Show the detail view for one brand.
    Show { slug: String },
}

fn parse_filter_arg(raw: &str) -> Result<(String, String), String> {
    let (category, values) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected category=value, got '{raw}'"))?;
    Ok((category.trim().to_string(), values.to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = actcol_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("actcol-cli: sheet source {}", config.sheet_source_label());
        return Ok(());
    };

    let catalog = BrandCatalog::new(SheetSourceConfig::from_app_config(&config))?;
    match command {
        Commands::Brands {
            command: BrandsCommands::List { filters },
        } => brands::run_list(&catalog, &filters).await?,
        Commands::Brands {
            command: BrandsCommands::Show { slug },
        } => brands::run_show(&catalog, &slug).await?,
        Commands::Filters => brands::run_filters(&catalog).await?,
        Commands::Debug => {
            let summary = catalog.summary().await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
