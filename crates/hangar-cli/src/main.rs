// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hangar_core::config::{CatalogConfig, ConfigManager};
use hangar_core::rank::{self, TrendingView};
use hangar_core::summary::{self, Facets};
use hangar_core::{
    AircraftRecord, CatalogQuery, FilterCriteria, PriceRange, PriceType, SortKey, SortPreset,
    SortSpec,
};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON snapshot of the catalog (as served by /api/aircraft)
    #[arg(short, long, env = "HANGAR_CATALOG")]
    catalog: PathBuf,

    /// Alternate catalog.json settings file
    #[arg(long, env = "HANGAR_CONFIG")]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and sort the catalog
    Browse {
        /// Substring of name, developer, manufacturer or description
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        developer: Vec<String>,
        #[arg(long)]
        manufacturer: Vec<String>,
        #[arg(long)]
        category: Vec<String>,
        /// Paid or Freeware
        #[arg(long)]
        price_type: Vec<String>,
        /// Simulator tag, loosely matched (MS2024, "MSFS 2024", X-Plane 12...)
        #[arg(long)]
        compat: Vec<String>,
        /// Star bucket (floor of the average rating)
        #[arg(long)]
        rating: Vec<u8>,
        #[arg(long, default_value_t = 0.0)]
        min_price: f64,
        #[arg(long)]
        max_price: Option<f64>,
        /// Sort column (name, developer, price, average_rating, view_count...)
        #[arg(long, conflicts_with = "preset")]
        sort: Option<String>,
        /// Sort descending instead of ascending
        #[arg(long, requires = "sort")]
        desc: bool,
        /// Named ordering: rating, price_low, price_high, reviews, newest (default from config)
        #[arg(long)]
        preset: Option<String>,
    },
    /// Highest rated aircraft
    Top {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Most viewed aircraft of all time
    MostViewed {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Aircraft viewed recently, busiest first
    Trending {
        #[arg(short, long)]
        limit: Option<usize>,
        /// Window in days
        #[arg(short, long)]
        days: Option<i64>,
    },
    /// Latest additions
    Recent {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Category overview, or manufacturers inside one category
    Categories { category: Option<String> },
    /// Views per category
    Views,
    /// Paid / freeware counts
    Stats,
    /// Distinct filter values
    Facets,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(e) = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Logging disabled: {}", e);
    }

    let config = match &cli.config {
        Some(path) => ConfigManager::at_path(path),
        None => ConfigManager::new(),
    }
    .load()?;
    log_config(&config);

    let records = AircraftRecord::from_json_file(&cli.catalog)
        .with_context(|| format!("Failed to load catalog {:?}", cli.catalog))?;
    log::debug!("[Hangar] Loaded {} records from {:?}", records.len(), cli.catalog);

    match cli.command {
        Commands::Browse {
            search,
            developer,
            manufacturer,
            category,
            price_type,
            compat,
            rating,
            min_price,
            max_price,
            sort,
            desc,
            preset,
        } => {
            let criteria = FilterCriteria {
                search_text: search.unwrap_or_default(),
                price_range: PriceRange::new(min_price, max_price)?,
                price_types: price_type
                    .iter()
                    .map(|p| p.parse::<PriceType>().unwrap_or(PriceType::Unknown))
                    .collect(),
                developers: developer.into_iter().collect(),
                manufacturers: manufacturer.into_iter().collect(),
                categories: category.into_iter().collect(),
                ratings: rating.into_iter().collect(),
                compatibility: compat,
            };

            let spec = match (sort, preset) {
                (Some(key), _) => {
                    let key: SortKey = key.parse()?;
                    Some(if desc {
                        SortSpec::descending(key)
                    } else {
                        SortSpec::ascending(key)
                    })
                }
                (None, Some(preset)) => Some(preset.parse::<SortPreset>()?.spec()),
                (None, None) => Some(config.default_preset.spec()),
            };

            let results = CatalogQuery::new(criteria, spec).run(&records);
            if results.is_empty() {
                println!("No aircraft match these filters.");
            } else {
                print_records(&results);
                println!("{} of {} aircraft", results.len(), records.len());
            }
        }
        Commands::Top { limit } => {
            let limit = limit.unwrap_or(config.top_rated_limit);
            print_records(&rank::top_rated(&records, limit));
        }
        Commands::MostViewed { limit } => {
            let limit = limit.unwrap_or(config.most_viewed_limit);
            print_records(&rank::most_viewed(&records, limit));
        }
        Commands::Trending { limit, days } => {
            let days = days.unwrap_or(config.trending_window_days);
            let now = chrono::Local::now().naive_local();
            let subset = rank::trending_window(&records, now, days);
            let view = rank::rank_trending(Some(subset), limit.unwrap_or(config.trending_limit));
            match view {
                TrendingView::Ranked(entries) if entries.is_empty() => {
                    println!("Nothing viewed in the last {} days.", days);
                }
                view => print_records(&view.records()),
            }
        }
        Commands::Recent { limit } => {
            let limit = limit.unwrap_or(config.recent_limit);
            print_records(&rank::recently_added(&records, limit));
        }
        Commands::Categories { category: None } => {
            for row in summary::category_summaries(&records) {
                println!(
                    "{:<24} {:>4} aircraft  avg {:.1}",
                    row.category, row.count, row.avg_rating
                );
            }
        }
        Commands::Categories {
            category: Some(category),
        } => {
            let rows = summary::manufacturer_summaries(&records, &category);
            if rows.is_empty() {
                println!("No aircraft in category '{}'", category);
            }
            for row in rows {
                let models: Vec<&str> = row.models.iter().map(String::as_str).collect();
                println!(
                    "{:<20} {:>4} aircraft  avg {:.1}  [{}]",
                    row.manufacturer,
                    row.count,
                    row.avg_rating,
                    models.join(", ")
                );
            }
        }
        Commands::Views => {
            for row in summary::category_view_stats(&records) {
                println!(
                    "{:<24} {:>8} views  {:>4} aircraft  {:.1} per aircraft",
                    row.category, row.total_views, row.aircraft_count, row.avg_views
                );
            }
        }
        Commands::Stats => {
            let stats = summary::catalog_stats(&records);
            println!("Aircraft: {}", stats.total);
            println!("Paid:     {}", stats.paid);
            println!("Freeware: {}", stats.freeware);
        }
        Commands::Facets => print_facets(&Facets::collect(&records)),
    }

    Ok(())
}

fn print_records(records: &[&AircraftRecord]) {
    for record in records {
        let price = match record.price_type {
            PriceType::Freeware => "Freeware".to_string(),
            _ => record.price.clone().unwrap_or_else(|| "-".to_string()),
        };
        println!(
            "{:<36} {:<16} {:>12}  {:.1} ({:>3})  {:>6} views",
            record.name,
            record.developer,
            price,
            record.average_rating,
            record.total_reviews,
            record.view_count
        );
    }
}

fn print_facets(facets: &Facets) {
    println!("Developers:    {}", facets.developers.join(", "));
    println!("Manufacturers: {}", facets.manufacturers.join(", "));
    println!("Categories:    {}", facets.categories.join(", "));
    println!("Compatibility: {}", facets.compatibility.join(", "));
}

fn log_config(config: &CatalogConfig) {
    log::debug!(
        "[Hangar] Limits: top {} / viewed {} / trending {} over {} days / recent {}",
        config.top_rated_limit,
        config.most_viewed_limit,
        config.trending_limit,
        config.trending_window_days,
        config.recent_limit
    );
}
