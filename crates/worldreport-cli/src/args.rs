use clap::{Args, Parser, Subcommand};
use worldreport_core::config::DEFAULT_BASE_URL;

/// CLI arguments for worldreport-cli
#[derive(Debug, Parser)]
#[command(
    name = "worldreport",
    version,
    about = "Browse country, city, capital, population and language reports from a world-report service"
)]
pub struct CliArgs {
    /// Base URL of the report service
    #[arg(long = "base-url", env = "WORLDREPORT_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Rows per page; -1 shows every row on one page
    #[arg(long = "page-size", default_value_t = 25, allow_negative_numbers = true, global = true)]
    pub page_size: i64,

    /// Group thousands with '.' instead of ','
    #[arg(long, global = true)]
    pub european: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filters shared by `report` and `browse`.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Geographic scope: Global, Continent, Region or Country
    #[arg(long, default_value = "Global")]
    pub scope: String,

    /// Continent, region or country code within the scope (e.g. Asia, BRA)
    #[arg(long, default_value = "")]
    pub name: String,

    /// District within the country (cities only)
    #[arg(long, default_value = "")]
    pub district: String,

    /// Ask the service for at most N rows
    #[arg(long)]
    pub top: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print one page of a report
    Report {
        /// countries, cities, capitals, populations or languages
        kind: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Page to print
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Page through a report interactively (n, p, j <page>, r, q)
    Browse {
        /// countries, cities, capitals, populations or languages
        kind: String,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// List the names available for a scope
    Lookups {
        /// Continent, Region or Country
        scope: String,

        /// Only show names containing this text (accents and case ignored)
        #[arg(short = 'f', long)]
        filter: Option<String>,
    },

    /// List the districts of a country
    Districts {
        /// Country code (e.g. BRA)
        country: String,

        /// Only show districts containing this text (accents and case ignored)
        #[arg(short = 'f', long)]
        filter: Option<String>,
    },
}
