use clap::Parser;
use pokedex_core::Language;

/// Terminal Pokédex backed by PokeAPI.
///
/// Without `--interactive`, loads the catalog, applies the given
/// filters, prints one page and exits.
#[derive(Parser, Debug)]
#[command(name = "pokedex", about = "Browse the PokeAPI catalog from the terminal")]
pub struct CliArgs {
    /// Start the interactive browser
    #[arg(short, long)]
    pub interactive: bool,

    /// Name substring to search for
    #[arg(short, long)]
    pub search: Option<String>,

    /// Type filter (fire, water, ...)
    #[arg(short = 't', long = "type")]
    pub category: Option<String>,

    /// Generation filter (1-9)
    #[arg(short, long)]
    pub generation: Option<String>,

    /// Page to print in one-shot mode
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Rows per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Print the detail view of one Pokémon and exit
    #[arg(long)]
    pub show: Option<String>,

    /// PokeAPI base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Load at most this many records
    #[arg(long)]
    pub limit: Option<u32>,

    /// Detail requests in flight during the initial load
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Label language: es or en
    #[arg(long)]
    pub language: Option<Language>,

    /// Path to config file (default: ~/.config/pokedex/config.toml)
    #[arg(long, env = "POKEDEX_CONFIG")]
    pub config: Option<String>,
}
