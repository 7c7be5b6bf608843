use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "podcast-agent")]
#[command(author, version, about = "Podcast announcements, episode links and a remote episode catalog", long_about = None)]
pub struct Cli {
    /// Cloudflare account ID (default: CLOUDFLARE_ACCOUNT_ID)
    #[arg(long, global = true)]
    pub account_id: Option<String>,

    /// D1 database ID (default: CLOUDFLARE_DATABASE_ID)
    #[arg(long, global = true)]
    pub database_id: Option<String>,

    /// Cloudflare API token (default: CLOUDFLARE_API_TOKEN)
    #[arg(long, global = true)]
    pub api_token: Option<String>,

    /// Configuration file to load instead of config/{CONFIG_ENV}
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an episode link and announcement, recording it when credentials are set
    Generate {
        query: String,

        /// Base URL for the episode link
        #[arg(short, long)]
        base_url: Option<String>,

        /// Episode label, e.g. "Episode 12"
        #[arg(short, long)]
        episode: Option<String>,

        /// Ask the language model for the slug
        #[arg(long)]
        ai_slug: bool,
    },

    /// Show the most recent episodes
    List {
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Find episodes whose topic contains a term
    Search { term: String },

    /// Recommend episodes for a free-text preference
    Recommend { preference: String },

    /// Print the slug for a query
    Slug { query: String },

    /// Print the episode URL for a query
    Url {
        query: String,

        #[arg(short, long)]
        base_url: Option<String>,
    },

    /// Create the podcasts table in the remote database
    InitDb,
}
