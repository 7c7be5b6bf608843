use anyhow::Result;
use clap::Parser;
use podcast_agent::cli::{Cli, Commands};
use podcast_agent::{utils, Credentials, PodcastAgent, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::new()?,
    };
    init_logging(&settings.logging.level);

    let credentials = Credentials::from_env().with_overrides(
        cli.account_id,
        cli.database_id,
        cli.api_token,
    );
    tracing::debug!("Using {:?}", credentials);

    let agent = PodcastAgent::from_settings(&settings, &credentials);

    match cli.command {
        Commands::Generate {
            query,
            base_url,
            episode,
            ai_slug,
        } => {
            let agent = if ai_slug { agent.with_ai_slug(true) } else { agent };
            handle_generate(&agent, &query, base_url, episode, &credentials).await
        }
        Commands::List { limit } => {
            utils::print_reply(&agent.list(limit, &credentials).await);
        }
        Commands::Search { term } => {
            utils::print_reply(&agent.search(&term, &credentials).await);
        }
        Commands::Recommend { preference } => {
            utils::print_info("Finding recommendations...");
            utils::print_reply(&agent.recommend(&preference, &credentials).await);
        }
        Commands::Slug { query } => println!("{}", agent.slug(&query)),
        Commands::Url { query, base_url } => {
            println!("{}", agent.url(&query, base_url.as_deref()))
        }
        Commands::InitDb => {
            let reply = agent.init_schema(&credentials).await;
            if reply.is_success() {
                utils::print_success(reply.text());
            } else {
                utils::print_reply(&reply);
            }
        }
    }

    Ok(())
}

async fn handle_generate(
    agent: &PodcastAgent,
    query: &str,
    base_url: Option<String>,
    episode: Option<String>,
    credentials: &Credentials,
) {
    utils::print_info("Generating announcement...");

    let generation = agent
        .generate(query, base_url.as_deref(), episode.as_deref(), credentials)
        .await;

    utils::print_header("New Episode");
    utils::print_field("Slug", &generation.slug);
    utils::print_field("URL", &generation.url);
    println!();
    utils::print_reply(&generation.announcement);

    tracing::info!("Catalog write: {:?}", generation.persist);
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
