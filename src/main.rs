//! Webtoon Reader - terminal front-end for the banner carousel
//!
//! Shows the cached banner list (fetching it on first run), re-fetches on
//! demand, and can clear the cache record.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use webtoon_reader::config::{default_data_dir, DEFAULT_ENDPOINT};
use webtoon_reader::{
    Config, ImageCache, ImageLocation, KeyValueStore, SqliteStore, StoryPage, StoryState,
};

/// Webtoon banner reader with a local image cache
#[derive(Parser, Debug)]
#[command(name = "webtoon_reader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Banners endpoint returning a JSON array of {url, title}
    #[arg(long, env = "WEBTOON_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Directory holding the key-value store and downloaded images
    #[arg(long, env = "WEBTOON_DATA_DIR", default_value_os_t = default_data_dir())]
    data_dir: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, env = "WEBTOON_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Store the cache record under a key derived from the endpoint
    #[arg(long, env = "WEBTOON_KEY_BY_ENDPOINT", default_value_t = false)]
    key_by_endpoint: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the banner carousel, fetching it if nothing is cached (default)
    Show {
        /// Carousel page to show as current, numbered from 1 as in the listing
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        page: u64,
    },
    /// Fetch and cache the banners again, replacing the cache record
    Refresh,
    /// Remove the cache record (downloaded files are left in place)
    Clear,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            endpoint: self.endpoint.clone(),
            data_dir: self.data_dir.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
            key_by_endpoint: self.key_by_endpoint,
            ..Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.config();

    log::info!("Starting webtoon_reader...");
    log::info!("Data directory: {}", config.data_dir.display());

    let store = match SqliteStore::open(&config.db_path()) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to open key-value store: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let cache = match ImageCache::from_config(&config, store) {
        Ok(cache) => cache,
        Err(e) => {
            log::error!("Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match args.command.unwrap_or(Command::Show { page: 1 }) {
        Command::Show { page } => {
            let mut story = StoryPage::new(cache);
            story.open().await;
            story.show_page(usize::try_from(page - 1).unwrap_or(usize::MAX));
            render(story.state())
        }
        Command::Refresh => {
            let mut story = StoryPage::new(cache);
            story.retry().await;
            render(story.state())
        }
        Command::Clear => match cache.store().remove(cache.cache_key()) {
            Ok(true) => {
                println!("Cleared cache record '{}'", cache.cache_key());
                ExitCode::SUCCESS
            }
            Ok(false) => {
                println!("No cache record '{}' to clear", cache.cache_key());
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to clear cache record: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

/// Print the carousel, or the error with a retry hint
fn render(state: &StoryState) -> ExitCode {
    match state {
        StoryState::Loading => {
            println!("Loading...");
            ExitCode::SUCCESS
        }
        StoryState::Ready {
            images,
            current_index,
        } => {
            if images.is_empty() {
                println!("No banners cached");
                return ExitCode::SUCCESS;
            }
            for (index, image) in images.iter().enumerate() {
                let marker = if index == *current_index { ">" } else { " " };
                let location = match image.location() {
                    ImageLocation::Local(_) => "cached",
                    ImageLocation::Remote(_) => "remote",
                };
                println!(
                    "{} {:>2}. {}  [{}] {}",
                    marker,
                    index + 1,
                    image.title,
                    location,
                    image.uri
                );
            }
            let indicator: Vec<&str> = (0..images.len())
                .map(|index| if index == *current_index { "●" } else { "○" })
                .collect();
            println!("{}", indicator.join(" "));
            ExitCode::SUCCESS
        }
        StoryState::Failed { message } => {
            eprintln!("{}", message);
            eprintln!("Run `webtoon_reader refresh` to retry");
            ExitCode::FAILURE
        }
    }
}
