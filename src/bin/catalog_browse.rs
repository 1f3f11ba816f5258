//! Terminal front end for the catalog API
//!
//! Fetches the full product list once, then applies search and sort
//! locally and prints the listing with its footer.

use catalog::prelude::*;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "catalog-browse", about = "Browse the product catalog")]
struct Args {
    /// API base URL (defaults to CATALOG_API_URL or the local server)
    #[arg(long)]
    api_url: Option<String>,

    /// Case-insensitive search over name and description
    #[arg(short, long, default_value = "")]
    search: String,

    /// Sort by price from high to low
    #[arg(long)]
    desc: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = args
        .api_url
        .map(ClientConfig::new)
        .unwrap_or_else(ClientConfig::from_env);
    let client = ProductClient::new(config);

    let mut view = ListingView::new();
    view.set_search_term(args.search);
    if args.desc {
        view.toggle_sort();
    }

    view.load(&client).await;
    print!("{}", view.render());

    if matches!(view.state(), ViewState::Error(_)) {
        std::process::exit(1);
    }
}
