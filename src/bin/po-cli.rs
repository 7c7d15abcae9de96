use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;
use url::Url;

#[derive(Parser)]
#[command(name = "po-cli")]
#[command(about = "Command line client for a purchase order node", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:10007")]
    url: Url,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show this node's legal name
    Me,
    /// List the node's peers
    Peers,
    /// List purchase orders held in the vault
    PurchaseOrders,
    /// Build a purchase order proposal with a counterparty
    Create {
        /// Legal name of the seller
        party: String,
    },
}

/// `base` with `segments` appended, each percent-encoded as one path segment.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| format!("cannot use {} as a base URL", base))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = match cli.command {
        Commands::Me => client.get(endpoint(&cli.url, &["example", "me"])?).send().await?,
        Commands::Peers => client.get(endpoint(&cli.url, &["example", "peers"])?).send().await?,
        Commands::PurchaseOrders => {
            client
                .get(endpoint(&cli.url, &["example", "purchase-orders"])?)
                .send()
                .await?
        }
        Commands::Create { party } => {
            client
                .put(endpoint(&cli.url, &["example", &party, "create-purchase-order"])?)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: node returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(ExitCode::FAILURE);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(ExitCode::SUCCESS)
}
