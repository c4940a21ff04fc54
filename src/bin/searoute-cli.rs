use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "searoute-cli")]
#[command(about = "Query CLI for the sea-route segment service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a route between two coordinates
    Route {
        #[arg(long)]
        origin_lat: f64,
        #[arg(long)]
        origin_lng: f64,
        #[arg(long)]
        dest_lat: f64,
        #[arg(long)]
        dest_lng: f64,
        /// kilometers, miles or nauticalmiles
        #[arg(long, default_value = "kilometers")]
        units: String,
    },
    /// Look up the saved segment for an ordered port pair
    Lookup {
        origin_port_id: String,
        destination_port_id: String,
    },
    /// Check service health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Route {
            origin_lat,
            origin_lng,
            dest_lat,
            dest_lng,
            units,
        } => {
            let body = json!({
                "origin": { "lat": origin_lat, "lng": origin_lng },
                "dest": { "lat": dest_lat, "lng": dest_lng },
                "units": units,
            });
            let res = client
                .post(format!("{}/route-generation", cli.url))
                .json(&body)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Lookup {
            origin_port_id,
            destination_port_id,
        } => {
            let res = client
                .get(format!("{}/segment-lookup", cli.url))
                .query(&[
                    ("originPortId", origin_port_id.as_str()),
                    ("destinationPortId", destination_port_id.as_str()),
                ])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
