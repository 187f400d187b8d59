use clap::Parser;
use country_stats_lib::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = country_stats_lib::run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
