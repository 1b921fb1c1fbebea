use std::sync::Arc;
use stockalerts_clock::SystemClock;
use stockalerts_runner::{
    AlertsConfig, FeedProcessor, build_emitter, build_evaluator, register_watchlist,
};
use tokio::io::BufReader;

fn print_help() {
    eprintln!(
        r#"Stock Alerts - edge-triggered price threshold alerts

USAGE:
    stockalerts [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --feed <PATH>       Read price updates from file (default: stdin)
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

FEED FORMAT:
    One JSON object per line:
    {{"symbol":"AAPL","price":151.2,"timestamp":"2024-01-02T15:04:05Z"}}

EXAMPLES:
    # Replay a recorded feed
    stockalerts --config alerts.json --feed prices.jsonl

    # Pipe a live feed in
    price-source | stockalerts --config alerts.json
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut feed_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            "--feed" | "-f" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --feed requires a path argument");
                    std::process::exit(1);
                }
                feed_path = Some(args[i].clone());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => {
            log::info!("Loading configuration from: {}", path);
            AlertsConfig::from_file(&path)?
        }
        None => {
            log::info!("Using default configuration");
            AlertsConfig::default()
        }
    };
    config.validate()?;

    log::info!("{}", config.name);
    log::info!(
        "Default direction: {}, notify on clear: {}, emit timeout: {:?}, emitter: {:?}",
        config.default_direction,
        config.notify_on_clear,
        config.emit_timeout(),
        config.emitter
    );

    let clock = SystemClock::shared();
    let evaluator = build_evaluator(&config, clock.clone(), build_emitter(config.emitter));
    let registered = register_watchlist(&evaluator, &config).await?;
    log::info!("Watchlist: {} symbols", registered);

    let evaluator = Arc::new(evaluator);
    let mut processor = FeedProcessor::new(evaluator.clone(), clock);

    let stats = match feed_path {
        Some(path) => {
            log::info!("Reading feed from: {}", path);
            let file = tokio::fs::File::open(&path).await?;
            processor.run(BufReader::new(file)).await?
        }
        None => {
            log::info!("Reading feed from stdin");
            processor.run(BufReader::new(tokio::io::stdin())).await?
        }
    };

    log::info!(
        "Feed done: processed={} breaches={} clears={} dropped={} rejected={} malformed={} emit_failures={}",
        stats.processed,
        stats.breaches,
        stats.clears,
        stats.dropped,
        stats.rejected,
        stats.malformed,
        stats.emit_failures
    );
    for record in evaluator.list().await {
        let price = record
            .current_price()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        log::info!(
            "  {:<8} price={:<12} {} {:<10} active={} breaches={}",
            record.symbol(),
            price,
            record.direction(),
            record.alert_threshold(),
            record.alert_active(),
            record.breach_count()
        );
    }

    Ok(())
}
