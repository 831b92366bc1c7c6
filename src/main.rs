use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;
use wavecount::WavecountError;
use wavecount::chart::PngChart;
use wavecount::config::fetch_config;
use wavecount::console::Console;
use wavecount::provider::CoinGeckoClient;

#[tokio::main]
async fn main() -> Result<(), WavecountError> {
    // Logs go to stderr so they never interleave with the prompts.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let app_config = fetch_config()?;

    let provider = CoinGeckoClient::new(&app_config.coingecko)?;
    let charts = PngChart::new(&app_config.analysis.chart_dir);
    let console = Console::new(provider, charts, &app_config.analysis);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    console.run(stdin, &mut stdout).await
}
