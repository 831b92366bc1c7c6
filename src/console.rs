//! Interactive prompt loop.
//!
//! Reads asset names line by line, runs an analysis for each and prints the
//! report. A failed analysis is reported and the loop carries on; only the
//! `quit` command or the end of input stops it.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;

use futures_util::FutureExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{error, info, warn};

use crate::Result;
use crate::analysis::{self, Analysis};
use crate::chart::ChartSink;
use crate::config::AnalysisConfig;
use crate::interpret::capitalize;
use crate::provider::PriceHistory;

/// Typing this at the asset prompt ends the session.
pub const EXIT_COMMAND: &str = "quit";

/// Suggestions shown when the session starts.
pub const POPULAR_ASSETS: &[&str] = &[
    "bitcoin",
    "ethereum",
    "cardano",
    "solana",
    "ripple",
    "dogecoin",
    "polkadot",
    "chainlink",
    "vechain",
    "stellar",
    "velodrome-finance",
];

const ASSET_PROMPT: &str = "\nEnter the cryptocurrency name (or 'quit' to exit): ";
const CHART_PROMPT: &str = "\nView wave visualization? (yes/no): ";

/// Result of analysing one asset.
#[derive(Debug, Clone)]
pub struct Report {
    pub analysis: Analysis,
    pub chart: PathBuf,
}

/// Console session wiring a price source and a chart sink together.
pub struct Console<P, C> {
    provider: P,
    charts: C,
    quote_currency: String,
    days: u32,
}

impl<P: PriceHistory, C: ChartSink> Console<P, C> {
    pub fn new(provider: P, charts: C, settings: &AnalysisConfig) -> Self {
        Self {
            provider,
            charts,
            quote_currency: settings.quote_currency.clone(),
            days: settings.days,
        }
    }

    /// Consumes the session and hands back its collaborators.
    pub fn into_parts(self) -> (P, C) {
        (self.provider, self.charts)
    }

    /// Fetches, analyses and charts one asset.
    ///
    /// # Errors
    ///
    /// Propagates retrieval, data and rendering errors.
    pub async fn analyze(&self, asset: &str) -> Result<Report> {
        let points = self
            .provider
            .fetch_history(asset, &self.quote_currency, self.days)
            .await?;
        let analysis = analysis::analyze(asset, &points)?;
        let chart = self
            .charts
            .render(asset, &analysis.rows, &analysis.waves)?;
        Ok(Report { analysis, chart })
    }

    /// Runs the prompt loop until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns [`WavecountError::Io`](crate::WavecountError::Io) if reading
    /// the input or writing the output fails. Analysis errors are printed,
    /// never returned.
    pub async fn run<R, W>(&self, input: R, output: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        write_out(output, &banner()).await?;

        loop {
            write_out(output, ASSET_PROMPT).await?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            let asset = line.trim().to_lowercase();
            if asset == EXIT_COMMAND {
                break;
            }
            if asset.is_empty() {
                continue;
            }

            info!(asset = %asset, "starting analysis");
            let outcome = AssertUnwindSafe(self.analyze(&asset)).catch_unwind().await;
            let report = match outcome {
                Ok(Ok(report)) => report,
                Ok(Err(e)) => {
                    warn!(asset = %asset, error = %e, "analysis failed");
                    write_out(output, &format!("\nError analysing {asset}: {e}\n")).await?;
                    continue;
                }
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    error!(asset = %asset, message, "analysis panicked");
                    write_out(output, &format!("\nUnexpected error occurred: {message}\n")).await?;
                    continue;
                }
            };

            write_out(output, &report.analysis.explain()).await?;

            write_out(output, CHART_PROMPT).await?;
            let Some(answer) = lines.next_line().await? else {
                break;
            };
            if answer.trim().eq_ignore_ascii_case("yes") {
                let path = report.chart.display();
                write_out(
                    output,
                    &format!(
                        "\nWave visualization saved as {path}\n\
                         To view the plot, use the command:\n\
                         open {path}\n"
                    ),
                )
                .await?;
            }
        }

        info!("session ended");
        Ok(())
    }
}

/// The greeting listing suggested assets.
fn banner() -> String {
    let names: Vec<String> = POPULAR_ASSETS.iter().map(|a| capitalize(a)).collect();
    format!("Popular Cryptocurrencies:\n{}\n", names.join(", "))
}

async fn write_out<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_lists_capitalised_assets() {
        let text = banner();
        assert!(text.starts_with("Popular Cryptocurrencies:\n"));
        assert!(text.contains("Bitcoin, Ethereum"));
        assert!(text.contains("Velodrome-finance"));
    }

    #[test]
    fn panic_message_from_str_and_string() {
        let boxed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(boxed.as_ref()), "bang");
        let boxed: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }
}
