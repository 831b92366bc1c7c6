//! Heuristic Elliott-Wave-style segmentation of crypto price history.
//!
//! A close-only price series flows through four stages: [`candles`] builds
//! synthetic OHLC bars, [`indicators`] adds price change and RSI, [`waves`]
//! labels the significant moves, and [`interpret`] turns the labels into a
//! trend and recommendation. [`analysis`] chains them; [`provider`],
//! [`chart`] and [`console`] connect the pipeline to CoinGecko, PNG files and
//! the terminal.

pub mod analysis;
pub mod candles;
pub mod chart;
pub mod config;
pub mod console;
pub mod error;
pub mod indicators;
pub mod interpret;
pub mod models;
pub mod provider;
pub mod waves;

pub use error::{Result, WavecountError};
