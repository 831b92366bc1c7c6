//! Trend and recommendation derived from a [`WaveSet`].
//!
//! # Known quirk
//!
//! The trend is [`Trend::Bullish`] whenever at least one impulse wave was
//! found anywhere in the series, and [`Trend::Bearish`] only when there are
//! none. It does not look at the direction of the most recent wave, so a
//! series that ends in a long correction still reads bullish. The
//! recommendation table depends on this behaviour.

use std::fmt;

use crate::waves::{WaveKind, WaveSet};

/// Market direction reported alongside the recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Bullish,
    Bearish,
}

impl Trend {
    /// Bullish iff the set contains any impulse wave (see the module docs).
    pub fn from_waves(waves: &WaveSet) -> Self {
        match waves.impulses().last() {
            Some(last) if last.kind == WaveKind::Impulse => Self::Bullish,
            _ => Self::Bearish,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bullish => "Bullish",
            Self::Bearish => "Bearish",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Investment recommendation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    StrongBuy,
    ModerateBuy,
    HoldCaution,
    Neutral,
}

impl Recommendation {
    /// Applies the recommendation table. The first matching rule wins.
    pub fn decide(impulse_count: usize, corrective_count: usize, trend: Trend) -> Self {
        if impulse_count > corrective_count && trend == Trend::Bullish {
            Self::StrongBuy
        } else if impulse_count > corrective_count {
            Self::ModerateBuy
        } else if corrective_count > impulse_count {
            Self::HoldCaution
        } else {
            Self::Neutral
        }
    }

    /// Display label, e.g. `STRONG BUY`.
    pub fn label(self) -> &'static str {
        match self {
            Self::StrongBuy => "STRONG BUY",
            Self::ModerateBuy => "MODERATE BUY",
            Self::HoldCaution => "HOLD/CAUTION",
            Self::Neutral => "NEUTRAL",
        }
    }

    /// One-sentence justification shown with the label.
    pub fn reason(self) -> &'static str {
        match self {
            Self::StrongBuy => "The current wave pattern suggests a strong upward momentum.",
            Self::ModerateBuy => "The wave pattern indicates potential growth.",
            Self::HoldCaution => {
                "The market shows more corrective patterns, suggesting potential volatility."
            }
            Self::Neutral => "The wave patterns are relatively balanced.",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Summary of one analysis run, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub total_waves: usize,
    pub impulse_count: usize,
    pub corrective_count: usize,
    pub trend: Trend,
    pub current_price: f64,
    pub recommendation: Recommendation,
}

impl Interpretation {
    /// Interprets `waves` given the latest close.
    pub fn new(waves: &WaveSet, current_price: f64) -> Self {
        let impulse_count = waves.impulse_count();
        let corrective_count = waves.corrective_count();
        let trend = Trend::from_waves(waves);
        Self {
            total_waves: waves.len(),
            impulse_count,
            corrective_count,
            trend,
            current_price,
            recommendation: Recommendation::decide(impulse_count, corrective_count, trend),
        }
    }

    /// Plain-language report for `asset`.
    pub fn explain(&self, asset: &str) -> String {
        format!(
            "\nElliot Wave Analysis for {asset}:\n\
             \n\
             Wave Pattern Overview:\n\
             - Total Waves Detected: {total}\n\
             - Impulse Waves: {impulse}\n\
             - Corrective Waves: {corrective}\n\
             - Current Market Trend: {trend}\n\
             \n\
             Current Price: ${price:.2}\n\
             \n\
             Investment Recommendation: {label}\n\
             Reason: {reason}\n\
             \n\
             Elliot Wave Explanation:\n\
             {glossary}\n",
            asset = capitalize(asset),
            total = self.total_waves,
            impulse = self.impulse_count,
            corrective = self.corrective_count,
            trend = self.trend,
            price = self.current_price,
            label = self.recommendation.label(),
            reason = self.recommendation.reason(),
            glossary = GLOSSARY,
        )
    }
}

const GLOSSARY: &str = "\
Imagine the market as a series of waves. Impulse waves (green) represent strong price movements
in the main trend direction, while corrective waves (red) are smaller movements against the trend.
More impulse waves suggest a stronger market direction.";

/// Upper-cases the first character and lower-cases the rest.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
