//! Wave classification.
//!
//! Scans a percentage-change sequence and turns every move larger than the
//! minor threshold into a labelled [`WaveSegment`]. Consecutive segments of
//! the same kind count up (`Impulse 1`, `Impulse 2`, ... / `Correction A`,
//! `Correction B`, ...); a change of kind restarts the count. Moves below the
//! threshold emit nothing and leave the count untouched.
//!
//! This is a threshold heuristic. It does not check Elliott Wave rules such
//! as overlap constraints or Fibonacci ratios.

use std::fmt;

/// Moves at or below this fraction are ignored.
pub const MINOR_THRESHOLD: f64 = 0.02;
/// Moves strictly above this fraction are at least [`Magnitude::Significant`].
pub const SIGNIFICANT_THRESHOLD: f64 = 0.05;
/// Moves strictly above this fraction are [`Magnitude::Major`].
pub const MAJOR_THRESHOLD: f64 = 0.10;

/// Direction of a wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaveKind {
    /// Upward move.
    Impulse,
    /// Downward move.
    Corrective,
}

/// Label progression for one wave kind.
struct LabelScheme {
    /// Highest run position that still gets its own label.
    last_numbered: u32,
    numbered: fn(u32) -> String,
    extended: &'static str,
}

static IMPULSE_LABELS: LabelScheme = LabelScheme {
    last_numbered: 5,
    numbered: impulse_label,
    extended: "Impulse Ext",
};

static CORRECTIVE_LABELS: LabelScheme = LabelScheme {
    last_numbered: 3,
    numbered: corrective_label,
    extended: "Correction Ext",
};

fn impulse_label(run: u32) -> String {
    format!("Impulse {run}")
}

/// 1 -> A, 2 -> B, 3 -> C.
fn corrective_label(run: u32) -> String {
    format!("Correction {}", char::from(b'@' + run as u8))
}

impl WaveKind {
    /// Positive changes are impulses, everything else corrective.
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Self::Impulse
        } else {
            Self::Corrective
        }
    }

    fn labels(self) -> &'static LabelScheme {
        match self {
            Self::Impulse => &IMPULSE_LABELS,
            Self::Corrective => &CORRECTIVE_LABELS,
        }
    }

    /// Label for the `run`-th consecutive wave of this kind (1-based).
    pub fn label(self, run: u32) -> String {
        let scheme = self.labels();
        if (1..=scheme.last_numbered).contains(&run) {
            (scheme.numbered)(run)
        } else {
            scheme.extended.to_string()
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Impulse => "impulse",
            Self::Corrective => "corrective",
        }
    }
}

impl fmt::Display for WaveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strength tier of a wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Magnitude {
    Minor,
    Significant,
    Major,
}

impl Magnitude {
    /// Returns the highest tier whose threshold `change` strictly exceeds.
    ///
    /// Each threshold is checked in turn and upgrades the tier, so a change
    /// of exactly 5% stays [`Magnitude::Minor`].
    pub fn classify(change: f64) -> Self {
        let size = change.abs();
        let mut magnitude = Self::Minor;
        if size > SIGNIFICANT_THRESHOLD {
            magnitude = Self::Significant;
        }
        if size > MAJOR_THRESHOLD {
            magnitude = Self::Major;
        }
        magnitude
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Significant => "significant",
            Self::Major => "major",
        }
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single labelled move between two adjacent rows.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveSegment {
    pub kind: WaveKind,
    pub magnitude: Magnitude,
    pub start_index: usize,
    pub end_index: usize,
    /// Change in percent (`0.05` becomes `5.0`).
    pub percentage_change: f64,
    pub label: String,
}

/// All segments found in one scan, in scan order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveSet {
    segments: Vec<WaveSegment>,
}

impl WaveSet {
    pub fn segments(&self) -> &[WaveSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Segments of one kind, in scan order.
    pub fn of_kind(&self, kind: WaveKind) -> impl Iterator<Item = &WaveSegment> {
        self.segments.iter().filter(move |s| s.kind == kind)
    }

    pub fn impulses(&self) -> impl Iterator<Item = &WaveSegment> {
        self.of_kind(WaveKind::Impulse)
    }

    pub fn correctives(&self) -> impl Iterator<Item = &WaveSegment> {
        self.of_kind(WaveKind::Corrective)
    }

    pub fn impulse_count(&self) -> usize {
        self.impulses().count()
    }

    pub fn corrective_count(&self) -> usize {
        self.correctives().count()
    }

    /// Labels of all segments, in scan order.
    pub fn labels(&self) -> Vec<&str> {
        self.segments.iter().map(|s| s.label.as_str()).collect()
    }
}

/// Running state of one scan.
#[derive(Debug, Default)]
struct ScanState {
    current: Option<WaveKind>,
    run: u32,
}

impl ScanState {
    /// Advances the run counter for a wave of `kind` and returns its position.
    fn advance(&mut self, kind: WaveKind) -> u32 {
        if self.current == Some(kind) {
            self.run = self.run.saturating_add(1);
        } else {
            self.current = Some(kind);
            self.run = 1;
        }
        self.run
    }
}

/// Classifies a percentage-change sequence into waves.
///
/// Element 0 is never classified; `None` and NaN entries are skipped like
/// below-threshold moves. An infinite change (a move off a zero close) is a
/// major wave in its direction. A segment triggered at index `i` spans
/// `i - 1..=i`.
pub fn classify(pct_changes: &[Option<f64>]) -> WaveSet {
    let mut state = ScanState::default();
    let mut segments = Vec::new();

    for (i, change) in pct_changes.iter().enumerate().skip(1) {
        let Some(change) = *change else {
            continue;
        };
        if change.is_nan() || change.abs() <= MINOR_THRESHOLD {
            continue;
        }

        let kind = WaveKind::from_change(change);
        let run = state.advance(kind);
        segments.push(WaveSegment {
            kind,
            magnitude: Magnitude::classify(change),
            start_index: i - 1,
            end_index: i,
            percentage_change: change * 100.0,
            label: kind.label(run),
        });
    }

    WaveSet { segments }
}
