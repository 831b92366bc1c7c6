//! PNG rendering of an analysis.
//!
//! The chart has two panels. The upper one plots the close price with each
//! wave shaded green (impulse) or red (corrective), darker for stronger
//! waves, and the wave label written above the middle of each wave. The lower one plots
//! RSI with the 70 and 30 guide lines.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use tracing::info;

use crate::Result;
use crate::indicators::IndicatorRow;
use crate::waves::{Magnitude, WaveKind, WaveSet};

/// Common colour definitions.
pub mod colors {
    use image::Rgb;

    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    pub const LIGHT_GRAY: Rgb<u8> = Rgb([200, 200, 200]);
    pub const GREEN: Rgb<u8> = Rgb([0, 160, 60]);
    pub const RED: Rgb<u8> = Rgb([220, 40, 40]);
    pub const BLUE: Rgb<u8> = Rgb([31, 119, 180]);
    pub const PURPLE: Rgb<u8> = Rgb([128, 0, 128]);
}

/// RSI level above which an asset is considered overbought.
const OVERBOUGHT: f64 = 70.0;
/// RSI level below which an asset is considered oversold.
const OVERSOLD: f64 = 30.0;

/// Destination for rendered charts.
pub trait ChartSink {
    /// Renders the chart for `asset` and returns where it was written.
    ///
    /// # Errors
    ///
    /// Returns [`WavecountError::ChartDir`](crate::WavecountError::ChartDir)
    /// if the output directory cannot be created and
    /// [`WavecountError::Image`](crate::WavecountError::Image) if the image
    /// cannot be written.
    fn render(&self, asset: &str, rows: &[IndicatorRow], waves: &WaveSet) -> Result<PathBuf>;
}

/// File name used for an asset's chart.
pub fn chart_file_name(asset: &str) -> String {
    format!("{}_elliot_waves.png", asset.to_lowercase())
}

/// Image layout.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub background: Rgb<u8>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 800,
            margin: 40,
            background: colors::WHITE,
        }
    }
}

/// Writes PNG charts into a directory.
#[derive(Debug, Clone)]
pub struct PngChart {
    dir: PathBuf,
    config: ChartConfig,
}

impl PngChart {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            config: ChartConfig::default(),
        }
    }

    pub fn with_config(dir: impl Into<PathBuf>, config: ChartConfig) -> Self {
        Self {
            dir: dir.into(),
            config,
        }
    }

    /// Where the chart for `asset` is written. A `.` directory yields the
    /// bare file name.
    pub fn output_path(&self, asset: &str) -> PathBuf {
        let file = chart_file_name(asset);
        if self.dir.as_os_str().is_empty() || self.dir == Path::new(".") {
            PathBuf::from(file)
        } else {
            self.dir.join(file)
        }
    }

    /// Draws the chart without writing it.
    pub fn draw(&self, rows: &[IndicatorRow], waves: &WaveSet) -> RgbImage {
        let cfg = &self.config;
        let mut img = RgbImage::from_pixel(cfg.width, cfg.height, cfg.background);

        let half = cfg.height / 2;
        let price_bottom = half.saturating_sub(cfg.margin / 2);
        let price_panel = Panel::new(cfg.margin, cfg.margin, cfg.width, price_bottom);
        let rsi_panel = Panel::new(cfg.margin, half + cfg.margin / 2, cfg.width, cfg.height);

        let closes: Vec<f64> = rows.iter().map(|r| r.candle.close).collect();
        let (lo, hi) = bounds(closes.iter().copied());
        let len = rows.len();

        for wave in waves.segments() {
            let start = wave.start_index.min(len.saturating_sub(1));
            let end = wave.end_index.min(len.saturating_sub(1));
            let color = match wave.kind {
                WaveKind::Impulse => colors::GREEN,
                WaveKind::Corrective => colors::RED,
            };
            let alpha = match wave.magnitude {
                Magnitude::Minor => 0.1,
                Magnitude::Significant => 0.3,
                Magnitude::Major => 0.5,
            };
            let shade = blend(cfg.background, color, alpha);
            let x0 = price_panel.x(start, len);
            let x1 = price_panel.x(end, len);
            let (top, bottom) = (price_panel.top, price_panel.bottom);
            fill_rect(&mut img, x0, top, x1.max(x0 + 1), bottom, shade);

            let mid = (start + end) / 2;
            if let Some(&close) = closes.get(mid) {
                let (mx, my) = (price_panel.x(mid, len), price_panel.y(close, lo, hi));
                draw_label(&mut img, &wave.label, mx, my.saturating_sub(3), colors::BLACK);
            }
        }

        price_panel.frame(&mut img);
        let price_series = closes.iter().map(|&c| Some(c));
        plot_series(&mut img, &price_panel, price_series, len, lo, hi, colors::BLUE);

        rsi_panel.frame(&mut img);
        for (level, color) in [(OVERBOUGHT, colors::RED), (OVERSOLD, colors::GREEN)] {
            let y = rsi_panel.y(level, 0.0, 100.0);
            dashed_hline(&mut img, y, rsi_panel.left, rsi_panel.right, color);
        }
        let rsi_series = rows.iter().map(|r| r.rsi);
        plot_series(&mut img, &rsi_panel, rsi_series, len, 0.0, 100.0, colors::PURPLE);

        img
    }
}

impl ChartSink for PngChart {
    fn render(&self, asset: &str, rows: &[IndicatorRow], waves: &WaveSet) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|source| crate::WavecountError::ChartDir {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.output_path(asset);
        self.draw(rows, waves).save(&path)?;
        info!(path = %path.display(), "wrote chart");
        Ok(path)
    }
}

/// A rectangular plotting area in pixel coordinates.
struct Panel {
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
}

impl Panel {
    /// `right`/`bottom` are outer edges; the margin is taken off them.
    fn new(margin: u32, top: u32, outer_right: u32, outer_bottom: u32) -> Self {
        Self {
            left: margin,
            top,
            right: outer_right.saturating_sub(margin).max(margin + 1),
            bottom: outer_bottom.saturating_sub(margin).max(top + 1),
        }
    }

    fn x(&self, index: usize, len: usize) -> u32 {
        if len < 2 {
            return self.left;
        }
        let t = index as f64 / (len - 1) as f64;
        self.left + (t * f64::from(self.right - self.left)).round() as u32
    }

    fn y(&self, value: f64, lo: f64, hi: f64) -> u32 {
        let t = if hi > lo { ((value - lo) / (hi - lo)).clamp(0.0, 1.0) } else { 0.5 };
        self.bottom - (t * f64::from(self.bottom - self.top)).round() as u32
    }

    fn frame(&self, img: &mut RgbImage) {
        hline(img, self.top, self.left, self.right, colors::LIGHT_GRAY);
        hline(img, self.bottom, self.left, self.right, colors::LIGHT_GRAY);
        vline(img, self.left, self.top, self.bottom, colors::LIGHT_GRAY);
        vline(img, self.right, self.top, self.bottom, colors::LIGHT_GRAY);
    }
}

/// Min and max of the finite values, or `(0, 1)` if there are none.
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo.is_finite() { (lo, hi) } else { (0.0, 1.0) }
}

/// Draws a polyline through the defined values; gaps break the line.
fn plot_series(
    img: &mut RgbImage,
    panel: &Panel,
    values: impl Iterator<Item = Option<f64>>,
    len: usize,
    lo: f64,
    hi: f64,
    color: Rgb<u8>,
) {
    let mut prev: Option<(u32, u32)> = None;
    for (i, value) in values.enumerate() {
        let point = value
            .filter(|v| v.is_finite())
            .map(|v| (panel.x(i, len), panel.y(v, lo, hi)));
        match (prev, point) {
            (Some(a), Some(b)) => line(img, a, b, color),
            (None, Some(b)) => put(img, b.0, b.1, color),
            _ => {}
        }
        prev = point;
    }
}

/// Mixes `fg` over `bg` with opacity `alpha`.
fn blend(bg: Rgb<u8>, fg: Rgb<u8>, alpha: f64) -> Rgb<u8> {
    let a = alpha.clamp(0.0, 1.0);
    let mix = |b: u8, f: u8| ((1.0 - a) * f64::from(b) + a * f64::from(f)).round() as u8;
    Rgb([mix(bg.0[0], fg.0[0]), mix(bg.0[1], fg.0[1]), mix(bg.0[2], fg.0[2])])
}

fn put(img: &mut RgbImage, x: u32, y: u32, color: Rgb<u8>) {
    if x < img.width() && y < img.height() {
        img.put_pixel(x, y, color);
    }
}

/// Fills `[x0, x1) x [y0, y1)`, clipped to the image.
fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

fn hline(img: &mut RgbImage, y: u32, x0: u32, x1: u32, color: Rgb<u8>) {
    for x in x0..=x1 {
        put(img, x, y, color);
    }
}

fn dashed_hline(img: &mut RgbImage, y: u32, x0: u32, x1: u32, color: Rgb<u8>) {
    for x in (x0..=x1).filter(|x| (x - x0) % 12 < 7) {
        put(img, x, y, color);
    }
}

fn vline(img: &mut RgbImage, x: u32, y0: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..=y1 {
        put(img, x, y, color);
    }
}

/// Pixel size of one glyph cell.
const GLYPH_SCALE: u32 = 2;

/// 3x5 bitmap for the characters wave labels use, one row per byte with
/// bit 2 as the leftmost column. Letters are drawn upper-case.
fn glyph(c: char) -> Option<[u8; 5]> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b110, 0b001, 0b010, 0b100, 0b111],
        '3' => [0b110, 0b001, 0b010, 0b001, 0b110],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b110, 0b001, 0b110],
        _ => return None,
    };
    Some(rows)
}

/// Writes `text` centred on `cx` with its baseline at `bottom`. Characters
/// without a glyph leave a blank cell.
fn draw_label(img: &mut RgbImage, text: &str, cx: u32, bottom: u32, color: Rgb<u8>) {
    let advance = 4 * GLYPH_SCALE;
    let width = text.chars().count() as u32 * advance;
    let left = cx.saturating_sub(width / 2);
    let top = bottom.saturating_sub(5 * GLYPH_SCALE);

    for (n, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else {
            continue;
        };
        let gx = left + n as u32 * advance;
        for (r, bits) in (0u32..).zip(rows) {
            for col in (0..3u32).filter(|&col| bits & (0b100 >> col) != 0) {
                let (x, y) = (gx + col * GLYPH_SCALE, top + r * GLYPH_SCALE);
                fill_rect(img, x, y, x + GLYPH_SCALE, y + GLYPH_SCALE, color);
            }
        }
    }
}

/// Bresenham line between two points.
fn line(img: &mut RgbImage, (x0, y0): (u32, u32), (x1, y1): (u32, u32), color: Rgb<u8>) {
    let (mut x, mut y) = (i64::from(x0), i64::from(y0));
    let (x1, y1) = (i64::from(x1), i64::from(y1));
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put(img, x as u32, y as u32, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
