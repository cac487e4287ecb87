//! Minimal PNG chart rasteriser
//!
//! Draws bars, lines and scatter points on a white canvas with a plain
//! pair of axes. Labels are not drawn; the title and the values travel in
//! the chart summary instead.

use image::{ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;
use wizard_domain::{CHART_EXTENSION, ChartData, ChartKind, ChartSeries};

const DEFAULT_WIDTH: u32 = 640;
const DEFAULT_HEIGHT: u32 = 480;
const MIN_SIDE: u32 = 120;
const MARGIN: u32 = 40;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([64, 64, 64]);
const SERIES: Rgb<u8> = Rgb([31, 119, 180]);

#[derive(Debug, Error)]
pub enum ChartRenderError {
    #[error("chart has no data to draw")]
    Empty,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Writes charts as `<uuid>.png` into one directory.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    dir: PathBuf,
    width: u32,
    height: u32,
}

impl ChartRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(MIN_SIDE);
        self.height = height.max(MIN_SIDE);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Draw `chart` and return the path of the new PNG file.
    pub fn render(&self, chart: &ChartData) -> Result<PathBuf, ChartRenderError> {
        if chart.series.is_empty() {
            return Err(ChartRenderError::Empty);
        }

        let mut img = RgbImage::from_pixel(self.width, self.height, BACKGROUND);
        match (&chart.series, chart.kind) {
            (ChartSeries::Categories { values, .. }, ChartKind::Line) => {
                draw_category_line(&mut img, values)
            }
            (ChartSeries::Categories { values, .. }, _) => draw_bars(&mut img, values),
            (ChartSeries::Points(points), ChartKind::Line) => {
                let mut sorted = points.clone();
                sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
                draw_points(&mut img, &sorted, true)
            }
            (ChartSeries::Points(points), _) => draw_points(&mut img, points, false),
        }
        draw_axes(&mut img);

        std::fs::create_dir_all(&self.dir)?;
        let path = self
            .dir
            .join(format!("{}{}", Uuid::new_v4(), CHART_EXTENSION));
        img.save_with_format(&path, ImageFormat::Png)?;

        debug!(
            "Rendered {} chart '{}' ({} values) to {}",
            chart.kind.as_str(),
            chart.title,
            chart.series.len(),
            path.display()
        );
        Ok(path)
    }
}

/// Plot area in pixel space plus the value ranges mapped onto it
struct Frame {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl Frame {
    fn new(img: &RgbImage, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            left: MARGIN as f64,
            right: (img.width() - MARGIN) as f64,
            top: MARGIN as f64,
            bottom: (img.height() - MARGIN) as f64,
            x_range,
            y_range,
        }
    }

    fn x(&self, v: f64) -> f64 {
        let (lo, hi) = self.x_range;
        self.left + (v - lo) / (hi - lo) * (self.right - self.left)
    }

    fn y(&self, v: f64) -> f64 {
        let (lo, hi) = self.y_range;
        self.bottom - (v - lo) / (hi - lo) * (self.bottom - self.top)
    }

    /// Center of the i-th of n equal category slots
    fn slot_center(&self, i: usize, n: usize) -> f64 {
        self.left + self.slot_width(n) * (i as f64 + 0.5)
    }

    fn slot_width(&self, n: usize) -> f64 {
        (self.right - self.left) / n as f64
    }
}

/// Smallest and largest value, widened so the range is never empty.
fn value_range(values: impl Iterator<Item = f64>, include_zero: bool) -> (f64, f64) {
    let (mut lo, mut hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    if hi - lo < f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    (lo, hi)
}

fn draw_bars(img: &mut RgbImage, values: &[f64]) {
    let y_range = value_range(values.iter().copied(), true);
    let frame = Frame::new(img, (0.0, 1.0), y_range);
    let half = (frame.slot_width(values.len()) * 0.35).max(0.5);
    let baseline = frame.y(0.0);

    for (i, value) in values.iter().enumerate() {
        let center = frame.slot_center(i, values.len());
        let top = frame.y(*value);
        fill_rect(
            img,
            (center - half, top.min(baseline)),
            (center + half, top.max(baseline)),
            SERIES,
        );
    }
}

fn draw_category_line(img: &mut RgbImage, values: &[f64]) {
    let y_range = value_range(values.iter().copied(), false);
    let frame = Frame::new(img, (0.0, 1.0), y_range);
    let pixels: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (frame.slot_center(i, values.len()), frame.y(*v)))
        .collect();
    stroke(img, &pixels);
}

fn draw_points(img: &mut RgbImage, points: &[(f64, f64)], connect: bool) {
    let x_range = value_range(points.iter().map(|p| p.0), false);
    let y_range = value_range(points.iter().map(|p| p.1), false);
    let frame = Frame::new(img, x_range, y_range);
    let pixels: Vec<(f64, f64)> = points
        .iter()
        .map(|(x, y)| (frame.x(*x), frame.y(*y)))
        .collect();

    if connect {
        stroke(img, &pixels);
    } else {
        for (x, y) in pixels {
            fill_rect(img, (x - 2.0, y - 2.0), (x + 2.0, y + 2.0), SERIES);
        }
    }
}

/// Polyline with a small marker on every vertex
fn stroke(img: &mut RgbImage, pixels: &[(f64, f64)]) {
    for pair in pixels.windows(2) {
        draw_line(img, pair[0], pair[1], SERIES);
    }
    for &(x, y) in pixels {
        fill_rect(img, (x - 1.0, y - 1.0), (x + 1.0, y + 1.0), SERIES);
    }
}

fn draw_axes(img: &mut RgbImage) {
    let left = MARGIN as f64;
    let bottom = (img.height() - MARGIN) as f64;
    let right = (img.width() - MARGIN) as f64;
    draw_line(img, (left, MARGIN as f64), (left, bottom), AXIS);
    draw_line(img, (left, bottom), (right, bottom), AXIS);
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

fn fill_rect(img: &mut RgbImage, from: (f64, f64), to: (f64, f64), color: Rgb<u8>) {
    let (x0, x1) = (from.0.round() as i64, to.0.round() as i64);
    let (y0, y1) = (from.1.round() as i64, to.1.round() as i64);
    for x in x0.min(x1)..=x0.max(x1) {
        for y in y0.min(y1)..=y0.max(y1) {
            put(img, x, y, color);
        }
    }
}

/// Bresenham
fn draw_line(img: &mut RgbImage, from: (f64, f64), to: (f64, f64), color: Rgb<u8>) {
    let (mut x0, mut y0) = (from.0.round() as i64, from.1.round() as i64);
    let (x1, y1) = (to.0.round() as i64, to.1.round() as i64);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put(img, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
