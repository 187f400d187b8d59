// ============================================================
// CHART RENDERER
// ============================================================
// Bar and line charts rasterized to PNG with the image crate

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

use crate::domain::chart::{ChartKind, ChartSpec};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::storage::ensure_parent_dir;

mod text;

use text::{draw_text, fit, format_tick, text_length, Orientation, GLYPH};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([40, 40, 40]);
const TEXT: Rgb<u8> = Rgb([20, 20, 20]);
const GRID: Rgb<u8> = Rgb([200, 200, 200]);
const BAR: Rgb<u8> = Rgb([135, 206, 235]);
const LINE: Rgb<u8> = Rgb([0, 128, 0]);

const MARGIN_LEFT: u32 = 90;
const MARGIN_RIGHT: u32 = 30;
const MARGIN_TOP: u32 = 40;
const MARGIN_BOTTOM: u32 = 120;
const GRID_LINES: u32 = 5;
const DASH: u32 = 6;

/// Pixel rectangle the data is drawn into
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: u32,
    right: u32,
    top: u32,
    bottom: u32,
}

impl PlotArea {
    fn width(&self) -> u32 {
        self.right - self.left
    }

    fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

pub struct ChartRenderer {
    output_dir: PathBuf,
    width: u32,
    height: u32,
}

impl ChartRenderer {
    pub fn new(output_dir: &Path, width: u32, height: u32) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            width,
            height,
        }
    }

    /// Parse `kind` then render. An unknown kind is a `ChartError` and
    /// nothing is written.
    pub fn render_chart(
        &self,
        x_values: &[String],
        y_values: &[f64],
        kind: &str,
        title: &str,
        x_label: &str,
        y_label: &str,
    ) -> Result<PathBuf> {
        let kind = kind.parse::<ChartKind>()?;
        self.render(x_values, y_values, &ChartSpec::new(kind, title, x_label, y_label))
    }

    /// Draw the chart and save it as `<output_dir>/<spec.file_name()>`
    pub fn render(&self, x_values: &[String], y_values: &[f64], spec: &ChartSpec) -> Result<PathBuf> {
        validate_series(x_values, y_values)?;

        let area = self.plot_area()?;
        let mut canvas = RgbImage::from_pixel(self.width, self.height, BACKGROUND);

        draw_grid(&mut canvas, area);

        let (low, high) = value_range(y_values);
        let points: Vec<(i64, i64)> = y_values
            .iter()
            .enumerate()
            .map(|(i, v)| (slot_center(area, i, y_values.len()), to_pixel_y(area, *v, low, high)))
            .collect();

        match spec.kind {
            ChartKind::Bar => {
                let slot = area.width() as f64 / y_values.len() as f64;
                let half = ((slot * 0.35).max(1.0)) as i64;
                let baseline = to_pixel_y(area, low.max(0.0), low, high);
                for (x, y) in &points {
                    fill_rect(&mut canvas, x - half, (*y).min(baseline), x + half, (*y).max(baseline), BAR);
                }
            }
            ChartKind::Line => {
                for pair in points.windows(2) {
                    draw_line(&mut canvas, pair[0], pair[1], LINE);
                }
                for (x, y) in &points {
                    fill_rect(&mut canvas, x - 3, y - 3, x + 3, y + 3, LINE);
                }
            }
        }

        draw_axes(&mut canvas, area, points.iter().map(|(x, _)| *x));
        draw_labels(&mut canvas, area, spec);
        draw_value_ticks(&mut canvas, area, low, high);
        draw_category_ticks(&mut canvas, area, x_values, points.iter().map(|(x, _)| *x));

        let path = self.output_dir.join(spec.file_name());
        ensure_parent_dir(&path)?;
        canvas.save(&path).map_err(|e| {
            AppError::ChartError(format!("Failed to save chart {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            kind = %spec.kind,
            title = %spec.title,
            x_label = %spec.x_label,
            y_label = %spec.y_label,
            points = y_values.len(),
            "Chart saved"
        );
        Ok(path)
    }

    fn plot_area(&self) -> Result<PlotArea> {
        if self.width <= MARGIN_LEFT + MARGIN_RIGHT || self.height <= MARGIN_TOP + MARGIN_BOTTOM {
            return Err(AppError::ChartError(format!(
                "Canvas {}x{} is too small",
                self.width, self.height
            )));
        }

        Ok(PlotArea {
            left: MARGIN_LEFT,
            right: self.width - MARGIN_RIGHT,
            top: MARGIN_TOP,
            bottom: self.height - MARGIN_BOTTOM,
        })
    }
}

fn validate_series(x_values: &[String], y_values: &[f64]) -> Result<()> {
    if y_values.is_empty() {
        return Err(AppError::ChartError("No values to plot".to_string()));
    }
    if x_values.len() != y_values.len() {
        return Err(AppError::ChartError(format!(
            "Got {} labels for {} values",
            x_values.len(),
            y_values.len()
        )));
    }
    if let Some(bad) = y_values.iter().find(|v| !v.is_finite()) {
        return Err(AppError::ChartError(format!(
            "Value {} cannot be plotted",
            bad
        )));
    }
    Ok(())
}

/// Value range always includes zero and is never empty
fn value_range(values: &[f64]) -> (f64, f64) {
    let low = values.iter().copied().fold(0.0, f64::min);
    let high = values.iter().copied().fold(0.0, f64::max);
    if high > low {
        (low, high)
    } else {
        (low, low + 1.0)
    }
}

fn slot_center(area: PlotArea, index: usize, count: usize) -> i64 {
    let slot = area.width() as f64 / count as f64;
    (area.left as f64 + slot * (index as f64 + 0.5)) as i64
}

fn to_pixel_y(area: PlotArea, value: f64, low: f64, high: f64) -> i64 {
    let ratio = (value - low) / (high - low);
    (area.bottom as f64 - ratio * area.height() as f64).round() as i64
}

fn put(canvas: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, color);
    }
}

fn fill_rect(canvas: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            put(canvas, x, y, color);
        }
    }
}

/// Bresenham line
fn draw_line(canvas: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put(canvas, x, y, color);
        if x == to.0 && y == to.1 {
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

/// Dashed horizontal guides
fn draw_grid(canvas: &mut RgbImage, area: PlotArea) {
    for step in 1..=GRID_LINES {
        let y = area.bottom - area.height() * step / GRID_LINES;
        for x in area.left..area.right {
            if (x - area.left) / DASH % 2 == 0 {
                put(canvas, x as i64, y as i64, GRID);
            }
        }
    }
}

fn draw_axes(canvas: &mut RgbImage, area: PlotArea, ticks: impl Iterator<Item = i64>) {
    let (left, right, top, bottom) = (
        area.left as i64,
        area.right as i64,
        area.top as i64,
        area.bottom as i64,
    );
    draw_line(canvas, (left, bottom), (right, bottom), AXIS);
    draw_line(canvas, (left, bottom), (left, top), AXIS);
    for x in ticks {
        draw_line(canvas, (x, bottom), (x, bottom + 5), AXIS);
    }
}

/// Title centered above the plot, x label centered below the tick labels,
/// y label rotated along the left edge
fn draw_labels(canvas: &mut RgbImage, area: PlotArea, spec: &ChartSpec) {
    let width = canvas.width();
    let height = canvas.height();

    let scale = if text_length(&spec.title, 2) <= width { 2 } else { 1 };
    let title = fit(&spec.title, width, scale);
    let title_x = width.saturating_sub(text_length(&title, scale)) / 2;
    let title_y = MARGIN_TOP.saturating_sub(GLYPH * scale) / 2;
    draw_text(canvas, title_x as i64, title_y as i64, &title, scale, TEXT, Orientation::Horizontal);

    let x_label = fit(&spec.x_label, width, 1);
    let x_label_x = (area.left + area.width() / 2).saturating_sub(text_length(&x_label, 1) / 2);
    let x_label_y = height - GLYPH - 6;
    draw_text(canvas, x_label_x as i64, x_label_y as i64, &x_label, 1, TEXT, Orientation::Horizontal);

    let y_label = fit(&spec.y_label, area.height(), 1);
    let y_label_y = area.top + area.height() / 2 + text_length(&y_label, 1) / 2;
    draw_text(canvas, 6, y_label_y as i64, &y_label, 1, TEXT, Orientation::Vertical);
}

/// Value labels right-aligned against the y axis, one per grid line plus the base
fn draw_value_ticks(canvas: &mut RgbImage, area: PlotArea, low: f64, high: f64) {
    let room = area.left - 6 - GLYPH - 8;
    for step in 0..=GRID_LINES {
        let value = low + (high - low) * step as f64 / GRID_LINES as f64;
        let label = fit(&format_tick(value), room, 1);
        let y = area.bottom - area.height() * step / GRID_LINES;
        let x = area.left.saturating_sub(6 + text_length(&label, 1));
        draw_text(canvas, x as i64, y as i64 - 4, &label, 1, TEXT, Orientation::Horizontal);
    }
}

/// Category names rotated under each tick, reading upward toward the axis
fn draw_category_ticks(
    canvas: &mut RgbImage,
    area: PlotArea,
    labels: &[String],
    ticks: impl Iterator<Item = i64>,
) {
    let top = area.bottom + 8;
    let room = canvas.height().saturating_sub(top + GLYPH + 12);
    for (label, x) in labels.iter().zip(ticks) {
        let label = fit(label, room, 1);
        let anchor = top + text_length(&label, 1);
        draw_text(canvas, x - 4, anchor as i64, &label, 1, TEXT, Orientation::Vertical);
    }
}
