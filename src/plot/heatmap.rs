//! Heatmap rendering with plotters.
//!
//! Draws the filtered frequency table as a grid of colored cells: one row
//! per interaction (in table order), one column per input file. Cell
//! color runs on a white-to-blue ramp scaled to the largest value in the
//! matrix, with an optional numeric annotation per cell and a colorbar on
//! the right.

use crate::error::FingerprintError;
use crate::plot::cluster;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Rendering knobs, resolved from CLI flags and the config file.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    /// Reorder columns by hierarchical clustering.
    pub cluster_columns: bool,
    /// Write each cell's value into the cell.
    pub annotate: bool,
    /// Edge length of one cell in pixels.
    pub cell_size: u32,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            cluster_columns: false,
            annotate: true,
            cell_size: 64,
        }
    }
}

/// Fixed layout margins, in pixels.
const ROW_LABEL_WIDTH: u32 = 220;
const COL_LABEL_HEIGHT: u32 = 48;
const COLORBAR_WIDTH: u32 = 24;
const COLORBAR_GAP: u32 = 40;
const MARGIN: u32 = 12;

/// The heatmap layout resolved for one matrix.
pub(super) struct Layout {
    pub width: u32,
    pub height: u32,
    cell: u32,
    rows: usize,
    cols: usize,
}

impl Layout {
    pub(super) fn for_matrix(rows: usize, cols: usize, cell: u32) -> Self {
        let width = MARGIN * 2 + ROW_LABEL_WIDTH + cols as u32 * cell + COLORBAR_GAP + COLORBAR_WIDTH;
        let height = MARGIN * 2 + rows as u32 * cell + COL_LABEL_HEIGHT;
        Self {
            width,
            height,
            cell,
            rows,
            cols,
        }
    }

    fn cell_rect(&self, row: usize, col: usize) -> [(i32, i32); 2] {
        let x0 = (MARGIN + ROW_LABEL_WIDTH + col as u32 * self.cell) as i32;
        let y0 = (MARGIN + row as u32 * self.cell) as i32;
        [(x0, y0), (x0 + self.cell as i32, y0 + self.cell as i32)]
    }

    fn colorbar_x(&self) -> i32 {
        (MARGIN + ROW_LABEL_WIDTH + self.cols as u32 * self.cell + COLORBAR_GAP) as i32
    }

    fn grid_height(&self) -> i32 {
        (self.rows as u32 * self.cell) as i32
    }
}

/// Prepare the matrix, row labels, and column labels, applying the
/// optional column clustering.
pub(super) fn prepare(
    matrix: Vec<Vec<f64>>,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    cluster_columns: bool,
) -> (Vec<Vec<f64>>, Vec<String>, Vec<String>) {
    if !cluster_columns {
        return (matrix, row_labels, col_labels);
    }
    let order = cluster::column_order(&matrix);
    let (matrix, col_labels) = cluster::permute_columns(&matrix, &col_labels, &order);
    (matrix, row_labels, col_labels)
}

/// Draw the full heatmap onto a drawing area.
pub(super) fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    matrix: &[Vec<f64>],
    row_labels: &[String],
    col_labels: &[String],
    layout: &Layout,
    annotate: bool,
) -> Result<(), FingerprintError> {
    root.fill(&WHITE).map_err(render_err)?;

    let max_value = matrix
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0f64, |a, &b| a.max(b));

    // Cells.
    for (row_idx, row) in matrix.iter().enumerate() {
        for (col_idx, &value) in row.iter().enumerate() {
            let t = normalized(value, max_value);
            let rect = layout.cell_rect(row_idx, col_idx);
            root.draw(&Rectangle::new(rect, blues_ramp(t).filled()))
                .map_err(render_err)?;
            root.draw(&Rectangle::new(rect, RGBColor(200, 200, 200).stroke_width(1)))
                .map_err(render_err)?;

            if annotate {
                let text_color = if t > 0.5 { &WHITE } else { &BLACK };
                let [(x0, y0), (x1, y1)] = rect;
                root.draw(&Text::new(
                    format!("{:.2}", value),
                    ((x0 + x1) / 2 - 12, (y0 + y1) / 2 - 6,),
                    ("sans-serif", 13).into_font().color(text_color),
                ))
                .map_err(render_err)?;
            }
        }
    }

    // Row labels, vertically centered on their cells.
    for (row_idx, label) in row_labels.iter().enumerate() {
        let [(_, y0), (_, y1)] = layout.cell_rect(row_idx, 0);
        root.draw(&Text::new(
            label.clone(),
            (MARGIN as i32, (y0 + y1) / 2 - 6),
            ("sans-serif", 13).into_font().color(&BLACK),
        ))
        .map_err(render_err)?;
    }

    // Column labels under the grid.
    for (col_idx, label) in col_labels.iter().enumerate() {
        let [(x0, _), (x1, _)] = layout.cell_rect(layout.rows.saturating_sub(1), col_idx);
        root.draw(&Text::new(
            label.clone(),
            ((x0 + x1) / 2 - (label.len() as i32 * 3), MARGIN as i32 + layout.grid_height() + 16),
            ("sans-serif", 13).into_font().color(&BLACK),
        ))
        .map_err(render_err)?;
    }

    draw_colorbar(root, layout, max_value)?;

    root.present().map_err(render_err)
}

fn draw_colorbar<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    layout: &Layout,
    max_value: f64,
) -> Result<(), FingerprintError> {
    let x = layout.colorbar_x();
    let top = MARGIN as i32;
    let height = layout.grid_height();
    let steps = 100;
    let step = height as f64 / steps as f64;

    for i in 0..steps {
        let y0 = top as f64 + i as f64 * step;
        // Highest value at the top of the bar.
        let t = 1.0 - i as f64 / steps as f64;
        root.draw(&Rectangle::new(
            [
                (x, y0 as i32),
                (x + COLORBAR_WIDTH as i32, (y0 + step) as i32),
            ],
            blues_ramp(t).filled(),
        ))
        .map_err(render_err)?;
    }

    root.draw(&Text::new(
        format!("{:.2}", max_value),
        (x, top - 10),
        ("sans-serif", 11).into_font().color(&BLACK),
    ))
    .map_err(render_err)?;
    root.draw(&Text::new(
        "0.00",
        (x, top + height + 4),
        ("sans-serif", 11).into_font().color(&BLACK),
    ))
    .map_err(render_err)?;

    Ok(())
}

/// Normalize a value against the matrix maximum; a non-positive maximum
/// means every cell renders as 0.
fn normalized(value: f64, max_value: f64) -> f64 {
    if max_value > 0.0 {
        (value / max_value).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// White (247,251,255) to dark blue (8,48,107), linear in t.
fn blues_ramp(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    RGBColor(
        (247.0 + t * (8.0 - 247.0)) as u8,
        (251.0 + t * (48.0 - 251.0)) as u8,
        (255.0 + t * (107.0 - 255.0)) as u8,
    )
}

fn render_err<E: std::fmt::Display>(e: E) -> FingerprintError {
    FingerprintError::Render(e.to_string())
}
