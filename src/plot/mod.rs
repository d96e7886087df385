//! Heatmap output.
//!
//! Turns the filtered frequency table into a rendered image. The backend
//! is picked from the output path's extension: `.svg` for vector output,
//! `.png` for bitmap. Callers guarantee the label count matches the
//! table's column count.

pub mod cluster;
pub mod heatmap;

pub use heatmap::PlotOptions;

use crate::error::FingerprintError;
use crate::models::FrequencyTable;
use heatmap::Layout;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

/// Render `table` as a heatmap image at `path`.
pub fn render(
    table: &FrequencyTable,
    col_labels: &[String],
    path: &Path,
    options: &PlotOptions,
) -> Result<(), FingerprintError> {
    if table.is_empty() {
        return Err(FingerprintError::Render(
            "no interactions above the cutoff; nothing to plot".to_string(),
        ));
    }

    let (matrix, row_labels, col_labels) = heatmap::prepare(
        table.to_matrix(),
        table.row_labels(),
        col_labels.to_vec(),
        options.cluster_columns,
    );
    let layout = Layout::for_matrix(matrix.len(), table.columns(), options.cell_size);

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "svg" => {
            let root = SVGBackend::new(path, (layout.width, layout.height)).into_drawing_area();
            heatmap::draw(&root, &matrix, &row_labels, &col_labels, &layout, options.annotate)?;
        }
        "png" => {
            let root = BitMapBackend::new(path, (layout.width, layout.height)).into_drawing_area();
            heatmap::draw(&root, &matrix, &row_labels, &col_labels, &layout, options.annotate)?;
        }
        other => {
            return Err(FingerprintError::Render(format!(
                "unsupported plot format {:?}; use .svg or .png",
                other
            )));
        }
    }

    info!("Wrote fingerprint heatmap to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResiduePair;
    use tempfile::TempDir;

    fn sample_table() -> FrequencyTable {
        let mut table = FrequencyTable::new(2);
        table.set(ResiduePair::new("A:ARG:123", "B:GLU:45"), 0, 0.9);
        table.set(ResiduePair::new("A:ASP:100", "A:LYS:31"), 1, 0.7);
        table
    }

    fn labels() -> Vec<String> {
        vec!["wild-type".to_string(), "mutant".to_string()]
    }

    #[test]
    fn test_svg_output_contains_labels() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("fingerprints.svg");

        render(&sample_table(), &labels(), &out, &PlotOptions::default()).unwrap();

        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("A:ARG:123 - B:GLU:45"));
        assert!(svg.contains("wild-type"));
    }

    #[test]
    fn test_empty_table_is_a_render_error() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("empty.svg");
        let table = FrequencyTable::new(2);

        let err = render(&table, &labels(), &out, &PlotOptions::default()).unwrap_err();
        assert!(matches!(err, FingerprintError::Render(_)));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("fingerprints.pdf");

        let err = render(&sample_table(), &labels(), &out, &PlotOptions::default()).unwrap_err();
        assert!(err.to_string().contains("pdf"));
    }
}
