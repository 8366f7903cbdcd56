//! SVG drawing surface backed by `plotters`.

use super::curve::{smooth, value_range};
use super::renderer::{ChartCanvas, ChartSpec};
use anyhow::{Context, Result, anyhow};
use plotters::prelude::*;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub const LINE_COLOR: RGBColor = RGBColor(0xe9, 0x4b, 0x77);

/// Writes each chart to an SVG file. Disposing a chart deletes its file.
pub struct SvgCanvas {
    path: PathBuf,
    size: (u32, u32),
}

/// A chart written to disk by [`SvgCanvas`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgChart {
    pub path: PathBuf,
}

impl SvgCanvas {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            size: (width.max(1), height.max(1)),
        }
    }
}

impl ChartCanvas for SvgCanvas {
    type Chart = SvgChart;

    fn draw(&mut self, spec: &ChartSpec) -> Result<SvgChart> {
        let svg = render_svg(spec, self.size)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&self.path, svg)
            .with_context(|| format!("Failed to write chart to {}", self.path.display()))?;
        debug!(path = %self.path.display(), "Wrote chart");
        Ok(SvgChart {
            path: self.path.clone(),
        })
    }

    fn dispose(&mut self, chart: &SvgChart) -> Result<()> {
        match fs::remove_file(&chart.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove chart {}", chart.path.display())),
        }
    }
}

/// Draws `spec` as a smoothed line chart and returns the SVG document.
pub fn render_svg(spec: &ChartSpec, size: (u32, u32)) -> Result<String> {
    let mut buffer = String::new();
    draw_history(spec, &mut buffer, size).map_err(|e| anyhow!("Failed to draw chart: {}", e))?;
    Ok(buffer)
}

fn draw_history(
    spec: &ChartSpec,
    buffer: &mut String,
    size: (u32, u32),
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::with_string(buffer, size).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = spec.values.len().saturating_sub(1).max(1) as f64;
    let (y_min, y_max) = value_range(&spec.values, spec.begin_at_zero);

    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..x_max, y_min..y_max)?;

    let labels = &spec.labels;
    // Only whole positions carry a date.
    let label_at = |x: &f64| {
        let rounded = x.round();
        if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        labels.get(rounded as usize).cloned().unwrap_or_default()
    };
    chart
        .configure_mesh()
        .x_labels(labels.len().max(2))
        .x_label_formatter(&label_at)
        .y_label_formatter(&|y| format!("{y:.2}"))
        .draw()?;

    let points: Vec<(f64, f64)> = spec
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();

    chart
        .draw_series(LineSeries::new(
            smooth(&points, spec.tension),
            LINE_COLOR.stroke_width(2),
        ))?
        .label(spec.series_label.as_str())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &LINE_COLOR));

    chart.draw_series(
        points
            .iter()
            .map(|p| Circle::new(*p, 3, LINE_COLOR.filled())),
    )?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::renderer::ChartRenderer;
    use crate::charts::renderer::tests::oldest_first;

    #[test]
    fn test_render_svg_contains_series() {
        let spec = ChartSpec::history(&oldest_first(10), "dolar");
        let svg = render_svg(&spec, (800, 400)).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Last 10 days history - DOLAR"));
        assert!(spec.labels.iter().any(|label| svg.contains(label.as_str())));
    }

    #[test]
    fn test_render_svg_empty_series() {
        let spec = ChartSpec::history(&[], "euro");
        let svg = render_svg(&spec, (400, 200)).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_canvas_replaces_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("charts").join("history.svg");
        let mut renderer = ChartRenderer::new(SvgCanvas::new(&path, 640, 320));

        renderer.render(&oldest_first(5), "dolar").unwrap();
        let first = fs::read_to_string(&path).unwrap();
        assert!(first.contains("DOLAR"));

        renderer.render(&oldest_first(5), "bitcoin").unwrap();
        let second = fs::read_to_string(&path).unwrap();
        assert!(second.contains("BITCOIN"));
        assert!(!second.contains("DOLAR"));
        assert_eq!(renderer.current().map(|c| c.path.as_path()), Some(path.as_path()));
    }

    #[test]
    fn test_dispose_missing_file_is_ok() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("gone.svg");
        let mut canvas = SvgCanvas::new(&path, 100, 100);
        assert!(canvas.dispose(&SvgChart { path }).is_ok());
    }
}
