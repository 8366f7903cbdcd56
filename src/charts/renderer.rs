//! Owns the single live chart and swaps it out on every render.

use crate::core::SeriesPoint;
use anyhow::Result;
use tracing::debug;

/// Chart.js-style smoothing factor applied to the history line.
pub const LINE_TENSION: f64 = 0.3;
pub const SERIES_LABEL_PREFIX: &str = "Last 10 days history";

/// Everything a drawing surface needs to draw one history chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub series_label: String,
    /// Date labels, index-aligned with `values`.
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub tension: f64,
    /// When false the y axis is fitted to the data instead of starting at 0.
    pub begin_at_zero: bool,
}

impl ChartSpec {
    /// Builds the line chart description for an oldest-first series.
    pub fn history(series: &[SeriesPoint], code: &str) -> Self {
        let (labels, values): (Vec<String>, Vec<f64>) = series
            .iter()
            .map(|p| (p.day().format("%d-%m-%Y").to_string(), p.value))
            .unzip();
        Self {
            series_label: format!("{SERIES_LABEL_PREFIX} - {}", code.to_uppercase()),
            labels,
            values,
            tension: LINE_TENSION,
            begin_at_zero: false,
        }
    }
}

/// A surface charts are drawn onto.
pub trait ChartCanvas {
    /// Handle to a drawn chart, kept alive until disposed.
    type Chart;

    fn draw(&mut self, spec: &ChartSpec) -> Result<Self::Chart>;

    /// Releases whatever `chart` holds on the surface. On failure the caller
    /// still owns the handle and may dispose it again.
    fn dispose(&mut self, chart: &Self::Chart) -> Result<()>;
}

pub struct ChartRenderer<C: ChartCanvas> {
    canvas: C,
    current: Option<C::Chart>,
}

impl<C: ChartCanvas> ChartRenderer<C> {
    pub fn new(canvas: C) -> Self {
        Self {
            canvas,
            current: None,
        }
    }

    /// Replaces the displayed chart with one for `series` (oldest first).
    /// The previous chart is disposed before the new one is drawn. If that
    /// fails the previous chart stays in the slot and nothing new is drawn.
    pub fn render(&mut self, series: &[SeriesPoint], code: &str) -> Result<()> {
        let spec = ChartSpec::history(series, code);

        if let Some(previous) = &self.current {
            debug!("Disposing previous chart");
            self.canvas.dispose(previous)?;
            self.current = None;
        }

        let chart = self.canvas.draw(&spec)?;
        debug!(points = spec.values.len(), label = %spec.series_label, "Chart drawn");
        self.current = Some(chart);
        Ok(())
    }

    pub fn current(&self) -> Option<&C::Chart> {
        self.current.as_ref()
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum CanvasEvent {
        Draw(usize),
        Dispose(usize),
    }

    /// Records draw/dispose calls and tracks how many charts are alive.
    #[derive(Default)]
    pub(crate) struct RecordingCanvas {
        pub events: Vec<CanvasEvent>,
        pub specs: Vec<ChartSpec>,
        pub live: usize,
        /// Makes every `dispose` call fail.
        pub fail_dispose: bool,
        next_id: usize,
    }

    impl ChartCanvas for RecordingCanvas {
        type Chart = usize;

        fn draw(&mut self, spec: &ChartSpec) -> Result<usize> {
            let id = self.next_id;
            self.next_id += 1;
            self.live += 1;
            self.events.push(CanvasEvent::Draw(id));
            self.specs.push(spec.clone());
            Ok(id)
        }

        fn dispose(&mut self, chart: &usize) -> Result<()> {
            if self.fail_dispose {
                anyhow::bail!("chart {chart} is locked");
            }
            self.live -= 1;
            self.events.push(CanvasEvent::Dispose(*chart));
            Ok(())
        }
    }

    pub(crate) fn oldest_first(count: usize) -> Vec<SeriesPoint> {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 4, 0, 0).unwrap();
        (0..count)
            .map(|i| SeriesPoint {
                date: start + Duration::days(i as i64),
                value: 930.0 - i as f64,
            })
            .collect()
    }

    #[test]
    fn test_history_spec_aligns_labels_and_values() {
        let series = oldest_first(3);
        let spec = ChartSpec::history(&series, "euro");

        assert_eq!(spec.series_label, "Last 10 days history - EURO");
        assert_eq!(spec.labels, vec!["01-05-2024", "02-05-2024", "03-05-2024"]);
        assert_eq!(spec.values, vec![930.0, 929.0, 928.0]);
        assert_eq!(spec.tension, LINE_TENSION);
        assert!(!spec.begin_at_zero);
    }

    #[test]
    fn test_render_disposes_before_replacing() {
        let mut renderer = ChartRenderer::new(RecordingCanvas::default());
        assert!(renderer.current().is_none());

        renderer.render(&oldest_first(10), "dolar").unwrap();
        renderer.render(&oldest_first(4), "bitcoin").unwrap();

        assert_eq!(renderer.canvas().live, 1);
        assert_eq!(renderer.current(), Some(&1));
        assert_eq!(
            renderer.canvas().events,
            vec![
                CanvasEvent::Draw(0),
                CanvasEvent::Dispose(0),
                CanvasEvent::Draw(1)
            ]
        );
    }

    #[test]
    fn test_failed_dispose_keeps_previous_chart() {
        let mut renderer = ChartRenderer::new(RecordingCanvas::default());
        renderer.render(&oldest_first(10), "dolar").unwrap();

        renderer.canvas.fail_dispose = true;
        assert!(renderer.render(&oldest_first(10), "euro").is_err());
        assert_eq!(renderer.current(), Some(&0));
        assert_eq!(renderer.canvas().events, vec![CanvasEvent::Draw(0)]);

        // The kept handle is disposed on the next successful render.
        renderer.canvas.fail_dispose = false;
        renderer.render(&oldest_first(10), "euro").unwrap();
        assert_eq!(renderer.current(), Some(&1));
        assert_eq!(renderer.canvas().live, 1);
        assert_eq!(
            renderer.canvas().events,
            vec![
                CanvasEvent::Draw(0),
                CanvasEvent::Dispose(0),
                CanvasEvent::Draw(1)
            ]
        );
    }

    #[test]
    fn test_render_empty_series() {
        let mut renderer = ChartRenderer::new(RecordingCanvas::default());
        renderer.render(&[], "dolar").unwrap();

        let spec = &renderer.canvas().specs[0];
        assert!(spec.labels.is_empty());
        assert!(spec.values.is_empty());
        assert_eq!(renderer.canvas().live, 1);
    }
}
