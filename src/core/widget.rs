//! The converter widget: catalog loading, conversion and chart refresh,
//! bound to an abstract UI surface.

use super::conversion::{
    Conversion, ConversionRequest, chart_window, convert_amount, format_status,
};
use super::indicator::{CatalogEntry, IndicatorProvider, SUPPORTED_CODES};
use crate::charts::{ChartCanvas, ChartRenderer};
use anyhow::anyhow;
use thiserror::Error;
use tracing::{debug, instrument, warn};

pub const CATALOG_FAILED_MESSAGE: &str = "failed to load currencies";
pub const VALIDATION_FAILED_MESSAGE: &str = "must enter an amount and select a currency";
pub const FETCH_FAILED_MESSAGE: &str = "failed to fetch currency data";

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("failed to load currencies")]
    CatalogLoad(#[source] anyhow::Error),
    #[error("must enter an amount and select a currency")]
    Validation,
    #[error("failed to fetch currency data")]
    Fetch(#[source] anyhow::Error),
}

impl WidgetError {
    /// Text shown to the user for this failure.
    pub fn status_message(&self) -> &'static str {
        match self {
            WidgetError::CatalogLoad(_) => CATALOG_FAILED_MESSAGE,
            WidgetError::Validation => VALIDATION_FAILED_MESSAGE,
            WidgetError::Fetch(_) => FETCH_FAILED_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// The controls the widget reads from and writes to.
pub trait UiSurface {
    fn amount_input(&self) -> String;

    /// Code of the selected currency, if any.
    fn selected_currency(&self) -> Option<String>;

    fn append_option(&mut self, entry: CatalogEntry);

    /// Overwrites the status text.
    fn set_status(&mut self, text: &str, kind: StatusKind);

    /// Called around network requests.
    fn set_busy(&mut self, _busy: bool) {}
}

/// Fills the selection control with the supported currencies, in their
/// fixed order. Entries appended before a failure are kept.
#[instrument(name = "LoadCatalog", skip_all)]
pub async fn load_catalog(
    provider: &dyn IndicatorProvider,
    ui: &mut dyn UiSurface,
) -> Result<Vec<CatalogEntry>, WidgetError> {
    ui.set_busy(true);
    let fetched = provider.fetch_catalog().await;
    ui.set_busy(false);

    let result = fetched.and_then(|catalog| {
        let mut entries = Vec::with_capacity(SUPPORTED_CODES.len());
        for code in SUPPORTED_CODES {
            let summary = catalog
                .get(code)
                .ok_or_else(|| anyhow!("Indicator {code} missing from catalog"))?;
            let entry = CatalogEntry::from_summary(code, summary);
            ui.append_option(entry.clone());
            entries.push(entry);
        }
        Ok(entries)
    });

    result.map_err(|e| {
        warn!(error = ?e, "Failed to load currency catalog");
        let err = WidgetError::CatalogLoad(e);
        ui.set_status(err.status_message(), StatusKind::Error);
        err
    })
}

pub struct ConverterWidget<'a, C: ChartCanvas> {
    provider: &'a dyn IndicatorProvider,
    chart: ChartRenderer<C>,
}

impl<'a, C: ChartCanvas> ConverterWidget<'a, C> {
    pub fn new(provider: &'a dyn IndicatorProvider, canvas: C) -> Self {
        Self {
            provider,
            chart: ChartRenderer::new(canvas),
        }
    }

    pub fn chart(&self) -> &ChartRenderer<C> {
        &self.chart
    }

    pub async fn load_catalog(
        &self,
        ui: &mut dyn UiSurface,
    ) -> Result<Vec<CatalogEntry>, WidgetError> {
        load_catalog(self.provider, ui).await
    }

    /// Handles the convert trigger: reads the amount and selection from `ui`.
    pub async fn on_convert(&mut self, ui: &mut dyn UiSurface) -> Result<Conversion, WidgetError> {
        let amount = ui.amount_input();
        let code = ui.selected_currency().unwrap_or_default();
        self.convert(ui, &amount, &code).await
    }

    /// Converts `amount` CLP into `code`, updates the status text and, on
    /// success, replaces the history chart.
    ///
    /// The upstream series is expected newest first and is not re-sorted.
    #[instrument(name = "Convert", skip(self, ui))]
    pub async fn convert(
        &mut self,
        ui: &mut dyn UiSurface,
        amount: &str,
        code: &str,
    ) -> Result<Conversion, WidgetError> {
        let Some(request) = ConversionRequest::parse(amount, code) else {
            let err = WidgetError::Validation;
            ui.set_status(err.status_message(), StatusKind::Error);
            return Err(err);
        };

        ui.set_busy(true);
        let fetched = self.provider.fetch_detail(&request.code).await;
        ui.set_busy(false);

        let series = match fetched.and_then(|detail| {
            match detail.series.first().map(|p| p.value) {
                None => Err(anyhow!("Empty series for {}", request.code)),
                Some(latest) if latest.is_nan() || latest <= 0.0 => Err(anyhow!(
                    "Invalid latest value {latest} for {}",
                    request.code
                )),
                Some(_) => Ok(detail.series),
            }
        }) {
            Ok(series) => series,
            Err(e) => {
                warn!(error = ?e, code = %request.code, "Failed to fetch currency data");
                let err = WidgetError::Fetch(e);
                ui.set_status(err.status_message(), StatusKind::Error);
                return Err(err);
            }
        };

        let rate = series[0].value;
        let converted = convert_amount(request.amount, rate);
        let status = format_status(request.amount, converted, &request.code);
        debug!(rate, converted, "Conversion computed");
        ui.set_status(&status, StatusKind::Info);

        let history = chart_window(&series);
        if let Err(e) = self.chart.render(&history, &request.code) {
            warn!(error = ?e, "Failed to render history chart");
        }

        Ok(Conversion {
            amount: request.amount,
            code: request.code,
            rate,
            converted,
            status,
            history,
        })
    }
}
