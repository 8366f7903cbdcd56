//! Financial indicator abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Indicator codes offered for conversion, in the order they are listed.
pub const SUPPORTED_CODES: [&str; 3] = ["dolar", "euro", "bitcoin"];

pub fn is_supported(code: &str) -> bool {
    SUPPORTED_CODES.contains(&code)
}

/// A selectable currency, with the catalog's latest quote when it has one.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub code: String,
    pub display_name: String,
    pub latest_value: Option<f64>,
    pub unit: Option<String>,
    pub updated: Option<NaiveDate>,
}

impl CatalogEntry {
    pub fn from_summary(code: &str, summary: &IndicatorSummary) -> Self {
        Self {
            code: code.to_string(),
            display_name: summary.name.clone(),
            latest_value: summary.value,
            unit: summary.unit.clone(),
            updated: summary.date.map(|d| d.date_naive()),
        }
    }
}

/// Metadata for one indicator as listed by the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSummary {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "unidad_medida", default)]
    pub unit: Option<String>,
    #[serde(rename = "fecha", default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "valor", default)]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(rename = "fecha")]
    pub date: DateTime<Utc>,
    #[serde(rename = "valor")]
    pub value: f64,
}

impl SeriesPoint {
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

/// Detail payload for a single indicator. `series` is newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorDetail {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "unidad_medida", default)]
    pub unit: Option<String>,
    #[serde(rename = "serie")]
    pub series: Vec<SeriesPoint>,
}

#[async_trait]
pub trait IndicatorProvider: Send + Sync {
    /// Every indicator the upstream lists, keyed by code.
    async fn fetch_catalog(&self) -> Result<HashMap<String, IndicatorSummary>>;

    async fn fetch_detail(&self, code: &str) -> Result<IndicatorDetail>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_detail_deserialization() {
        let json = r#"{
            "version": "1.7.0",
            "autor": "mindicador.cl",
            "codigo": "dolar",
            "nombre": "Dólar observado",
            "unidad_medida": "Pesos",
            "serie": [
                {"fecha": "2024-05-10T04:00:00.000Z", "valor": 925.3},
                {"fecha": "2024-05-09T04:00:00.000Z", "valor": 930.1}
            ]
        }"#;

        let detail: IndicatorDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.code, "dolar");
        assert_eq!(detail.name.as_deref(), Some("Dólar observado"));
        assert_eq!(detail.series.len(), 2);
        assert_eq!(detail.series[0].value, 925.3);
        assert_eq!(detail.series[0].day().day(), 10);
        assert_eq!(detail.series[1].day().month(), 5);
    }

    #[test]
    fn test_summary_requires_only_name() {
        let summary: IndicatorSummary = serde_json::from_str(r#"{"nombre": "Euro"}"#).unwrap();
        assert_eq!(summary.name, "Euro");
        assert!(summary.value.is_none());

        let missing_name = serde_json::from_str::<IndicatorSummary>(r#"{"codigo": "euro"}"#);
        assert!(missing_name.is_err());
    }

    #[test]
    fn test_catalog_entry_from_summary() {
        let summary: IndicatorSummary = serde_json::from_str(
            r#"{"codigo": "bitcoin", "nombre": "Bitcoin", "unidad_medida": "Dólar",
                "fecha": "2024-05-19T04:00:00.000Z", "valor": 66940.0}"#,
        )
        .unwrap();

        let entry = CatalogEntry::from_summary("bitcoin", &summary);
        assert_eq!(entry.code, "bitcoin");
        assert_eq!(entry.display_name, "Bitcoin");
        assert_eq!(entry.latest_value, Some(66940.0));
        assert_eq!(entry.unit.as_deref(), Some("Dólar"));
        assert_eq!(entry.updated, NaiveDate::from_ymd_opt(2024, 5, 19));

        let bare = IndicatorSummary {
            name: "Euro".to_string(),
            unit: None,
            date: None,
            value: None,
        };
        let entry = CatalogEntry::from_summary("euro", &bare);
        assert!(entry.latest_value.is_none());
        assert!(entry.updated.is_none());
    }

    #[test]
    fn test_supported_codes() {
        assert!(is_supported("dolar"));
        assert!(is_supported("bitcoin"));
        assert!(!is_supported("uf"));
        assert!(!is_supported(""));
        assert!(!is_supported("DOLAR"));
    }
}
