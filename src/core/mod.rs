//! Core business logic abstractions

pub mod config;
pub mod conversion;
pub mod indicator;
pub mod log;
pub mod widget;

// Re-export main types for cleaner imports
pub use conversion::{Conversion, ConversionRequest};
pub use indicator::{
    CatalogEntry, IndicatorDetail, IndicatorProvider, IndicatorSummary, SUPPORTED_CODES,
    SeriesPoint,
};
pub use widget::{ConverterWidget, StatusKind, UiSurface, WidgetError, load_catalog};
