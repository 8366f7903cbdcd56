//! Terminal rendition of the converter's controls.

use super::ui;
use crate::core::{CatalogEntry, StatusKind, UiSurface};
use indicatif::ProgressBar;

pub struct TerminalSurface {
    amount: String,
    selection: Option<String>,
    options: Vec<CatalogEntry>,
    status: Option<String>,
    spinner: Option<ProgressBar>,
    interactive: bool,
}

impl TerminalSurface {
    /// `interactive` enables the request spinner; it is only drawn when
    /// stderr is a terminal.
    pub fn new(interactive: bool) -> Self {
        Self {
            amount: String::new(),
            selection: None,
            options: Vec::new(),
            status: None,
            spinner: None,
            interactive: interactive && console::Term::stderr().is_term(),
        }
    }

    /// Fills the amount field and selects `currency`, which may be a code
    /// or the 1-based number of a listed option.
    pub fn set_input(&mut self, amount: &str, currency: &str) {
        self.amount = amount.trim().to_string();
        let currency = currency.trim();
        self.selection = match currency.parse::<usize>() {
            Ok(n) if n >= 1 && n <= self.options.len() => Some(self.options[n - 1].code.clone()),
            _ if currency.is_empty() => None,
            _ => Some(currency.to_lowercase()),
        };
    }

    pub fn options(&self) -> &[CatalogEntry] {
        &self.options
    }

    /// Prints the selectable currencies as a table.
    pub fn print_options(&self) {
        if self.options.is_empty() {
            return;
        }
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("#"),
            ui::header_cell("Code"),
            ui::header_cell("Currency"),
            ui::header_cell("Latest value"),
            ui::header_cell("Unit"),
            ui::header_cell("Date"),
        ]);
        for (i, entry) in self.options.iter().enumerate() {
            table.add_row(option_row(i + 1, entry));
        }
        println!("{table}");
    }
}

/// One table row for a listed currency. Missing catalog fields show as `-`.
fn option_row(number: usize, entry: &CatalogEntry) -> Vec<String> {
    let missing = || "-".to_string();
    vec![
        number.to_string(),
        entry.code.clone(),
        entry.display_name.clone(),
        entry
            .latest_value
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(missing),
        entry.unit.clone().unwrap_or_else(missing),
        entry
            .updated
            .map(|d| d.format("%d-%m-%Y").to_string())
            .unwrap_or_else(missing),
    ]
}

impl UiSurface for TerminalSurface {
    fn amount_input(&self) -> String {
        self.amount.clone()
    }

    fn selected_currency(&self) -> Option<String> {
        self.selection.clone()
    }

    fn append_option(&mut self, entry: CatalogEntry) {
        self.options.push(entry);
    }

    fn set_status(&mut self, text: &str, kind: StatusKind) {
        let styled = match kind {
            StatusKind::Info => ui::style_text(text, ui::StyleType::Result),
            StatusKind::Error => ui::style_text(text, ui::StyleType::Error),
        };
        println!("{styled}");
        self.status = Some(text.to_string());
    }

    fn set_busy(&mut self, busy: bool) {
        if busy && self.interactive {
            self.spinner = Some(ui::new_spinner("Contacting mindicador.cl..."));
        } else if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface_with_options() -> TerminalSurface {
        let mut surface = TerminalSurface::new(false);
        for (code, name) in [("dolar", "Dólar observado"), ("euro", "Euro")] {
            surface.append_option(CatalogEntry {
                code: code.to_string(),
                display_name: name.to_string(),
                latest_value: None,
                unit: None,
                updated: None,
            });
        }
        surface
    }

    #[test]
    fn test_selection_by_number_or_code() {
        let mut surface = surface_with_options();

        surface.set_input(" 1000 ", "2");
        assert_eq!(surface.amount_input(), "1000");
        assert_eq!(surface.selected_currency().as_deref(), Some("euro"));

        surface.set_input("1000", "DOLAR");
        assert_eq!(surface.selected_currency().as_deref(), Some("dolar"));

        // Out-of-range numbers are kept verbatim and fail validation later.
        surface.set_input("1000", "7");
        assert_eq!(surface.selected_currency().as_deref(), Some("7"));

        surface.set_input("1000", "");
        assert!(surface.selected_currency().is_none());
    }

    #[test]
    fn test_status_is_overwritten() {
        let mut surface = TerminalSurface::new(false);
        assert!(surface.status.is_none());

        surface.set_status("first", StatusKind::Info);
        surface.set_status("second", StatusKind::Error);
        assert_eq!(surface.status.as_deref(), Some("second"));
    }

    #[test]
    fn test_option_row_shows_latest_quote() {
        let entry = CatalogEntry {
            code: "dolar".to_string(),
            display_name: "Dólar observado".to_string(),
            latest_value: Some(900.5),
            unit: Some("Pesos".to_string()),
            updated: chrono::NaiveDate::from_ymd_opt(2024, 5, 20),
        };
        assert_eq!(
            option_row(1, &entry),
            vec!["1", "dolar", "Dólar observado", "900.50", "Pesos", "20-05-2024"]
        );

        let surface = surface_with_options();
        assert_eq!(
            option_row(2, &surface.options()[1]),
            vec!["2", "euro", "Euro", "-", "-", "-"]
        );
    }
}
