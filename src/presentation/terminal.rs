// Terminal front end for the dashboard controller
use crate::application::controller::SelectionChange;
use crate::application::view::{ChartId, ChartSurface, DashboardView};
use crate::domain::chart::ChartConfig;
use crate::domain::equipment::SelectOption;
use crate::domain::metrics::MetricsDisplay;
use crate::domain::record::to_fixed2;
use chrono::Local;
use comfy_table::{modifiers, presets, Attribute, Cell, CellAlignment, Color, Table};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_stream::wrappers::LinesStream;
use tokio_stream::{Stream, StreamExt};

const BAR_WIDTH: f64 = 30.0;

type SharedOptions = Arc<Mutex<Vec<SelectOption>>>;

/// Prints the selection control and metric displays to stdout.
#[derive(Default)]
pub struct TerminalView {
    options: SharedOptions,
}

impl TerminalView {
    /// Input that resolves typed option numbers against the options shown.
    pub fn selection_input(&self) -> SelectionInput {
        SelectionInput {
            options: self.options.clone(),
        }
    }
}

impl DashboardView for TerminalView {
    fn set_equipment_options(&mut self, options: Vec<SelectOption>) {
        println!("{}", format_options(&options));
        if let Ok(mut shown) = self.options.lock() {
            *shown = options;
        }
    }

    fn set_metrics(&mut self, metrics: &MetricsDisplay) {
        println!("{}", build_metrics_table(metrics));
    }
}

pub fn format_options(options: &[SelectOption]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(index, option)| match (option.value.is_empty(), option.disabled) {
            (true, true) => format!("     {} (unavailable)", option.label),
            (true, false) => format!("     {}", option.label),
            (false, _) => format!("{:>3}) {}", index, option.label),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_metrics_table(metrics: &MetricsDisplay) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec!["Energy", "Carbon", "Cost"]);
    table.add_row(vec![
        Cell::new(&metrics.energy).set_alignment(CellAlignment::Right),
        Cell::new(&metrics.carbon).set_alignment(CellAlignment::Right),
        Cell::new(&metrics.cost).set_alignment(CellAlignment::Right).fg(Color::DarkYellow),
    ]);
    table
}

pub fn build_chart_table(config: &ChartConfig) -> Table {
    let max = config.dataset.data.iter().copied().fold(0.0_f64, f64::max);

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        config.x_axis.title.as_str(),
        config.y_axis.title.as_str(),
        "",
    ]);
    for (time, value) in config.points() {
        let time = match time {
            Some(instant) => Cell::new(instant.with_timezone(&Local).format(config.x_axis.unit.strftime())),
            None => Cell::new("-").add_attribute(Attribute::Dim),
        };
        let width = if max > 0.0 { (value.max(0.0) / max * BAR_WIDTH).round() as usize } else { 0 };
        table.add_row(vec![
            time,
            Cell::new(to_fixed2(value)).set_alignment(CellAlignment::Right),
            Cell::new("█".repeat(width)).fg(Color::Blue),
        ]);
    }
    table
}

/// Draws charts as tables and optionally keeps the latest one as Chart.js
/// JSON on disk.
#[derive(Default)]
pub struct TerminalChartSurface {
    next_id: u64,
    chart_out: Option<PathBuf>,
}

impl TerminalChartSurface {
    pub fn new(chart_out: Option<PathBuf>) -> Self {
        Self { next_id: 0, chart_out }
    }

    fn export(&self, config: &ChartConfig) {
        let Some(path) = &self.chart_out else {
            return;
        };
        let result = serde_json::to_string_pretty(&config.to_chartjs())
            .map_err(std::io::Error::from)
            .and_then(|json| std::fs::write(path, json));
        if let Err(e) = result {
            tracing::error!("Failed to write chart to {}: {}", path.display(), e);
        }
    }
}

impl ChartSurface for TerminalChartSurface {
    fn create_chart(&mut self, config: &ChartConfig) -> ChartId {
        self.next_id += 1;
        println!("{}", build_chart_table(config));
        self.export(config);
        ChartId(self.next_id)
    }

    fn destroy_chart(&mut self, id: ChartId) {
        tracing::debug!("Destroyed chart {:?}", id);
    }
}

/// Turns typed lines into selection changes.
#[derive(Clone)]
pub struct SelectionInput {
    options: SharedOptions,
}

impl SelectionInput {
    /// An option number picks that option; any other text is the value itself.
    pub fn resolve(&self, line: &str) -> SelectionChange {
        let line = line.trim();
        let picked = line.parse::<usize>().ok().and_then(|index| {
            let options = self.options.lock().ok()?;
            options
                .get(index)
                .map(|option| if option.disabled { String::new() } else { option.value.clone() })
        });
        SelectionChange::new(picked.unwrap_or_else(|| line.to_string()))
    }

    /// One selection change per line until EOF or a read error.
    pub fn events<R>(self, reader: R) -> impl Stream<Item = SelectionChange> + Unpin
    where
        R: AsyncBufRead + Unpin,
    {
        LinesStream::new(reader.lines())
            .map_while(Result::ok)
            .map(move |line| self.resolve(&line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::equipment::{SELECT_PLACEHOLDER, NO_DATA_PLACEHOLDER};
    use crate::domain::record::Record;
    use serde_json::json;

    fn view_with(options: Vec<SelectOption>) -> TerminalView {
        let mut view = TerminalView::default();
        view.set_equipment_options(options);
        view
    }

    fn options() -> Vec<SelectOption> {
        vec![
            SelectOption::placeholder(SELECT_PLACEHOLDER),
            SelectOption::equipment("PUMP-01".to_string()),
            SelectOption::equipment("GEN-01".to_string()),
        ]
    }

    #[test]
    fn test_format_options() {
        let text = format_options(&options());
        assert_eq!(text, "     Select Equipment\n  1) PUMP-01\n  2) GEN-01");

        let text = format_options(&[SelectOption::unavailable(NO_DATA_PLACEHOLDER)]);
        assert_eq!(text, "     No data available (unavailable)");
    }

    #[test]
    fn test_resolve_selection() {
        let input = view_with(options()).selection_input();

        assert_eq!(input.resolve("2").value, "GEN-01");
        assert_eq!(input.resolve(" PUMP-01 ").value, "PUMP-01");
        assert_eq!(input.resolve("0").value, "");
        assert_eq!(input.resolve("").value, "");
        assert_eq!(input.resolve("7").value, "7");
    }

    #[test]
    fn test_resolve_disabled_option() {
        let input = view_with(vec![SelectOption::unavailable(NO_DATA_PLACEHOLDER)]).selection_input();
        assert_eq!(input.resolve("0").value, "");
    }

    #[tokio::test]
    async fn test_events_from_lines() {
        let input = view_with(options()).selection_input();
        let events: Vec<_> = input.events(&b"1\nGEN-01\n\n"[..]).collect().await;

        let values: Vec<_> = events.iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, vec!["PUMP-01", "GEN-01", ""]);
    }

    #[test]
    fn test_metrics_table() {
        let rendered = build_metrics_table(&MetricsDisplay::zero()).to_string();
        assert!(rendered.contains("0.00 kWh"));
        assert!(rendered.contains("0.00 kg CO₂"));
        assert!(rendered.contains("RM 0.00"));
    }

    #[test]
    fn test_chart_table_and_export() {
        let records: Vec<Record> = serde_json::from_value(json!([
            {"equipment": "A", "energy": 10, "timestamp": "2024-03-01T10:00:00Z"},
            {"equipment": "A", "energy": 5, "timestamp": "bogus"},
        ]))
        .unwrap();
        let refs: Vec<&Record> = records.iter().collect();
        let config = ChartConfig::energy_over_time(&refs);

        let rendered = build_chart_table(&config).to_string();
        assert!(rendered.contains("10.00"));
        assert!(rendered.contains("5.00"));
        assert!(rendered.contains("Energy (kWh)"));
        assert_eq!(rendered.matches('█').count(), 45);

        let path = std::env::temp_dir().join(format!("energy-dashboard-chart-{}.json", std::process::id()));
        let mut surface = TerminalChartSurface::new(Some(path.clone()));
        assert_eq!(surface.create_chart(&config), ChartId(1));
        assert_eq!(surface.create_chart(&config), ChartId(2));

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(written["type"], "line");
        assert_eq!(written["data"]["labels"][1], serde_json::Value::Null);
    }
}
