// Terminal and JSON rendering of statement reports.

use crate::error::Result;
use crate::report::StatementReport;
use crate::schema::FinancialTable;
use serde::Serialize;
use std::io::Write;

pub const NO_NUMERIC_COLUMNS: &str = "No numeric columns found for visualization.";

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    /// One point per table row; `None` where the cell is missing.
    pub points: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub series: Vec<ChartSeries>,
}

impl LineChart {
    pub fn column_names(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name.as_str()).collect()
    }
}

/// A line chart over the numeric columns, or `None` if the table has none.
pub fn line_chart(table: &FinancialTable) -> Option<LineChart> {
    let series: Vec<ChartSeries> = table
        .numeric_columns()
        .map(|column| ChartSeries {
            name: column.name.clone(),
            points: column.cells.iter().map(|cell| cell.as_f64()).collect(),
        })
        .collect();

    if series.is_empty() {
        None
    } else {
        Some(LineChart { series })
    }
}

fn sparkline(points: &[Option<f64>]) -> String {
    let values: Vec<f64> = points.iter().flatten().copied().collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    points
        .iter()
        .map(|point| match point {
            None => ' ',
            Some(_) if span <= 0.0 => SPARK_LEVELS[SPARK_LEVELS.len() / 2],
            Some(v) => {
                let level = ((v - min) / span * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
                SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
            }
        })
        .collect()
}

fn write_table<W: Write>(out: &mut W, table: &FinancialTable) -> Result<()> {
    let columns = table.columns();
    let widths: Vec<usize> = columns
        .iter()
        .map(|column| {
            column
                .cells
                .iter()
                .map(|cell| cell.to_string().chars().count())
                .chain(std::iter::once(column.name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| format!("{:<width$}", column.name, width = width))
        .collect();
    writeln!(out, "| {} |", header.join(" | "))?;

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "| {} |", rule.join(" | "))?;

    for row in 0..table.row_count() {
        let cells: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| {
                let cell = column.cells[row].to_string();
                if column.column_type.is_numeric() {
                    format!("{:>width$}", cell, width = width)
                } else {
                    format!("{:<width$}", cell, width = width)
                }
            })
            .collect();
        writeln!(out, "| {} |", cells.join(" | "))?;
    }

    Ok(())
}

fn write_chart<W: Write>(out: &mut W, chart: &LineChart) -> Result<()> {
    let name_width = chart
        .series
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0);

    for series in &chart.series {
        writeln!(
            out,
            "{:<width$}  {}",
            series.name,
            sparkline(&series.points),
            width = name_width
        )?;
    }
    Ok(())
}

pub fn render_report<W: Write>(out: &mut W, report: &StatementReport) -> Result<()> {
    let title = report.kind.title();

    if let Some(error) = &report.load_error {
        writeln!(out, "[error] {}", error)?;
    }

    writeln!(out, "## {} Summary\n", title)?;
    writeln!(out, "{}\n", report.analysis.display_text())?;

    if let Some(table) = &report.table {
        writeln!(out, "### {} Data\n", title)?;
        write_table(out, table)?;
        writeln!(out)?;

        match line_chart(table) {
            Some(chart) => write_chart(out, &chart)?,
            None => writeln!(out, "[warning] {}", NO_NUMERIC_COLUMNS)?,
        }
        writeln!(out)?;
    }

    Ok(())
}

pub fn render_text<W: Write>(out: &mut W, reports: &[StatementReport]) -> Result<()> {
    writeln!(out, "# Financial Decoder\n")?;
    writeln!(
        out,
        "Transform complex financial data into clear actionable insights.\n"
    )?;

    for report in reports {
        render_report(out, report)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct ReportView<'a> {
    #[serde(flatten)]
    report: &'a StatementReport,
    title: &'static str,
    chart: Option<LineChart>,
}

pub fn render_json<W: Write>(out: &mut W, reports: &[StatementReport]) -> Result<()> {
    let views: Vec<ReportView> = reports
        .iter()
        .map(|report| ReportView {
            report,
            title: report.kind.title(),
            chart: report.table.as_ref().and_then(line_chart),
        })
        .collect();

    serde_json::to_writer_pretty(&mut *out, &views)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AnalysisResult, CellValue, Column, ColumnType, StatementKind};

    fn text_only_table() -> FinancialTable {
        FinancialTable::new(vec![Column {
            name: "Note".to_string(),
            column_type: ColumnType::Text,
            cells: vec![CellValue::Text("audited".to_string())],
        }])
    }

    #[test]
    fn test_chart_skips_non_numeric() {
        let table = FinancialTable::new(vec![
            Column {
                name: "Cash".to_string(),
                column_type: ColumnType::Float,
                cells: vec![CellValue::Float(1.5), CellValue::Empty],
            },
            Column {
                name: "Audited".to_string(),
                column_type: ColumnType::Boolean,
                cells: vec![CellValue::Boolean(true), CellValue::Boolean(false)],
            },
        ]);

        let chart = line_chart(&table).unwrap();
        assert_eq!(chart.column_names(), vec!["Cash"]);
        assert_eq!(chart.series[0].points, vec![Some(1.5), None]);

        assert!(line_chart(&text_only_table()).is_none());
    }

    #[test]
    fn test_sparkline_scales() {
        assert_eq!(sparkline(&[Some(0.0), Some(7.0), None]), "▁█ ");
        assert_eq!(sparkline(&[Some(3.0), Some(3.0)]), "▅▅");
    }

    #[test]
    fn test_render_without_numeric_columns() {
        let report = StatementReport {
            kind: StatementKind::CashFlow,
            analysis: AnalysisResult::Completed("Stable.".to_string()),
            table: Some(text_only_table()),
            load_error: None,
        };

        let mut out = Vec::new();
        render_report(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("## Cash Flow Summary"));
        assert!(text.contains("Stable."));
        assert!(text.contains("### Cash Flow Data"));
        assert!(text.contains("| audited |"));
        assert!(text.contains(NO_NUMERIC_COLUMNS));
    }

    #[test]
    fn test_render_missing_statement() {
        let report = StatementReport {
            kind: StatementKind::BalanceSheet,
            analysis: AnalysisResult::NoData,
            table: None,
            load_error: Some("Error loading file: No columns to parse from file".to_string()),
        };

        let mut out = Vec::new();
        render_report(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("[error] Error loading file"));
        assert!(text.contains("No data provided."));
        assert!(!text.contains("### Balance Sheet Data"));
    }
}
