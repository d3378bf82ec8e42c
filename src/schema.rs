use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    /// Point-in-time position: assets, liabilities and equity
    BalanceSheet,
    /// Period performance: revenue, expenses and profit
    #[serde(rename = "profit_loss")]
    ProfitAndLoss,
    /// Cash movements across operating, investing and financing activities
    CashFlow,
}

impl StatementKind {
    pub const ALL: [StatementKind; 3] = [
        StatementKind::BalanceSheet,
        StatementKind::ProfitAndLoss,
        StatementKind::CashFlow,
    ];

    /// Stable identifier used by callers that pick a statement by name.
    pub fn key(&self) -> &'static str {
        match self {
            StatementKind::BalanceSheet => "balance_sheet",
            StatementKind::ProfitAndLoss => "profit_loss",
            StatementKind::CashFlow => "cash_flow",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn title(&self) -> &'static str {
        match self {
            StatementKind::BalanceSheet => "Balance Sheet",
            StatementKind::ProfitAndLoss => "Profit & Loss",
            StatementKind::CashFlow => "Cash Flow",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
    Empty,
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(v) => Some(*v as f64),
            CellValue::Float(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Integer(v) => Value::from(*v),
            CellValue::Float(v) if v.is_finite() => Value::from(*v),
            CellValue::Float(v) => Value::from(v.to_string()),
            CellValue::Boolean(v) => Value::from(*v),
            CellValue::Text(v) => Value::from(v.as_str()),
            CellValue::Empty => Value::Null,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Integer(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Boolean(v) => write!(f, "{}", v),
            CellValue::Text(v) => write!(f, "{}", v),
            CellValue::Empty => write!(f, ""),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    Text,
}

impl ColumnType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
    pub cells: Vec<CellValue>,
}

/// A loaded statement: named, typed columns of equal length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialTable {
    columns: Vec<Column>,
    row_count: usize,
}

impl FinancialTable {
    /// Builds a table, padding short columns with `Empty` so every column has
    /// the same number of rows.
    pub fn new(mut columns: Vec<Column>) -> Self {
        let row_count = columns.iter().map(|c| c.cells.len()).max().unwrap_or(0);
        for column in &mut columns {
            column.cells.resize(row_count, CellValue::Empty);
        }
        Self { columns, row_count }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.column_type.is_numeric())
    }

    /// Column name to ordered cell values, in table column order.
    pub fn to_column_map(&self) -> Map<String, Value> {
        self.columns
            .iter()
            .map(|column| {
                let values = column.cells.iter().map(CellValue::to_json).collect();
                (column.name.clone(), Value::Array(values))
            })
            .collect()
    }
}

/// Outcome of analysing one statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum AnalysisResult {
    /// No table was supplied; the model was not called.
    NoData,
    /// Raw model response, untouched.
    Completed(String),
    /// The model call failed; carries the failure description.
    Failed(String),
}

impl AnalysisResult {
    /// Text shown where the analysis would appear.
    pub fn display_text(&self) -> String {
        match self {
            AnalysisResult::NoData => "No data provided.".to_string(),
            AnalysisResult::Completed(text) => text.clone(),
            AnalysisResult::Failed(cause) => format!("Error generating summary: {}", cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> FinancialTable {
        FinancialTable::new(vec![
            Column {
                name: "Revenue".to_string(),
                column_type: ColumnType::Integer,
                cells: vec![CellValue::Integer(100), CellValue::Integer(200)],
            },
            Column {
                name: "Region".to_string(),
                column_type: ColumnType::Text,
                cells: vec![CellValue::Text("A".to_string())],
            },
        ])
    }

    #[test]
    fn test_statement_kind_keys() {
        for kind in StatementKind::ALL {
            assert_eq!(StatementKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(StatementKind::from_key("income_statement"), None);
    }

    #[test]
    fn test_short_columns_are_padded() {
        let table = sample_table();
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.column("Region").unwrap().cells[1],
            CellValue::Empty
        );
    }

    #[test]
    fn test_column_map_preserves_order() {
        let map = sample_table().to_column_map();
        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, vec!["Revenue", "Region"]);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"Revenue":[100,200],"Region":["A",null]}"#);
    }

    #[test]
    fn test_non_finite_cells_keep_their_text() {
        let table = FinancialTable::new(vec![Column {
            name: "Growth".to_string(),
            column_type: ColumnType::Float,
            cells: vec![
                CellValue::Float(1.5),
                CellValue::Float(f64::INFINITY),
                CellValue::Float(f64::NEG_INFINITY),
                CellValue::Float(f64::NAN),
            ],
        }]);

        let json = serde_json::to_string(&table.to_column_map()).unwrap();
        assert_eq!(json, r#"{"Growth":[1.5,"inf","-inf","NaN"]}"#);
        assert_eq!(CellValue::Float(f64::INFINITY).as_f64(), None);
    }

    #[test]
    fn test_numeric_columns() {
        let table = sample_table();
        let names: Vec<&str> = table.numeric_columns().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Revenue"]);
    }

    #[test]
    fn test_analysis_result_text() {
        assert_eq!(AnalysisResult::NoData.display_text(), "No data provided.");
        assert_eq!(
            AnalysisResult::Completed("OK".to_string()).display_text(),
            "OK"
        );
        assert_eq!(
            AnalysisResult::Failed("quota exceeded".to_string()).display_text(),
            "Error generating summary: quota exceeded"
        );
    }
}
