//! # Financial Decoder
//!
//! Turns uploaded financial statements (balance sheet, profit & loss, cash
//! flow) into narrative analysis written by a hosted language model, with the
//! raw table and a line chart of its numeric columns alongside.
//!
//! ## Pipeline
//!
//! - **Loading**: CSV or XLSX files become a [`FinancialTable`] with typed columns
//! - **Prompting**: each [`StatementKind`] has a fixed template; the table is embedded as JSON
//! - **Generation**: one completion call per statement, all statements concurrently
//! - **Display**: text or JSON rendering of each [`StatementReport`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use financial_decoder::*;
//! use std::path::Path;
//!
//! let config = DecoderConfig::from_env()?;
//! let generator = ReportGenerator::new(GeminiClient::new(config.api_key.clone()), config);
//!
//! let statements = vec![
//!     load_statement(StatementKind::ProfitAndLoss, Some(Path::new("pl.csv"))),
//! ];
//! let reports = generator.generate_all(statements).await;
//! render_text(&mut std::io::stdout(), &reports)?;
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod ingestion;
pub mod llm;
pub mod prompts;
pub mod report;
pub mod schema;

pub use config::DecoderConfig;
pub use display::{line_chart, render_json, render_report, render_text, ChartSeries, LineChart};
pub use error::{DecoderError, Result};
pub use ingestion::{load_statement, load_table, LoadedStatement, TableFormat};
#[cfg(feature = "gemini")]
pub use llm::GeminiClient;
pub use llm::{CompletionModel, CompletionRequest};
pub use prompts::{build_prompt, build_prompt_for_key, template_for, StatementTemplate};
pub use report::{ReportGenerator, StatementReport};
pub use schema::*;
