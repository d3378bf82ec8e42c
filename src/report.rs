use crate::config::DecoderConfig;
use crate::error::Result;
use crate::ingestion::LoadedStatement;
use crate::llm::{CompletionModel, CompletionRequest};
use crate::prompts::build_prompt;
use crate::schema::{AnalysisResult, FinancialTable, StatementKind};
use futures::future::join_all;
use log::{debug, info};
use serde::Serialize;

/// Everything the display needs for one statement.
#[derive(Debug, Clone, Serialize)]
pub struct StatementReport {
    pub kind: StatementKind,
    pub analysis: AnalysisResult,
    pub table: Option<FinancialTable>,
    pub load_error: Option<String>,
}

pub struct ReportGenerator<M> {
    model: M,
    config: DecoderConfig,
}

impl<M: CompletionModel> ReportGenerator<M> {
    pub fn new(model: M, config: DecoderConfig) -> Self {
        Self { model, config }
    }

    /// Analyses one statement with a single model call.
    ///
    /// An absent table short-circuits to [`AnalysisResult::NoData`] without
    /// contacting the model. Failures of the call are returned as
    /// [`AnalysisResult::Failed`], never propagated.
    pub async fn generate(
        &self,
        kind: StatementKind,
        table: Option<&FinancialTable>,
    ) -> AnalysisResult {
        let Some(table) = table else {
            debug!("{}: no data supplied, skipping model call", kind.title());
            return AnalysisResult::NoData;
        };

        match self.request_analysis(kind, table).await {
            Ok(text) => {
                info!("{}: analysis received ({} chars)", kind.title(), text.len());
                AnalysisResult::Completed(text)
            }
            Err(e) => {
                debug!("{}: analysis failed: {}", kind.title(), e);
                AnalysisResult::Failed(e.to_string())
            }
        }
    }

    async fn request_analysis(&self, kind: StatementKind, table: &FinancialTable) -> Result<String> {
        let data = serde_json::to_string(&table.to_column_map())?;
        let prompt = build_prompt(kind, &data);

        let request = CompletionRequest {
            model: &self.config.model,
            prompt: &prompt,
            temperature: self.config.temperature,
        };
        self.model.complete(&request).await
    }

    /// Analyses every statement concurrently; output order follows input order.
    pub async fn generate_all(&self, statements: Vec<LoadedStatement>) -> Vec<StatementReport> {
        info!("Generating {} statement reports", statements.len());

        let analyses = join_all(
            statements
                .iter()
                .map(|statement| self.generate(statement.kind, statement.table.as_ref())),
        )
        .await;

        statements
            .into_iter()
            .zip(analyses)
            .map(|(statement, analysis)| StatementReport {
                kind: statement.kind,
                analysis,
                table: statement.table,
                load_error: statement.load_error,
            })
            .collect()
    }
}
