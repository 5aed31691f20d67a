// nl2sql-core/src/application/gateway.rs

use std::sync::Arc;
use tokio::time::{Instant, timeout_at};
use tracing::{error, info, instrument, warn};

use crate::application::prompt::PromptBuilder;
use crate::domain::sql::{DenyList, SqlValidator, ValidationVerdict, extract_sql};
use crate::domain::{DomainError, GeneratedStatement, QueryOutput, QueryRequest, QueryResult};
use crate::error::Nl2SqlError;
use crate::infrastructure::config::{GatewayConfig, PipelineConfig};
use crate::infrastructure::error::{DatabaseError, ModelError};
use crate::infrastructure::templating::JinjaRenderer;
use crate::ports::{LanguageModel, QueryExecutor, SamplingConfig};

/// The question-to-rows pipeline.
///
/// Built from its collaborators once at startup and shared across requests.
/// Holds no per-request state: each call to [`Nl2SqlGateway::process_question`]
/// is an independent unit of work that is cancelled by dropping its future.
pub struct Nl2SqlGateway {
    model: Arc<dyn LanguageModel>,
    executor: Arc<dyn QueryExecutor>,
    prompts: PromptBuilder,
    validator: SqlValidator,
    limits: PipelineConfig,
    sampling: SamplingConfig,
}

impl Nl2SqlGateway {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        executor: Arc<dyn QueryExecutor>,
        config: &GatewayConfig,
    ) -> Result<Self, Nl2SqlError> {
        let deny_list = DenyList::new(&config.gateway.forbidden_tokens)?;
        let prompts = PromptBuilder::new(
            &JinjaRenderer::new(),
            &config.schema,
            config.gateway.dialect,
            config.gateway.row_cap,
        )?;

        info!(
            model = model.model_name(),
            engine = executor.engine_name(),
            table = %config.schema.table,
            row_cap = config.gateway.row_cap,
            denied_tokens = deny_list.len(),
            "NL2SQL gateway ready"
        );

        Ok(Self {
            model,
            executor,
            prompts,
            validator: SqlValidator::new(deny_list),
            limits: config.gateway.clone(),
            sampling: config.model.sampling,
        })
    }

    pub fn limits(&self) -> &PipelineConfig {
        &self.limits
    }

    /// Question in, rows out. Stages run strictly in sequence and the first
    /// failure ends the call; nothing is retried.
    #[instrument(skip(self, question), fields(model = self.model.model_name()))]
    pub async fn process_question(&self, question: &str) -> Result<QueryResult, Nl2SqlError> {
        let started = Instant::now();
        let request = QueryRequest::new(question, self.limits.question_max_length)?;
        let deadline = started + self.limits.request_timeout();

        let statement = self.generate(&request, deadline).await?;
        info!(
            question = request.question(),
            sql = %statement.extracted_sql,
            "NL2SQL statement generated"
        );

        let sql = match self.validator.validate(&statement.extracted_sql) {
            ValidationVerdict::Accepted(sql) => sql,
            ValidationVerdict::Rejected(reason) => {
                warn!(%reason, sql = %statement.extracted_sql, "Generated SQL rejected");
                return Err(DomainError::UnsafeStatement {
                    sql: statement.extracted_sql,
                    reason,
                }
                .into());
            }
        };

        let output = self.execute(&sql, deadline).await?;

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(rows = output.rows.len(), elapsed_ms, "NL2SQL query answered");

        Ok(QueryResult::assemble(
            request.question(),
            sql,
            output,
            elapsed_ms,
        ))
    }

    async fn generate(
        &self,
        request: &QueryRequest,
        deadline: Instant,
    ) -> Result<GeneratedStatement, Nl2SqlError> {
        let prompt = self.prompts.build(request);

        let raw_text = match timeout_at(deadline, self.model.generate(&prompt, &self.sampling)).await
        {
            Ok(result) => result.map_err(|e| {
                error!(error = %e, "Language model call failed");
                Nl2SqlError::Generation(e)
            })?,
            Err(_) => {
                error!("Language model call exceeded the request deadline");
                return Err(Nl2SqlError::Generation(
                    ModelError::Timeout(self.limits.request_timeout()).into(),
                ));
            }
        };

        // A bare or empty fence leaves nothing to run.
        let extracted_sql = extract_sql(&raw_text);
        if extracted_sql.is_empty() {
            return Err(Nl2SqlError::Generation(ModelError::EmptyResponse.into()));
        }

        Ok(GeneratedStatement {
            raw_text,
            extracted_sql,
        })
    }

    async fn execute(&self, sql: &str, deadline: Instant) -> Result<QueryOutput, Nl2SqlError> {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let budget = self.limits.execution_timeout().min(remaining);
        if budget.is_zero() {
            return Err(Nl2SqlError::Execution(
                DatabaseError::Timeout(self.limits.request_timeout()).into(),
            ));
        }

        self.executor
            .execute(sql, self.limits.row_cap, budget)
            .await
            .map_err(|e| {
                error!(error = %e, sql, "Query execution failed");
                Nl2SqlError::Execution(e)
            })
    }
}
