// nl2sql-core/src/ports/executor.rs

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::QueryOutput;
use crate::infrastructure::error::InfrastructureError;

#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Runs an already validated statement.
    ///
    /// Implementations own a connection for the duration of the call only,
    /// return at most `row_cap` rows whatever the statement's own limit, and
    /// give up after `timeout`. Nothing is retried.
    async fn execute(
        &self,
        sql: &str,
        row_cap: usize,
        timeout: Duration,
    ) -> Result<QueryOutput, InfrastructureError>;

    fn engine_name(&self) -> &str;
}
