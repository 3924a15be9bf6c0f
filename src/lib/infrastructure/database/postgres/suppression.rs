//! Postgres implementation of the SuppressionRepository trait

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::{
    domain::communication::suppression::{
        SuppressionError, SuppressionList, SuppressionRepository,
    },
    infrastructure::database::postgres::PostgresDatabase,
};

impl PostgresDatabase {
    /// Reads the whole of `list`. Every call goes to the database.
    #[mutants::skip]
    async fn fetch_suppressed(
        &self,
        list: SuppressionList,
    ) -> Result<BTreeSet<String>, SuppressionError> {
        let query = format!("SELECT email FROM {} ORDER BY email", list.table());

        let emails: Vec<String> = sqlx::query_scalar(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| SuppressionError::lookup_failed(list, err))?;

        Ok(emails.into_iter().collect())
    }
}

#[async_trait]
impl SuppressionRepository for PostgresDatabase {
    #[mutants::skip]
    async fn list_bounced_addresses(&self) -> Result<BTreeSet<String>, SuppressionError> {
        self.fetch_suppressed(SuppressionList::Bounced).await
    }

    #[mutants::skip]
    async fn list_spam_addresses(&self) -> Result<BTreeSet<String>, SuppressionError> {
        self.fetch_suppressed(SuppressionList::Spam).await
    }
}
