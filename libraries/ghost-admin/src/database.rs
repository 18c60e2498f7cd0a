//! Database export and import.

use crate::client::{AdminClient, UploadFile};
use crate::error::{GhostError, Result};
use crate::types::{Database, DatabaseImportProblem, DatabaseImportWrapper, DatabaseWrapper};
use tracing::{debug, info, warn};

/// Database client for the Ghost Admin API.
pub struct DatabaseService<'a> {
    client: &'a AdminClient,
}

impl<'a> DatabaseService<'a> {
    pub(crate) fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// Export the whole database.
    pub async fn export(&self) -> Result<Database> {
        debug!("Exporting database");

        let wrapper: Option<DatabaseWrapper> = self.client.get_json("db", None).await?;
        let mut dbs = wrapper.map(|w| w.db).unwrap_or_default();

        if dbs.len() != 1 {
            return Err(GhostError::UnexpectedResponse(format!(
                "expected exactly one database, got {}",
                dbs.len()
            )));
        }

        let db = dbs.remove(0);
        info!(tables = db.data.len(), "Database exported");
        Ok(db)
    }

    /// Import a database dump. Returns the problems (warnings) Ghost
    /// reported, if any.
    pub async fn import(&self, db: &Database) -> Result<Vec<DatabaseImportProblem>> {
        let file = UploadFile::json("importfile", "ghost.json", db)?;
        let request = self.client.upload_request("db", file, &[])?;

        let wrapper: Option<DatabaseImportWrapper> =
            self.client.execute(request).await?.json()?;
        let problems = wrapper.map(|w| w.problems).unwrap_or_default();

        if problems.is_empty() {
            info!("Database imported");
        } else {
            warn!(problems = problems.len(), "Database imported with problems");
        }

        Ok(problems)
    }
}
