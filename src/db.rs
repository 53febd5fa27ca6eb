#[cfg(feature = "ssr")]
mod db_impl {
    use crate::error::{StoreError, StoreResult};
    use crate::models::{Document, DocumentId, Fields};
    use crate::store::{new_document_id, BlobStore, DocumentStore};
    use async_trait::async_trait;
    use rusqlite::{params, Connection};
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tracing::{debug, error, info};


    /// SQLite-backed document and blob store.
    #[derive(Debug, Clone)]
    pub struct Database {
        conn: Arc<Mutex<Connection>>,
    }

    impl Database {
        pub fn new(db_path: &str) -> Result<Self, rusqlite::Error> {
            let conn = Connection::open(db_path)?;
            info!("[DB] Connection established at: {}", db_path);
            Ok(Database {
                conn: Arc::new(Mutex::new(conn)),
            })
        }

        pub async fn create_schema(&self) -> Result<(), rusqlite::Error> {
            let conn = self.conn.lock().await;

            // seq gives every document a stable insertion position
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS documents (
                    seq INTEGER PRIMARY KEY AUTOINCREMENT,
                    collection TEXT NOT NULL,
                    id TEXT NOT NULL,
                    fields TEXT NOT NULL,
                    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                    UNIQUE (collection, id)
                );",
            )
            .map_err(|e| {
                error!("[DB] Failed creating documents table: {}", e);
                e
            })?;

            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS blobs (
                    key TEXT PRIMARY KEY,
                    content_type TEXT NOT NULL,
                    data BLOB NOT NULL,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                );",
            )
            .map_err(|e| {
                error!("[DB] Failed creating blobs table: {}", e);
                e
            })?;
            Ok(())
        }
    }

    fn upsert(conn: &Connection, collection: &str, id: &str, fields: &Fields) -> StoreResult<()> {
        let json = serde_json::to_string(fields)?;
        conn.execute(
            "INSERT INTO documents (collection, id, fields)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(collection, id) DO UPDATE SET
                fields = excluded.fields,
                updated_at = CURRENT_TIMESTAMP",
            params![collection, id, json],
        )?;
        Ok(())
    }

    fn select_fields(conn: &Connection, collection: &str, id: &str) -> StoreResult<Option<Fields>> {
        let json: Option<String> = match conn.query_row(
            "SELECT fields FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
            |row| row.get(0),
        ) {
            Ok(json) => Some(json),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(StoreError::from(e)),
        };

        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    #[async_trait]
    impl DocumentStore for Database {
        async fn add_document(&self, collection: &str, fields: Fields) -> StoreResult<DocumentId> {
            let id = new_document_id();
            let conn = self.conn.lock().await;
            let json = serde_json::to_string(&fields)?;
            conn.execute(
                "INSERT INTO documents (collection, id, fields) VALUES (?1, ?2, ?3)",
                params![collection, &id, json],
            )?;
            debug!("[DB] Inserted {}/{}", collection, id);
            Ok(id)
        }

        async fn set_document(
            &self,
            collection: &str,
            id: &str,
            fields: Fields,
        ) -> StoreResult<()> {
            let conn = self.conn.lock().await;
            upsert(&conn, collection, id, &fields)?;
            debug!("[DB] Upserted {}/{}", collection, id);
            Ok(())
        }

        async fn merge_document(
            &self,
            collection: &str,
            id: &str,
            fields: Fields,
        ) -> StoreResult<()> {
            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;

            let mut merged = select_fields(&tx, collection, id)?.unwrap_or_default();
            merged.extend(fields);
            upsert(&tx, collection, id, &merged)?;

            tx.commit()?;
            debug!("[DB] Merged {}/{}", collection, id);
            Ok(())
        }

        async fn get_document(
            &self,
            collection: &str,
            id: &str,
        ) -> StoreResult<Option<Document>> {
            let conn = self.conn.lock().await;
            Ok(select_fields(&conn, collection, id)?.map(|fields| Document {
                id: id.to_string(),
                fields,
            }))
        }

        async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<bool> {
            let conn = self.conn.lock().await;
            let removed = conn.execute(
                "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
            )?;
            debug!("[DB] Deleted {}/{} ({} rows)", collection, id, removed);
            Ok(removed > 0)
        }

        async fn list_documents(&self, collection: &str) -> StoreResult<Vec<Document>> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT id, fields FROM documents WHERE collection = ?1 ORDER BY seq ASC",
            )?;
            let rows = stmt.query_map([collection], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;

            let mut documents = Vec::new();
            for row in rows {
                let (id, json) = row?;
                documents.push(Document {
                    id,
                    fields: serde_json::from_str(&json)?,
                });
            }
            debug!("[DB] Fetched {} documents from {}", documents.len(), collection);
            Ok(documents)
        }
    }

    #[async_trait]
    impl BlobStore for Database {
        async fn put_blob(&self, key: &str, data: Vec<u8>, content_type: &str) -> StoreResult<()> {
            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT INTO blobs (key, content_type, data) VALUES (?1, ?2, ?3)
                ON CONFLICT(key) DO UPDATE SET
                    content_type = excluded.content_type,
                    data = excluded.data",
                params![key, content_type, data],
            )?;
            debug!("[DB] Stored blob {}", key);
            Ok(())
        }

        async fn get_blob(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
            let conn = self.conn.lock().await;
            match conn.query_row("SELECT data FROM blobs WHERE key = ?1", [key], |row| {
                row.get::<_, Vec<u8>>(0)
            }) {
                Ok(data) => Ok(Some(data)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        }
    }
}

#[cfg(feature = "ssr")]
pub use db_impl::Database;
