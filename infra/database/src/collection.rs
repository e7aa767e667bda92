use crate::Database;
use crate::error::{DatabaseError, DatabaseErrorExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Write as _;

/// Every read returns the record key as a plain string `id`.
const PROJECTION: &str = "*, record::id(id) AS id";

/// Sort direction for [`Query::order_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Equality filters, ordering and paging for [`Collection::find`].
///
/// Field names are compile-time constants; values are always bound as parameters.
#[derive(Debug, Clone, Default)]
pub struct Query {
    filters: Vec<(&'static str, Value)>,
    order: Vec<(&'static str, Direction)>,
    limit: Option<u32>,
    start: Option<u32>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn filter(mut self, field: &'static str, value: impl Into<Value>) -> Self {
        self.filters.push((field, value.into()));
        self
    }

    /// Adds the filter only when a value is present.
    #[must_use]
    pub fn filter_opt<V: Into<Value>>(self, field: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.filter(field, value),
            None => self,
        }
    }

    #[must_use]
    pub fn order_by(mut self, field: &'static str, direction: Direction) -> Self {
        self.order.push((field, direction));
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn start(mut self, start: u32) -> Self {
        self.start = Some(start);
        self
    }

    fn where_clause(&self) -> String {
        let mut clause = String::new();
        for (index, (field, _)) in self.filters.iter().enumerate() {
            clause.push_str(if index == 0 { " WHERE " } else { " AND " });
            let _ = write!(clause, "{field} = $f{index}");
        }
        clause
    }

    fn select_statement(&self) -> String {
        let mut sql = format!("SELECT {PROJECTION} FROM type::table($tb){}", self.where_clause());
        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|(field, direction)| format!("{field} {}", direction.keyword()))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = write!(sql, " ORDER BY {order}");
        }
        if let Some(limit) = self.limit {
            let _ = write!(sql, " LIMIT {limit}");
        }
        if let Some(start) = self.start {
            let _ = write!(sql, " START {start}");
        }
        sql.push(';');
        sql
    }

    fn count_statement(&self) -> String {
        format!("SELECT count() AS total FROM type::table($tb){} GROUP ALL;", self.where_clause())
    }
}

#[derive(Debug, serde::Deserialize)]
struct Total {
    total: u64,
}

/// Document helper bound to a single table.
///
/// Documents are plain serde structs with a string `id`; the id is the record key and is
/// never stored inside the document body.
#[derive(Debug, Clone)]
pub struct Collection {
    db: Database,
    table: &'static str,
}

impl Collection {
    pub(crate) const fn new(db: Database, table: &'static str) -> Self {
        Self { db, table }
    }

    #[must_use]
    pub const fn table(&self) -> &'static str {
        self.table
    }

    /// Creates a new record under `id` and returns the stored document.
    ///
    /// # Errors
    /// Fails when the record already exists or a schema assertion rejects the document.
    pub async fn insert<T>(&self, id: &str, document: &T) -> Result<T, DatabaseError>
    where
        T: Serialize + DeserializeOwned,
    {
        let content = to_content(document)?;
        let sql = format!(
            "CREATE type::thing($tb, $id) CONTENT $content RETURN NONE;
            SELECT {PROJECTION} FROM type::thing($tb, $id);"
        );
        let stored = self.write_then_read::<T>(sql, id, content, "insert").await?;
        stored.ok_or_else(|| DatabaseError::Internal {
            message: format!("{}:{id} vanished after insert", self.table).into(),
            context: None,
        })
    }

    /// Replaces the body of an existing record. Returns `None` if the record does not exist.
    ///
    /// # Errors
    /// Fails when a schema assertion rejects the document.
    pub async fn replace<T>(&self, id: &str, document: &T) -> Result<Option<T>, DatabaseError>
    where
        T: Serialize + DeserializeOwned,
    {
        if !self.exists(id).await? {
            return Ok(None);
        }
        let content = to_content(document)?;
        let sql = format!(
            "UPDATE type::thing($tb, $id) CONTENT $content RETURN NONE;
            SELECT {PROJECTION} FROM type::thing($tb, $id);"
        );
        self.write_then_read(sql, id, content, "replace").await
    }

    /// Creates or replaces the record stored under `id`.
    ///
    /// # Errors
    /// Fails when a schema assertion rejects the document.
    pub async fn save<T>(&self, id: &str, document: &T) -> Result<T, DatabaseError>
    where
        T: Serialize + DeserializeOwned,
    {
        match self.replace(id, document).await? {
            Some(stored) => Ok(stored),
            None => self.insert(id, document).await,
        }
    }

    /// Merges `patch` into an existing record. Returns `None` if the record does not exist.
    ///
    /// # Errors
    /// Fails when a schema assertion rejects the merged document.
    pub async fn merge<T, P>(&self, id: &str, patch: &P) -> Result<Option<T>, DatabaseError>
    where
        T: DeserializeOwned,
        P: Serialize,
    {
        if !self.exists(id).await? {
            return Ok(None);
        }
        let content = to_content(patch)?;
        let sql = format!(
            "UPDATE type::thing($tb, $id) MERGE $content RETURN NONE;
            SELECT {PROJECTION} FROM type::thing($tb, $id);"
        );
        self.write_then_read(sql, id, content, "merge").await
    }

    /// Fetches a single record.
    ///
    /// # Errors
    /// Fails when the stored document does not match `T`.
    pub async fn get<T>(&self, id: &str) -> Result<Option<T>, DatabaseError>
    where
        T: DeserializeOwned,
    {
        self.db
            .query(format!("SELECT {PROJECTION} FROM type::thing($tb, $id);"))
            .bind(("tb", self.table))
            .bind(("id", id.to_owned()))
            .await
            .context(format!("Fetching {}:{id}", self.table))?
            .take::<Option<T>>(0)
            .context(format!("Decoding {}:{id}", self.table))
    }

    /// Fetches the records whose keys are listed in `ids`, in no particular order.
    ///
    /// # Errors
    /// Fails when a stored document does not match `T`.
    pub async fn get_many<T>(&self, ids: &[String]) -> Result<Vec<T>, DatabaseError>
    where
        T: DeserializeOwned,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.db
            .query(format!("SELECT {PROJECTION} FROM type::table($tb) WHERE record::id(id) IN $ids;"))
            .bind(("tb", self.table))
            .bind(("ids", ids.to_vec()))
            .await
            .context(format!("Fetching many from {}", self.table))?
            .take::<Vec<T>>(0)
            .context(format!("Decoding many from {}", self.table))
    }

    /// Returns `true` when a record is stored under `id`.
    ///
    /// # Errors
    /// Fails on engine errors.
    pub async fn exists(&self, id: &str) -> Result<bool, DatabaseError> {
        let found = self
            .db
            .query("SELECT VALUE record::id(id) FROM type::thing($tb, $id);")
            .bind(("tb", self.table))
            .bind(("id", id.to_owned()))
            .await
            .context(format!("Probing {}:{id}", self.table))?
            .take::<Option<String>>(0)
            .context(format!("Probing {}:{id}", self.table))?;
        Ok(found.is_some())
    }

    /// Lists records matching `query`.
    ///
    /// # Errors
    /// Fails when a stored document does not match `T`.
    pub async fn find<T>(&self, query: &Query) -> Result<Vec<T>, DatabaseError>
    where
        T: DeserializeOwned,
    {
        let mut request = self.db.query(query.select_statement()).bind(("tb", self.table));
        for (index, (_, value)) in query.filters.iter().enumerate() {
            request = request.bind((format!("f{index}"), value.clone()));
        }
        request
            .await
            .context(format!("Listing {}", self.table))?
            .take::<Vec<T>>(0)
            .context(format!("Decoding {}", self.table))
    }

    /// Returns the first record matching `query`.
    ///
    /// # Errors
    /// Fails when the stored document does not match `T`.
    pub async fn find_one<T>(&self, query: Query) -> Result<Option<T>, DatabaseError>
    where
        T: DeserializeOwned,
    {
        Ok(self.find(&query.limit(1)).await?.into_iter().next())
    }

    /// Counts records matching the filters of `query`; ordering and paging are ignored.
    ///
    /// # Errors
    /// Fails on engine errors.
    pub async fn count(&self, query: &Query) -> Result<u64, DatabaseError> {
        let mut request = self.db.query(query.count_statement()).bind(("tb", self.table));
        for (index, (_, value)) in query.filters.iter().enumerate() {
            request = request.bind((format!("f{index}"), value.clone()));
        }
        let total = request
            .await
            .context(format!("Counting {}", self.table))?
            .take::<Option<Total>>(0)
            .context(format!("Counting {}", self.table))?;
        Ok(total.map_or(0, |t| t.total))
    }

    /// Deletes a record. Returns `false` if nothing was stored under `id`.
    ///
    /// # Errors
    /// Fails on engine errors.
    pub async fn delete(&self, id: &str) -> Result<bool, DatabaseError> {
        if !self.exists(id).await? {
            return Ok(false);
        }
        self.db
            .query("DELETE type::thing($tb, $id) RETURN NONE;")
            .bind(("tb", self.table))
            .bind(("id", id.to_owned()))
            .await
            .context(format!("Deleting {}:{id}", self.table))?
            .check()
            .context(format!("Deleting {}:{id}", self.table))?;
        Ok(true)
    }

    async fn write_then_read<T>(
        &self,
        sql: String,
        id: &str,
        content: Value,
        operation: &'static str,
    ) -> Result<Option<T>, DatabaseError>
    where
        T: DeserializeOwned,
    {
        self.db
            .query(sql)
            .bind(("tb", self.table))
            .bind(("id", id.to_owned()))
            .bind(("content", content))
            .await
            .context(format!("{operation} {}:{id}", self.table))?
            .check()
            .context(format!("{operation} {}:{id}", self.table))?
            .take::<Option<T>>(1)
            .context(format!("Decoding {}:{id}", self.table))
    }
}

/// Serializes a document for storage, dropping the `id` field which lives in the record key.
fn to_content<T: Serialize>(document: &T) -> Result<Value, DatabaseError> {
    let mut content = serde_json::to_value(document).context("Encoding document")?;
    if let Value::Object(map) = &mut content {
        map.remove("id");
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_statement_binds_filters_in_order() {
        let query = Query::new()
            .filter("status", "new")
            .filter("isActive", true)
            .order_by("createdAt", Direction::Desc)
            .limit(20)
            .start(40);

        assert_eq!(
            query.select_statement(),
            "SELECT *, record::id(id) AS id FROM type::table($tb) \
             WHERE status = $f0 AND isActive = $f1 ORDER BY createdAt DESC LIMIT 20 START 40;"
        );
        assert_eq!(
            query.count_statement(),
            "SELECT count() AS total FROM type::table($tb) \
             WHERE status = $f0 AND isActive = $f1 GROUP ALL;"
        );
    }

    #[test]
    fn filter_opt_skips_missing_values() {
        let query = Query::new().filter_opt::<&str>("status", None);
        assert_eq!(query.where_clause(), "");
    }

    #[test]
    fn content_never_carries_the_id() {
        #[derive(Serialize)]
        struct Doc {
            id: &'static str,
            title: &'static str,
        }
        let content = to_content(&Doc { id: "abc", title: "Hello" }).unwrap();
        assert_eq!(content, serde_json::json!({ "title": "Hello" }));
    }
}
