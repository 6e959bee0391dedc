//! Snippet repository implementation for PostgreSQL.
//!
//! Listings are keyset scans over the composite `(title, id)` ordering:
//! the cursor predicate is a row-value comparison, so rows sharing a
//! title are still totally ordered by id.

use async_trait::async_trait;
use sqlx::PgPool;

use quicksnip_core::error::StorageResult;
use quicksnip_core::models::{NewSnippet, Snippet, SnippetUpdate};
use quicksnip_core::ports::{
    Cursor, OrderDirection, Page, PageRequest, SeekFilter, SnippetFilter, SnippetRepository,
};

use super::helpers::map_query_err;

const SNIPPET_COLUMNS: &str =
    "id, title, markdown, description, tags, user_id, created_at, updated_at";

// =============================================================================
// Repository Implementation
// =============================================================================

/// PostgreSQL implementation of SnippetRepository.
pub struct PgSnippetRepository {
    pool: PgPool,
}

impl PgSnippetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnippetRepository for PgSnippetRepository {
    async fn insert_snippet(&self, snippet: &NewSnippet) -> StorageResult<Snippet> {
        let row = sqlx::query_as::<_, SnippetRow>(&format!(
            r#"
            INSERT INTO snippets (title, markdown, description, tags, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {SNIPPET_COLUMNS}
            "#,
        ))
        .bind(&snippet.title)
        .bind(&snippet.markdown)
        .bind(&snippet.description)
        .bind(&snippet.tags)
        .bind(snippet.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_query_err)?;

        Ok(row.into_snippet())
    }

    async fn get_snippet(&self, id: i64) -> StorageResult<Option<Snippet>> {
        let row = sqlx::query_as::<_, SnippetRow>(&format!(
            "SELECT {SNIPPET_COLUMNS} FROM snippets WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_query_err)?;

        Ok(row.map(SnippetRow::into_snippet))
    }

    async fn title_exists(&self, title: &str) -> StorageResult<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM snippets WHERE title = $1)")
                .bind(title)
                .fetch_one(&self.pool)
                .await
                .map_err(map_query_err)?;

        Ok(exists.0)
    }

    async fn update_snippet(
        &self,
        id: i64,
        user_id: i64,
        update: &SnippetUpdate,
    ) -> StorageResult<Option<Snippet>> {
        // Dynamic SET list. Column names and operators are hardcoded;
        // all values are bound parameters.
        let mut sets = vec!["updated_at = NOW()".to_string()];
        let mut idx = 1;

        if update.title.is_some() {
            sets.push(format!("title = ${idx}"));
            idx += 1;
        }
        if update.markdown.is_some() {
            sets.push(format!("markdown = ${idx}"));
            idx += 1;
        }
        if update.description.is_some() {
            sets.push(format!("description = ${idx}"));
            idx += 1;
        }
        if update.tags.is_some() {
            sets.push(format!("tags = ${idx}"));
            idx += 1;
        }

        let query = format!(
            r#"
            UPDATE snippets
            SET {}
            WHERE id = ${idx} AND user_id = ${}
            RETURNING {SNIPPET_COLUMNS}
            "#,
            sets.join(", "),
            idx + 1,
        );

        let mut q = sqlx::query_as::<_, SnippetRow>(&query);
        if let Some(ref title) = update.title {
            q = q.bind(title);
        }
        if let Some(ref markdown) = update.markdown {
            q = q.bind(markdown);
        }
        if let Some(ref description) = update.description {
            q = q.bind(description);
        }
        if let Some(ref tags) = update.tags {
            q = q.bind(tags);
        }

        let row = q
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_query_err)?;

        Ok(row.map(SnippetRow::into_snippet))
    }

    async fn delete_snippet(&self, id: i64, user_id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM snippets WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_query_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_snippets(
        &self,
        filter: SnippetFilter,
        page: PageRequest,
    ) -> StorageResult<Page<Snippet>> {
        // Build the WHERE clause. Column names and operators are
        // hardcoded; the seek direction comes from an enum; every value
        // is a bound parameter.
        let mut conditions = Vec::new();
        let mut idx = 1;

        let domain_condition = match &filter {
            SnippetFilter::All => None,
            SnippetFilter::Author(_) => {
                let c = format!("user_id = ${idx}");
                idx += 1;
                Some(c)
            }
            SnippetFilter::TagsAny(tags) if !tags.is_empty() => {
                let ors: Vec<String> = tags
                    .iter()
                    .map(|_| {
                        let c = format!("tags ILIKE ${idx}");
                        idx += 1;
                        c
                    })
                    .collect();
                Some(format!("({})", ors.join(" OR ")))
            }
            SnippetFilter::TagsAny(_) => None,
            SnippetFilter::TitlePrefix(_) => {
                let c = format!("title ILIKE ${idx}");
                idx += 1;
                Some(c)
            }
        };
        if let Some(c) = &domain_condition {
            conditions.push(c.clone());
        }

        let seek = page.seek();
        let op = match page.direction {
            OrderDirection::Asc => ">",
            OrderDirection::Desc => "<",
        };
        match &seek {
            SeekFilter::None => {}
            SeekFilter::IdBeyond(_) => {
                conditions.push(format!("id {op} ${idx}"));
            }
            SeekFilter::KeyBeyond { .. } => {
                // Row-value comparison: strict total order even when
                // titles collide.
                conditions.push(format!("(title, id) {op} (${idx}, ${})", idx + 1));
            }
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let order = page.direction.sql();

        let query = format!(
            "SELECT {SNIPPET_COLUMNS} FROM snippets {where_clause} \
             ORDER BY title {order}, id {order} LIMIT {}",
            page.fetch_limit(),
        );

        let mut q = sqlx::query_as::<_, SnippetRow>(&query);
        q = match &filter {
            SnippetFilter::All => q,
            SnippetFilter::Author(user_id) => q.bind(*user_id),
            SnippetFilter::TagsAny(tags) => tags
                .iter()
                .fold(q, |q, tag| q.bind(format!("%{}%", tag.trim()))),
            SnippetFilter::TitlePrefix(prefix) => q.bind(format!("{prefix}%")),
        };
        q = match &seek {
            SeekFilter::None => q,
            SeekFilter::IdBeyond(id) => q.bind(*id),
            SeekFilter::KeyBeyond { key, id } => q.bind(key.clone()).bind(*id),
        };

        let rows: Vec<SnippetRow> = q.fetch_all(&self.pool).await.map_err(map_query_err)?;

        // Total count uses the domain predicate only, never the cursor.
        let count_where = match &domain_condition {
            Some(c) => format!("WHERE {c}"),
            None => String::new(),
        };
        let count_query = format!("SELECT COUNT(*) FROM snippets {count_where}");
        let mut count_q = sqlx::query_scalar::<_, i64>(&count_query);
        count_q = match &filter {
            SnippetFilter::All => count_q,
            SnippetFilter::Author(user_id) => count_q.bind(*user_id),
            SnippetFilter::TagsAny(tags) => tags
                .iter()
                .fold(count_q, |q, tag| q.bind(format!("%{}%", tag.trim()))),
            SnippetFilter::TitlePrefix(prefix) => count_q.bind(format!("{prefix}%")),
        };
        let total_count = count_q.fetch_one(&self.pool).await.map_err(map_query_err)?;

        let snippets: Vec<Snippet> = rows.into_iter().map(SnippetRow::into_snippet).collect();

        Ok(Page::assemble(snippets, page.limit, total_count, |s| {
            Cursor::keyed(s.id, s.title.clone())
        }))
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

#[derive(sqlx::FromRow)]
struct SnippetRow {
    id: i64,
    title: String,
    markdown: String,
    description: Option<String>,
    tags: Option<String>,
    user_id: Option<i64>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl SnippetRow {
    fn into_snippet(self) -> Snippet {
        Snippet {
            id: self.id,
            title: self.title,
            markdown: self.markdown,
            description: self.description,
            tags: self.tags,
            user_id: self.user_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
