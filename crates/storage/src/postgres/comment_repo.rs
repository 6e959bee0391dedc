//! Comment repository implementation for PostgreSQL.
//!
//! Comment listings order by `(created_at, id)` and seek on bare id:
//! ids are assigned in creation order, so the id-seek agrees with the
//! composite ordering while keeping the wire cursor a single integer.

use async_trait::async_trait;
use sqlx::PgPool;

use quicksnip_core::error::StorageResult;
use quicksnip_core::models::{Comment, CommentView, NewComment};
use quicksnip_core::ports::{
    CommentRepository, Cursor, OrderDirection, Page, PageRequest, SeekFilter,
};

use super::helpers::map_query_err;

// =============================================================================
// Repository Implementation
// =============================================================================

/// PostgreSQL implementation of CommentRepository.
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn insert_comment(&self, comment: &NewComment) -> StorageResult<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (snippet_id, user_id, comment)
            VALUES ($1, $2, $3)
            RETURNING id, snippet_id, user_id, comment, created_at, updated_at
            "#,
        )
        .bind(comment.snippet_id)
        .bind(comment.user_id)
        .bind(&comment.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(map_query_err)?;

        Ok(row.into_comment())
    }

    async fn list_comments(
        &self,
        snippet_id: i64,
        page: PageRequest,
    ) -> StorageResult<Page<CommentView>> {
        let seek = page.seek();
        let op = match page.direction {
            OrderDirection::Asc => ">",
            OrderDirection::Desc => "<",
        };

        let seek_clause = match &seek {
            SeekFilter::None => String::new(),
            // Cursor keys never reach comment scans; the seek is id-only.
            SeekFilter::IdBeyond(_) | SeekFilter::KeyBeyond { .. } => {
                format!("AND c.id {op} $2")
            }
        };
        let order = page.direction.sql();

        let query = format!(
            r#"
            SELECT c.id, c.comment, c.user_id, c.snippet_id,
                   u.username, u.avatar_url, c.created_at
            FROM comments c
            LEFT JOIN users u ON c.user_id = u.id
            WHERE c.snippet_id = $1 {seek_clause}
            ORDER BY c.created_at {order}, c.id {order}
            LIMIT {}
            "#,
            page.fetch_limit(),
        );

        let mut q = sqlx::query_as::<_, CommentViewRow>(&query).bind(snippet_id);
        q = match &seek {
            SeekFilter::None => q,
            SeekFilter::IdBeyond(id) => q.bind(*id),
            SeekFilter::KeyBeyond { id, .. } => q.bind(*id),
        };

        let rows: Vec<CommentViewRow> = q.fetch_all(&self.pool).await.map_err(map_query_err)?;

        // Total count uses the domain predicate only, never the cursor.
        let total_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE snippet_id = $1")
                .bind(snippet_id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_query_err)?;

        let comments: Vec<CommentView> = rows.into_iter().map(CommentViewRow::into_view).collect();

        Ok(Page::assemble(comments, page.limit, total_count, |c| {
            Cursor::by_id(c.id)
        }))
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    snippet_id: i64,
    user_id: Option<i64>,
    comment: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            id: self.id,
            snippet_id: self.snippet_id,
            user_id: self.user_id,
            comment: self.comment,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentViewRow {
    id: i64,
    comment: String,
    user_id: Option<i64>,
    snippet_id: i64,
    username: Option<String>,
    avatar_url: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl CommentViewRow {
    fn into_view(self) -> CommentView {
        CommentView {
            id: self.id,
            comment: self.comment,
            commented_by: self.user_id,
            commented_on: self.snippet_id,
            username: self.username,
            user_avatar: self.avatar_url,
            created_at: self.created_at,
        }
    }
}
