//! Comment handlers.
//!
//! Comment listings paginate by id alone: ids are assigned in creation
//! order, so `(created_at, id)` ordering and an id-only cursor agree.
//! Unlike snippet feeds, the payload carries an explicit `hasNextPage`
//! flag alongside `nextCursor`.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;

use quicksnip_core::models::NewComment;
use quicksnip_core::validate;

use crate::error::{ApiError, ApiResult, SuccessBody};
use crate::extract::{AuthUser, CommentPageParams, ValidatedQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PostCommentRequest {
    pub comment: String,
}

async fn ensure_snippet_exists(state: &AppState, snippet_id: i64) -> ApiResult<()> {
    if state.repos.snippets().get_snippet(snippet_id).await?.is_none() {
        return Err(ApiError::NotFound(format!(
            "no snippet found with this snippet id : {snippet_id}"
        )));
    }
    Ok(())
}

/// `POST /api/comment/{snippetId}`
pub async fn post_comment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(snippet_id): Path<i64>,
    Json(body): Json<PostCommentRequest>,
) -> ApiResult<Response> {
    ensure_snippet_exists(&state, snippet_id).await?;
    validate::comment(&body.comment)?;

    state
        .repos
        .comments()
        .insert_comment(&NewComment {
            snippet_id,
            user_id: identity.id,
            comment: body.comment,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        SuccessBody::new("comment posted", json!(null)),
    )
        .into_response())
}

/// `GET /api/comment/{snippetId}`
pub async fn list(
    State(state): State<AppState>,
    Path(snippet_id): Path<i64>,
    ValidatedQuery(params): ValidatedQuery<CommentPageParams>,
) -> ApiResult<Response> {
    let page_request = params.into_page_request()?;

    // Only the first page pays for the existence check; later pages
    // already hold a cursor proving the snippet was there.
    if page_request.cursor.is_none() {
        ensure_snippet_exists(&state, snippet_id).await?;
    }

    let page = state
        .repos
        .comments()
        .list_comments(snippet_id, page_request)
        .await?;

    Ok(SuccessBody::new(
        "comments retrieved successfully",
        json!({
            "totalComments": page.total_count,
            "comments": page.items,
            "nextCursor": page
                .next_cursor
                .map(|cursor| json!({ "cursorId": cursor.id })),
            "hasNextPage": page.has_next_page,
            "limit": page.limit,
        }),
    )
    .into_response())
}
