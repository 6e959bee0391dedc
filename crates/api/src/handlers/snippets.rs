//! Snippet CRUD and feed handlers.
//!
//! All feeds share the same keyset pagination over `(title, id)` and the
//! same response payload: `snippets`, `totalSnippets`, `limit`, and a
//! `nextCursor` object (or null on the last page) the client replays as
//! `cursorId`/`cursorKey` query parameters. `totalSnippets` always counts
//! the whole filtered set, independent of the cursor position.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use quicksnip_core::models::{NewSnippet, Snippet, SnippetUpdate};
use quicksnip_core::ports::{Cursor, Page, SnippetFilter};
use quicksnip_core::validate;

use crate::error::{ApiError, ApiResult, SuccessBody};
use crate::extract::{AuthUser, SnippetPageParams, ValidatedQuery};
use crate::state::AppState;

// =============================================================================
// Payloads
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateSnippetRequest {
    pub title: String,
    pub markdown: String,
    pub description: Option<String>,
    pub tags: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSnippetRequest {
    pub title: Option<String>,
    pub markdown: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TagsQuery {
    pub tags: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// `nextCursor` as it appears on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireCursor {
    cursor_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    cursor_key: Option<String>,
}

impl From<Cursor> for WireCursor {
    fn from(cursor: Cursor) -> Self {
        Self {
            cursor_id: cursor.id,
            cursor_key: cursor.key,
        }
    }
}

fn feed_response(page: Page<Snippet>) -> Response {
    SuccessBody::new(
        "Snippets retrieved successfully",
        json!({
            "totalSnippets": page.total_count,
            "snippets": page.items,
            "nextCursor": page.next_cursor.map(WireCursor::from),
            "limit": page.limit,
        }),
    )
    .into_response()
}

// =============================================================================
// CRUD Handlers
// =============================================================================

/// `POST /api/snippets`
pub async fn create(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(body): Json<CreateSnippetRequest>,
) -> ApiResult<Response> {
    validate::snippet_title(&body.title)?;
    validate::snippet_markdown(&body.markdown)?;
    if let Some(description) = &body.description {
        validate::snippet_description(description)?;
    }
    if let Some(tags) = &body.tags {
        validate::snippet_tags(tags)?;
    }

    // Fast-path check; the unique index still backstops a racing insert.
    if state.repos.snippets().title_exists(&body.title).await? {
        return Err(ApiError::Duplicate("Snippet title already exists".into()));
    }

    let snippet = state
        .repos
        .snippets()
        .insert_snippet(&NewSnippet {
            title: body.title,
            markdown: body.markdown,
            description: body.description,
            tags: body.tags,
            user_id: identity.id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        SuccessBody::new(
            "Snippet created successfully",
            json!({ "snippet": snippet }),
        ),
    )
        .into_response())
}

/// `GET /api/snippets/{id}`
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    let snippet = state
        .repos
        .snippets()
        .get_snippet(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Snippet not found".into()))?;

    Ok(SuccessBody::new(
        "Snippet retrieved successfully",
        json!({ "snippet": snippet }),
    )
    .into_response())
}

/// `PUT /api/snippets/{id}`
pub async fn update(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<UpdateSnippetRequest>,
) -> ApiResult<Response> {
    if body.title.is_none()
        && body.markdown.is_none()
        && body.description.is_none()
        && body.tags.is_none()
    {
        return Err(ApiError::Validation("No fields to update".into()));
    }

    if let Some(title) = &body.title {
        validate::snippet_title(title)?;
    }
    if let Some(markdown) = &body.markdown {
        validate::snippet_markdown(markdown)?;
    }
    if let Some(description) = &body.description {
        validate::snippet_description(description)?;
    }
    if let Some(tags) = &body.tags {
        validate::snippet_tags(tags)?;
    }

    let update = SnippetUpdate {
        title: body.title,
        markdown: body.markdown,
        description: body.description,
        tags: body.tags,
    };

    match state
        .repos
        .snippets()
        .update_snippet(id, identity.id, &update)
        .await?
    {
        Some(snippet) => Ok(SuccessBody::new(
            "Snippet updated successfully",
            json!({ "snippet": snippet }),
        )
        .into_response()),
        None => Err(missing_or_foreign(&state, id).await?),
    }
}

/// `DELETE /api/snippets/{id}`
pub async fn remove(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    if state.repos.snippets().delete_snippet(id, identity.id).await? {
        Ok(SuccessBody::new("Snippet deleted successfully", json!(null)).into_response())
    } else {
        Err(missing_or_foreign(&state, id).await?)
    }
}

/// Distinguish 404 from 403 after an owner-scoped write matched nothing.
async fn missing_or_foreign(state: &AppState, id: i64) -> ApiResult<ApiError> {
    Ok(match state.repos.snippets().get_snippet(id).await? {
        Some(_) => ApiError::Forbidden("You can only modify your own snippets".into()),
        None => ApiError::NotFound("Snippet not found".into()),
    })
}

// =============================================================================
// Feed Handlers
// =============================================================================

/// `GET /api/snippets/random` - the public feed.
pub async fn random_feed(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<SnippetPageParams>,
) -> ApiResult<Response> {
    let page = state
        .repos
        .snippets()
        .list_snippets(SnippetFilter::All, params.into_page_request()?)
        .await?;
    Ok(feed_response(page))
}

/// `GET /api/snippets/me` - the caller's own snippets.
pub async fn my_snippets(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    ValidatedQuery(params): ValidatedQuery<SnippetPageParams>,
) -> ApiResult<Response> {
    let page = state
        .repos
        .snippets()
        .list_snippets(
            SnippetFilter::Author(identity.id),
            params.into_page_request()?,
        )
        .await?;
    Ok(feed_response(page))
}

/// `GET /api/snippets/user/{userId}` - one author's public snippets.
pub async fn user_snippets(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    ValidatedQuery(params): ValidatedQuery<SnippetPageParams>,
) -> ApiResult<Response> {
    let page = state
        .repos
        .snippets()
        .list_snippets(SnippetFilter::Author(user_id), params.into_page_request()?)
        .await?;
    Ok(feed_response(page))
}

/// `GET /api/snippets/tags?tags=rust,axum` - snippets matching any of the
/// comma-separated tag fragments.
pub async fn tag_feed(
    State(state): State<AppState>,
    ValidatedQuery(tags): ValidatedQuery<TagsQuery>,
    ValidatedQuery(params): ValidatedQuery<SnippetPageParams>,
) -> ApiResult<Response> {
    let tags: Vec<String> = tags
        .tags
        .unwrap_or_default()
        .split(',')
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();
    if tags.is_empty() {
        return Err(ApiError::Validation(
            "tags query parameter is required".into(),
        ));
    }

    let page = state
        .repos
        .snippets()
        .list_snippets(SnippetFilter::TagsAny(tags), params.into_page_request()?)
        .await?;
    Ok(feed_response(page))
}

/// `GET /api/snippets/search?q=prefix` - title prefix search.
pub async fn search(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<SearchQuery>,
    ValidatedQuery(params): ValidatedQuery<SnippetPageParams>,
) -> ApiResult<Response> {
    let prefix = query.q.unwrap_or_default();
    if prefix.trim().is_empty() {
        return Err(ApiError::Validation("q query parameter is required".into()));
    }

    let page = state
        .repos
        .snippets()
        .list_snippets(
            SnippetFilter::TitlePrefix(prefix),
            params.into_page_request()?,
        )
        .await?;
    Ok(feed_response(page))
}
