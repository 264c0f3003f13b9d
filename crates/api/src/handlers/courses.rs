//! Handlers for the `/courses` resource.
//!
//! Create and replace take `multipart/form-data` so the icon file can
//! travel with the metadata and the page bodies. The course plus its
//! ordered pages is one unit of consistency; the repository writes it
//! in a single transaction.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use kplus_core::course::{validate_pages, validate_price, validate_title};
use kplus_core::error::CoreError;
use kplus_core::types::{DbId, Timestamp};
use kplus_db::models::course::{CourseInput, CourseListParams};
use kplus_db::repositories::{AccountRepo, CourseRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{icon_data_uri, page_text};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// One element of the multipart `pages` JSON array. Clients may send an
/// `order` key alongside `content`; it is ignored, since page numbers
/// come from list position.
#[derive(Debug, Deserialize)]
struct PageBody {
    content: String,
}

/// Metadata and page bodies parsed out of a create/replace multipart form.
struct CourseForm {
    input: CourseInput,
    pages: Vec<String>,
}

/// `{"id": ...}` payload for the create response.
#[derive(Debug, Serialize)]
pub struct CourseCreated {
    pub id: DbId,
}

/// One page in the detail response, UTF-8 decoded.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub page_number: i32,
    pub content: String,
}

/// Full course detail with resolved lookup labels and ordered pages.
#[derive(Debug, Serialize)]
pub struct CourseDetail {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Icon as a `data:image/png;base64,...` URI, or null.
    pub icon: Option<String>,
    pub author_id: DbId,
    pub monetization_type_id: DbId,
    pub monetization_label: String,
    pub price: Option<i64>,
    pub category_id: DbId,
    pub category_label: String,
    pub age_band_id: DbId,
    pub age_band_label: String,
    pub level_id: DbId,
    pub level_label: String,
    pub created_at: Timestamp,
    pub page_count: usize,
    pub pages: Vec<PageView>,
}

/// One course in the browse listing. No page bodies.
#[derive(Debug, Serialize)]
pub struct CourseSummary {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub monetization_type_id: DbId,
    pub monetization_label: String,
    pub price: Option<i64>,
    pub category_label: String,
    pub age_band_label: String,
    pub level_label: String,
    pub created_at: Timestamp,
}

/// Query parameters for the author listing.
#[derive(Debug, Deserialize)]
pub struct AuthorListParams {
    pub search: Option<String>,
}

/// One course in the author's own list.
#[derive(Debug, Serialize)]
pub struct AuthorCourse {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/courses (multipart)
///
/// Create a course with its ordered pages. The authenticated account
/// becomes the author.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<CourseCreated>>)> {
    let mut form = parse_course_form(multipart).await?;

    validate_title(&form.input.title)?;
    validate_pages(&form.pages)?;
    form.input.price = validate_price(form.input.monetization_type_id, form.input.price)?;

    let id = CourseRepo::create(&state.pool, auth.account_id, &form.input, &form.pages).await?;
    tracing::info!(id, author_id = auth.account_id, "Course created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CourseCreated { id },
        }),
    ))
}

/// PUT /api/v1/courses/{id} (multipart)
///
/// Replace a course's metadata and entire page set. Omitting the icon
/// file keeps the stored icon.
pub async fn replace(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<CourseCreated>>> {
    let mut form = parse_course_form(multipart).await?;

    validate_title(&form.input.title)?;
    validate_pages(&form.pages)?;
    form.input.price = validate_price(form.input.monetization_type_id, form.input.price)?;

    let replaced = CourseRepo::replace(&state.pool, id, &form.input, &form.pages).await?;
    if !replaced {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }));
    }

    tracing::info!(id, "Course replaced");
    Ok(Json(DataResponse {
        data: CourseCreated { id },
    }))
}

/// GET /api/v1/courses/{id}
///
/// Full course detail with resolved labels and ordered pages.
pub async fn get_detail(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CourseDetail>>> {
    let row = CourseRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;

    let pages: Vec<PageView> = CourseRepo::list_pages(&state.pool, id)
        .await?
        .into_iter()
        .map(|p| PageView {
            page_number: p.page_number,
            content: page_text(&p.content),
        })
        .collect();

    let detail = CourseDetail {
        id: row.id,
        title: row.title,
        description: row.description,
        icon: icon_data_uri(row.icon.as_deref()),
        author_id: row.author_id,
        monetization_type_id: row.monetization_type_id,
        monetization_label: row.monetization_label,
        price: row.price,
        category_id: row.category_id,
        category_label: row.category_label,
        age_band_id: row.age_band_id,
        age_band_label: row.age_band_label,
        level_id: row.level_id,
        level_label: row.level_label,
        created_at: row.created_at,
        page_count: pages.len(),
        pages,
    };

    Ok(Json(DataResponse { data: detail }))
}

/// GET /api/v1/courses
///
/// Browse/search listing. All filters optional; see
/// [`CourseListParams`] for the filter semantics.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CourseListParams>,
) -> AppResult<Json<DataResponse<Vec<CourseSummary>>>> {
    let items: Vec<CourseSummary> = CourseRepo::list_filtered(&state.pool, &params)
        .await?
        .into_iter()
        .map(|row| CourseSummary {
            id: row.id,
            title: row.title,
            description: row.description,
            icon: icon_data_uri(row.icon.as_deref()),
            monetization_type_id: row.monetization_type_id,
            monetization_label: row.monetization_label,
            price: row.price,
            category_label: row.category_label,
            age_band_label: row.age_band_label,
            level_label: row.level_label,
            created_at: row.created_at,
        })
        .collect();

    tracing::debug!(count = items.len(), "Listed courses");
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/courses/author/{author_id}
///
/// The author's own `(id, title, created_at)` list, newest first.
pub async fn list_by_author(
    State(state): State<AppState>,
    Path(author_id): Path<DbId>,
    Query(params): Query<AuthorListParams>,
) -> AppResult<Json<DataResponse<Vec<AuthorCourse>>>> {
    if !AccountRepo::exists(&state.pool, author_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Account",
            id: author_id,
        }));
    }

    let items: Vec<AuthorCourse> =
        CourseRepo::list_by_author(&state.pool, author_id, params.search.as_deref())
            .await?
            .into_iter()
            .map(|row| AuthorCourse {
                id: row.id,
                title: row.title,
                created_at: row.created_at,
            })
            .collect();
    Ok(Json(DataResponse { data: items }))
}

/// DELETE /api/v1/courses/{id}
///
/// Pages, favorites, payments, and tickets go with the course via FK
/// cascade.
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CourseRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, "Course deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Multipart parsing
// ---------------------------------------------------------------------------

/// Parse the create/replace multipart form into metadata and page bodies.
///
/// Fields: `title`, `description?`, `icon?` (file), `monetization_type_id`,
/// `price?`, `category_id`, `age_band_id`, `level_id`, `pages` (JSON
/// array of `{content}` objects). Unknown fields are ignored.
async fn parse_course_form(mut multipart: Multipart) -> AppResult<CourseForm> {
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut icon: Option<Vec<u8>> = None;
    let mut monetization_type_id: Option<DbId> = None;
    let mut price: Option<i64> = None;
    let mut category_id: Option<DbId> = None;
    let mut age_band_id: Option<DbId> = None;
    let mut level_id: Option<DbId> = None;
    let mut pages_json: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => title = Some(field_text(field, "title").await?),
            "description" => {
                let text = field_text(field, "description").await?;
                if !text.is_empty() {
                    description = Some(text);
                }
            }
            "icon" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                // An empty file part means "no icon uploaded".
                if !data.is_empty() {
                    icon = Some(data.to_vec());
                }
            }
            "monetization_type_id" => {
                monetization_type_id =
                    Some(field_id(field, "monetization_type_id").await?);
            }
            "price" => {
                let text = field_text(field, "price").await?;
                if !text.is_empty() {
                    price = Some(text.parse().map_err(|_| {
                        AppError::BadRequest("Field 'price' must be an integer".into())
                    })?);
                }
            }
            "category_id" => category_id = Some(field_id(field, "category_id").await?),
            "age_band_id" => age_band_id = Some(field_id(field, "age_band_id").await?),
            "level_id" => level_id = Some(field_id(field, "level_id").await?),
            "pages" => pages_json = Some(field_text(field, "pages").await?),
            _ => {} // ignore unknown fields
        }
    }

    let title = title.ok_or_else(|| missing("title"))?;
    let monetization_type_id = monetization_type_id.ok_or_else(|| missing("monetization_type_id"))?;
    let category_id = category_id.ok_or_else(|| missing("category_id"))?;
    let age_band_id = age_band_id.ok_or_else(|| missing("age_band_id"))?;
    let level_id = level_id.ok_or_else(|| missing("level_id"))?;
    let pages_json = pages_json.ok_or_else(|| missing("pages"))?;

    let bodies: Vec<PageBody> = serde_json::from_str(&pages_json)
        .map_err(|e| AppError::BadRequest(format!("Invalid 'pages' JSON: {e}")))?;
    let pages = bodies.into_iter().map(|p| p.content).collect();

    Ok(CourseForm {
        input: CourseInput {
            title,
            description,
            icon,
            monetization_type_id,
            price,
            category_id,
            age_band_id,
            level_id,
        },
        pages,
    })
}

/// Read a multipart field as text, naming the field on failure.
async fn field_text(field: axum::extract::multipart::Field<'_>, name: &str) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Field '{name}': {e}")))
}

/// Read a multipart field as a database id, naming the field on failure.
async fn field_id(field: axum::extract::multipart::Field<'_>, name: &str) -> AppResult<DbId> {
    field_text(field, name).await?.trim().parse().map_err(|_| {
        AppError::BadRequest(format!("Field '{name}' must be an integer id"))
    })
}

/// Build the error for a missing required multipart field.
fn missing(name: &str) -> AppError {
    AppError::BadRequest(format!("Missing required '{name}' field"))
}
