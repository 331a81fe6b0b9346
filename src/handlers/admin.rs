use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
    routing::get,
    Json, Router,
};
use tracing::info;

use crate::{
    admin::{self, registry, ChangeList, ChangeListParams, ModelAdmin, ObjectDetail},
    errors::ServiceError,
    AppState,
};

fn resolve_admin(app_label: &str, model: &str) -> Result<&'static ModelAdmin, ServiceError> {
    if app_label != admin::APP_LABEL {
        return Err(ServiceError::NotFound(format!(
            "Unknown app `{}`",
            app_label
        )));
    }
    registry::get(model)
        .ok_or_else(|| ServiceError::NotFound(format!("Unknown model `{}`", model)))
}

async fn redirect_to_index() -> impl IntoResponse {
    Redirect::permanent("/admin/")
}

/// Lists the registered models.
pub async fn admin_index() -> Json<admin::AdminIndex> {
    Json(admin::index())
}

/// Filtered, searchable listing of one model.
pub async fn changelist_view(
    State(state): State<AppState>,
    Path((app_label, model)): Path<(String, String)>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Json<ChangeList>, ServiceError> {
    let model_admin = resolve_admin(&app_label, &model)?;
    let params = ChangeListParams::from_query(query)?;

    let changelist = admin::changelist::changelist(&state.db, model_admin, &params).await?;
    info!(
        model = %model,
        page = params.page,
        total = changelist.pagination.total,
        "admin changelist served"
    );
    Ok(Json(changelist))
}

/// A single object by primary key.
pub async fn detail_view(
    State(state): State<AppState>,
    Path((app_label, model, id)): Path<(String, String, String)>,
) -> Result<Json<ObjectDetail>, ServiceError> {
    let model_admin = resolve_admin(&app_label, &model)?;
    // An id that cannot be a primary key simply matches no object.
    let id: i32 = id.parse().map_err(|_| {
        ServiceError::NotFound(format!(
            "{} with ID `{}` not found",
            model_admin.model.verbose_name(),
            id
        ))
    })?;
    let detail = admin::changelist::detail(&state.db, model_admin.model, id).await?;
    Ok(Json(detail))
}

/// Admin site routes, mounted at `/admin/`.
///
/// Registered with full paths so the trailing slashes survive; `/admin`
/// without one redirects to the index.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(redirect_to_index))
        .route("/admin/", get(admin_index))
        .route("/admin/{app_label}/{model}/", get(changelist_view))
        .route("/admin/{app_label}/{model}/{id}/", get(detail_view))
}
