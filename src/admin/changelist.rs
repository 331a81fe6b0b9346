use sea_orm::{
    Condition, EntityTrait, Iterable, PaginatorTrait, PrimaryKeyToColumn, PrimaryKeyTrait,
    QueryFilter, QueryOrder,
};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::lookups::{filter_condition, search_condition, PAGE_VAR, SEARCH_VAR};
use super::registry::{column_for, FilterKind, ModelAdmin, ModelKind};
use crate::db::DbPool;
use crate::errors::ServiceError;
use crate::handlers::common::PaginationMeta;
use crate::models::{
    booking, creative_profile, industry_category, order, product, service_package, sub_category,
    user, DisplayName,
};

/// Rows shown per changelist page.
pub const LIST_PER_PAGE: u64 = 100;

/// Parsed changelist query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeListParams {
    pub search: Option<String>,
    pub page: u64,
    pub filters: Vec<(String, String)>,
}

impl ChangeListParams {
    pub fn from_query(params: Vec<(String, String)>) -> Result<Self, ServiceError> {
        let mut parsed = Self {
            page: 1,
            ..Default::default()
        };

        for (key, value) in params {
            match key.as_str() {
                SEARCH_VAR => parsed.search = Some(value),
                PAGE_VAR => {
                    parsed.page = value
                        .parse::<u64>()
                        .ok()
                        .filter(|page| *page >= 1)
                        .ok_or_else(|| {
                            ServiceError::BadRequest(format!("Invalid page `{}`", value))
                        })?;
                }
                _ => parsed.filters.push((key, value)),
            }
        }
        Ok(parsed)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterInfo {
    pub field: &'static str,
    pub kind: FilterKind,
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangeListRow {
    pub pk: i64,
    pub values: Vec<Value>,
}

/// A rendered changelist page.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeList {
    pub model: &'static str,
    pub verbose_name_plural: &'static str,
    pub columns: &'static [&'static str],
    pub search_fields: &'static [&'static str],
    pub filters: Vec<FilterInfo>,
    pub query: Option<String>,
    pub rows: Vec<ChangeListRow>,
    pub pagination: PaginationMeta,
}

/// One stored object, as shown on its detail page.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectDetail {
    pub model: &'static str,
    pub pk: i32,
    pub display: String,
    pub fields: Value,
}

fn filter_parameters(model: ModelKind, field: &'static str, kind: FilterKind) -> Vec<String> {
    match kind {
        FilterKind::Choice | FilterKind::Boolean => vec![format!("{}__exact", field)],
        FilterKind::Related => {
            let mut params = vec![format!("{}__id__exact", field)];
            if super::registry::foreign_key(model, field).is_some_and(|fk| fk.nullable) {
                params.push(format!("{}__isnull", field));
            }
            params
        }
        FilterKind::Date => vec![format!("{}__gte", field), format!("{}__lt", field)],
    }
}

fn to_row(admin: &ModelAdmin, value: Value) -> ChangeListRow {
    let pk = value.get("id").and_then(Value::as_i64).unwrap_or_default();
    let values = admin
        .list_display
        .iter()
        .map(|field| {
            value
                .get(column_for(admin.model, *field))
                .cloned()
                .unwrap_or(Value::Null)
        })
        .collect();
    ChangeListRow { pk, values }
}

/// Counts the matching rows first and only fetches a page that exists, so
/// the offset handed to the database always fits.
async fn fetch_page<E>(
    db: &DbPool,
    condition: Condition,
    page: u64,
) -> Result<Option<(Vec<Value>, PaginationMeta)>, ServiceError>
where
    E: EntityTrait,
    E::Model: Serialize + Send + Sync,
{
    let mut select = E::find().filter(condition);
    for key in E::PrimaryKey::iter() {
        select = select.order_by_desc(key.into_column());
    }

    let paginator = select.paginate(db, LIST_PER_PAGE);
    let total = paginator.num_items().await?;
    let pagination = PaginationMeta::new(page, LIST_PER_PAGE, total);
    if page > 1 && page > pagination.total_pages {
        return Ok(None);
    }

    let values = paginator
        .fetch_page(page - 1)
        .await?
        .into_iter()
        .map(|model| serde_json::to_value(model).map_err(|e| ServiceError::InternalError(e.to_string())))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some((values, pagination)))
}

async fn fetch_one<E>(db: &DbPool, id: i32) -> Result<Option<(String, Value)>, ServiceError>
where
    E: EntityTrait,
    E::Model: Serialize + DisplayName,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    let Some(model) = E::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let fields =
        serde_json::to_value(&model).map_err(|e| ServiceError::InternalError(e.to_string()))?;
    Ok(Some((model.display_name(), fields)))
}

/// Runs a filtered, searched and paginated listing for `admin`.
pub async fn changelist(
    db: &DbPool,
    admin: &'static ModelAdmin,
    params: &ChangeListParams,
) -> Result<ChangeList, ServiceError> {
    let mut condition = filter_condition(admin, &params.filters)?;
    if let Some(search) = params
        .search
        .as_deref()
        .map(|q| search_condition(admin, q))
        .transpose()?
        .flatten()
    {
        condition = condition.add(search);
    }

    let page = params.page;
    debug!(model = admin.model.slug(), page, "building changelist");

    let fetched = match admin.model {
        ModelKind::User => fetch_page::<user::Entity>(db, condition, page).await?,
        ModelKind::IndustryCategory => {
            fetch_page::<industry_category::Entity>(db, condition, page).await?
        }
        ModelKind::SubCategory => fetch_page::<sub_category::Entity>(db, condition, page).await?,
        ModelKind::CreativeProfile => {
            fetch_page::<creative_profile::Entity>(db, condition, page).await?
        }
        ModelKind::ServicePackage => {
            fetch_page::<service_package::Entity>(db, condition, page).await?
        }
        ModelKind::Product => fetch_page::<product::Entity>(db, condition, page).await?,
        ModelKind::Booking => fetch_page::<booking::Entity>(db, condition, page).await?,
        ModelKind::Order => fetch_page::<order::Entity>(db, condition, page).await?,
    };

    let (values, pagination) = fetched.ok_or_else(|| {
        ServiceError::NotFound(format!(
            "Page {} of {} does not exist",
            page,
            admin.model.verbose_name_plural()
        ))
    })?;

    Ok(ChangeList {
        model: admin.model.slug(),
        verbose_name_plural: admin.model.verbose_name_plural(),
        columns: admin.list_display,
        search_fields: admin.search_fields,
        filters: admin
            .list_filter
            .iter()
            .map(|f| FilterInfo {
                field: f.field,
                kind: f.kind,
                parameters: filter_parameters(admin.model, f.field, f.kind),
            })
            .collect(),
        query: params.search.clone(),
        rows: values.into_iter().map(|value| to_row(admin, value)).collect(),
        pagination,
    })
}

/// Loads a single object by primary key.
pub async fn detail(db: &DbPool, model: ModelKind, id: i32) -> Result<ObjectDetail, ServiceError> {
    let found = match model {
        ModelKind::User => fetch_one::<user::Entity>(db, id).await?,
        ModelKind::IndustryCategory => fetch_one::<industry_category::Entity>(db, id).await?,
        ModelKind::SubCategory => fetch_one::<sub_category::Entity>(db, id).await?,
        ModelKind::CreativeProfile => fetch_one::<creative_profile::Entity>(db, id).await?,
        ModelKind::ServicePackage => fetch_one::<service_package::Entity>(db, id).await?,
        ModelKind::Product => fetch_one::<product::Entity>(db, id).await?,
        ModelKind::Booking => fetch_one::<booking::Entity>(db, id).await?,
        ModelKind::Order => fetch_one::<order::Entity>(db, id).await?,
    };

    let (display, fields) = found.ok_or_else(|| {
        ServiceError::NotFound(format!("{} with ID {} not found", model.verbose_name(), id))
    })?;

    Ok(ObjectDetail {
        model: model.slug(),
        pk: id,
        display,
        fields,
    })
}
