//! Translates changelist query parameters into SQL conditions.
//!
//! Search terms follow the admin convention: the `q` value is split on
//! whitespace (double quotes keep a phrase together) and every term must
//! match at least one search field. Relation paths such as
//! `creative__user__username` become nested `IN (SELECT id ...)` subqueries.

use chrono::NaiveDate;
use sea_orm::sea_query::{Alias, Expr, Func, LikeExpr, Query, SimpleExpr};
use sea_orm::Condition;

use super::registry::{column_for, foreign_key, FilterKind, ListFilter, ModelAdmin, ModelKind};
use crate::errors::ServiceError;

/// Query-string keys consumed by the changelist itself.
pub const SEARCH_VAR: &str = "q";
pub const PAGE_VAR: &str = "p";

fn qualified(model: ModelKind, column: &str) -> Expr {
    Expr::col((Alias::new(model.table_name()), Alias::new(column)))
}

/// Splits a search string into terms, keeping `"quoted phrases"` intact.
pub fn split_terms(query: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in query.chars() {
        match ch {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    terms.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        terms.push(current);
    }
    terms
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Case-insensitive containment on `path`, following relations through subqueries.
fn contains_expr(model: ModelKind, path: &[&str], term: &str) -> Result<SimpleExpr, ServiceError> {
    match path {
        [] => Err(ServiceError::InternalError(format!(
            "empty search path on {}",
            model.slug()
        ))),
        [field] => {
            let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
            Ok(Expr::expr(Func::lower(qualified(model, field)))
                .like(LikeExpr::new(pattern).escape('\\')))
        }
        [relation, rest @ ..] => {
            let fk = foreign_key(model, relation).ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "`{}` is not a relation on {}",
                    relation,
                    model.slug()
                ))
            })?;
            let inner = contains_expr(fk.target, rest, term)?;
            let target = Alias::new(fk.target.table_name());
            let subquery = Query::select()
                .column((target.clone(), Alias::new("id")))
                .from(target)
                .and_where(inner)
                .to_owned();
            Ok(qualified(model, fk.column).in_subquery(subquery))
        }
    }
}

/// Builds the search condition for `query`, or `None` when it has no terms.
pub fn search_condition(admin: &ModelAdmin, query: &str) -> Result<Option<Condition>, ServiceError> {
    let terms = split_terms(query);
    if terms.is_empty() || admin.search_fields.is_empty() {
        return Ok(None);
    }

    let mut all = Condition::all();
    for term in &terms {
        let mut any = Condition::any();
        for field in admin.search_fields {
            let path: Vec<&str> = field.split("__").collect();
            any = any.add(contains_expr(admin.model, &path, term)?);
        }
        all = all.add(any);
    }
    Ok(Some(all))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ServiceError> {
    match value {
        "1" | "true" | "True" => Ok(true),
        "0" | "false" | "False" => Ok(false),
        _ => Err(ServiceError::BadRequest(format!(
            "Invalid boolean `{}` for `{}`",
            value, key
        ))),
    }
}

fn parse_date(key: &str, value: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ServiceError::BadRequest(format!("Invalid date `{}` for `{}`", value, key))
    })
}

fn parse_id(key: &str, value: &str) -> Result<i32, ServiceError> {
    value
        .parse()
        .map_err(|_| ServiceError::BadRequest(format!("Invalid id `{}` for `{}`", value, key)))
}

/// Matches `key` against one declared filter and returns its expression.
fn filter_expr(
    model: ModelKind,
    filter: &ListFilter,
    lookup: &str,
    key: &str,
    value: &str,
) -> Result<Option<SimpleExpr>, ServiceError> {
    let column = qualified(model, column_for(model, filter.field));

    let expr = match (filter.kind, lookup) {
        (FilterKind::Choice, "exact") => column.eq(value),
        (FilterKind::Boolean, "exact") => column.eq(parse_bool(key, value)?),
        (FilterKind::Related, "id__exact") => column.eq(parse_id(key, value)?),
        (FilterKind::Related, "isnull")
            if foreign_key(model, filter.field).is_some_and(|fk| fk.nullable) =>
        {
            if parse_bool(key, value)? {
                column.is_null()
            } else {
                column.is_not_null()
            }
        }
        (FilterKind::Date, "gte") => column.gte(parse_date(key, value)?),
        (FilterKind::Date, "lt") => column.lt(parse_date(key, value)?),
        _ => return Ok(None),
    };
    Ok(Some(expr))
}

/// Keeps the last value given for each key, in first-seen key order.
fn last_values(params: &[(String, String)]) -> Vec<(&str, &str)> {
    let mut latest: Vec<(&str, &str)> = Vec::with_capacity(params.len());
    for (key, value) in params {
        match latest.iter_mut().find(|(seen, _)| *seen == key.as_str()) {
            Some(entry) => entry.1 = value.as_str(),
            None => latest.push((key.as_str(), value.as_str())),
        }
    }
    latest
}

/// Builds the filter condition from every non-reserved parameter.
///
/// Unknown parameters are rejected rather than ignored so a typo never
/// silently widens the result set. A repeated key uses its last value.
pub fn filter_condition(
    admin: &ModelAdmin,
    params: &[(String, String)],
) -> Result<Condition, ServiceError> {
    let mut condition = Condition::all();

    for (key, value) in last_values(params) {
        if key == SEARCH_VAR || key == PAGE_VAR {
            continue;
        }

        let mut matched = None;
        for filter in admin.list_filter {
            let Some(lookup) = key
                .strip_prefix(filter.field)
                .and_then(|rest| rest.strip_prefix("__"))
            else {
                continue;
            };
            matched = filter_expr(admin.model, filter, lookup, key, value)?;
            if matched.is_some() {
                break;
            }
        }

        match matched {
            Some(expr) => condition = condition.add(expr),
            None => {
                return Err(ServiceError::BadRequest(format!(
                    "Unsupported lookup `{}` for {}",
                    key,
                    admin.model.slug()
                )))
            }
        }
    }

    Ok(condition)
}
