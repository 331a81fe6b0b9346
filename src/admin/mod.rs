//! Read-only administration site.
//!
//! [`registry`] declares which columns, filters and search fields each model
//! exposes; [`lookups`] turns query parameters into SQL; [`changelist`] runs
//! the listing and detail queries.

pub mod changelist;
pub mod lookups;
pub mod registry;

use serde::Serialize;

pub use changelist::{ChangeList, ChangeListParams, ObjectDetail, LIST_PER_PAGE};
pub use registry::{ModelAdmin, ModelKind, REGISTRY};

/// App label every model is registered under.
pub const APP_LABEL: &str = "core";
pub const SITE_HEADER: &str = "CreativeBook administration";

#[derive(Debug, Clone, Serialize)]
pub struct ModelEntry {
    pub name: &'static str,
    pub verbose_name_plural: &'static str,
    pub changelist_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppEntry {
    pub app_label: &'static str,
    pub models: Vec<ModelEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminIndex {
    pub site_header: &'static str,
    pub apps: Vec<AppEntry>,
}

pub fn changelist_url(model: ModelKind) -> String {
    format!("/admin/{}/{}/", APP_LABEL, model.slug())
}

/// Lists every registered model, sorted by plural name.
pub fn index() -> AdminIndex {
    let mut models: Vec<ModelEntry> = REGISTRY
        .iter()
        .map(|admin| ModelEntry {
            name: admin.model.slug(),
            verbose_name_plural: admin.model.verbose_name_plural(),
            changelist_url: changelist_url(admin.model),
        })
        .collect();
    models.sort_by(|a, b| a.verbose_name_plural.cmp(b.verbose_name_plural));

    AdminIndex {
        site_header: SITE_HEADER,
        apps: vec![AppEntry {
            app_label: APP_LABEL,
            models,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_lists_all_models_alphabetically() {
        let index = index();
        let names: Vec<&str> = index.apps[0]
            .models
            .iter()
            .map(|m| m.verbose_name_plural)
            .collect();
        assert_eq!(
            names,
            vec![
                "bookings",
                "creative profiles",
                "industry categories",
                "orders",
                "products",
                "service packages",
                "sub categories",
                "users",
            ]
        );
        assert_eq!(
            index.apps[0].models[0].changelist_url,
            "/admin/core/booking/"
        );
    }
}
