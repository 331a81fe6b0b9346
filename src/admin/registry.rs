//! Static admin configuration, one [`ModelAdmin`] per entity.

use serde::Serialize;

/// Every entity exposed through the admin site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    User,
    IndustryCategory,
    SubCategory,
    CreativeProfile,
    ServicePackage,
    Product,
    Booking,
    Order,
}

impl ModelKind {
    pub const ALL: [ModelKind; 8] = [
        ModelKind::User,
        ModelKind::IndustryCategory,
        ModelKind::SubCategory,
        ModelKind::CreativeProfile,
        ModelKind::ServicePackage,
        ModelKind::Product,
        ModelKind::Booking,
        ModelKind::Order,
    ];

    /// URL segment: the lowercased model name.
    pub fn slug(self) -> &'static str {
        match self {
            ModelKind::User => "user",
            ModelKind::IndustryCategory => "industrycategory",
            ModelKind::SubCategory => "subcategory",
            ModelKind::CreativeProfile => "creativeprofile",
            ModelKind::ServicePackage => "servicepackage",
            ModelKind::Product => "product",
            ModelKind::Booking => "booking",
            ModelKind::Order => "order",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    pub fn table_name(self) -> &'static str {
        match self {
            ModelKind::User => "users",
            ModelKind::IndustryCategory => "industry_categories",
            ModelKind::SubCategory => "sub_categories",
            ModelKind::CreativeProfile => "creative_profiles",
            ModelKind::ServicePackage => "service_packages",
            ModelKind::Product => "products",
            ModelKind::Booking => "bookings",
            ModelKind::Order => "orders",
        }
    }

    pub fn verbose_name(self) -> &'static str {
        match self {
            ModelKind::User => "user",
            ModelKind::IndustryCategory => "industry category",
            ModelKind::SubCategory => "sub category",
            ModelKind::CreativeProfile => "creative profile",
            ModelKind::ServicePackage => "service package",
            ModelKind::Product => "product",
            ModelKind::Booking => "booking",
            ModelKind::Order => "order",
        }
    }

    pub fn verbose_name_plural(self) -> &'static str {
        match self {
            ModelKind::User => "users",
            ModelKind::IndustryCategory => "industry categories",
            ModelKind::SubCategory => "sub categories",
            ModelKind::CreativeProfile => "creative profiles",
            ModelKind::ServicePackage => "service packages",
            ModelKind::Product => "products",
            ModelKind::Booking => "bookings",
            ModelKind::Order => "orders",
        }
    }
}

/// How a list filter interprets its query-string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// `{field}__exact=<value>`
    Choice,
    /// `{field}__exact=1|0`
    Boolean,
    /// `{field}__id__exact=<id>`, plus `{field}__isnull` on nullable keys
    Related,
    /// `{field}__gte=<date>` and `{field}__lt=<date>`
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListFilter {
    pub field: &'static str,
    pub kind: FilterKind,
}

const fn filter(field: &'static str, kind: FilterKind) -> ListFilter {
    ListFilter { field, kind }
}

/// List-view configuration for one model.
#[derive(Debug, PartialEq, Eq)]
pub struct ModelAdmin {
    pub model: ModelKind,
    pub list_display: &'static [&'static str],
    pub list_filter: &'static [ListFilter],
    pub search_fields: &'static [&'static str],
}

impl ModelAdmin {
    pub fn filter_for(&self, field: &str) -> Option<&'static ListFilter> {
        self.list_filter.iter().find(|f| f.field == field)
    }
}

/// A foreign-key field and the model it points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: &'static str,
    pub target: ModelKind,
    pub nullable: bool,
}

/// Registered models, in declaration order.
pub static REGISTRY: [ModelAdmin; 8] = [
    ModelAdmin {
        model: ModelKind::User,
        list_display: &["id", "username", "email", "role", "phone_number"],
        list_filter: &[filter("role", FilterKind::Choice)],
        search_fields: &["username", "email"],
    },
    ModelAdmin {
        model: ModelKind::IndustryCategory,
        list_display: &["id", "name", "icon_code"],
        list_filter: &[],
        search_fields: &["name"],
    },
    ModelAdmin {
        model: ModelKind::SubCategory,
        list_display: &["id", "name", "industry"],
        list_filter: &[filter("industry", FilterKind::Related)],
        search_fields: &["name"],
    },
    ModelAdmin {
        model: ModelKind::CreativeProfile,
        list_display: &[
            "id",
            "user",
            "sub_category",
            "hourly_rate",
            "rating",
            "is_verified",
        ],
        list_filter: &[
            filter("is_verified", FilterKind::Boolean),
            filter("sub_category", FilterKind::Related),
        ],
        search_fields: &["user__username"],
    },
    ModelAdmin {
        model: ModelKind::ServicePackage,
        list_display: &["id", "title", "creative", "price", "delivery_time"],
        list_filter: &[],
        search_fields: &["title"],
    },
    ModelAdmin {
        model: ModelKind::Product,
        list_display: &["id", "name", "creative", "price", "stock", "image_url"],
        list_filter: &[filter("creative", FilterKind::Related)],
        search_fields: &["name"],
    },
    ModelAdmin {
        model: ModelKind::Booking,
        list_display: &["id", "client", "creative", "booking_date", "status"],
        list_filter: &[
            filter("status", FilterKind::Choice),
            filter("booking_date", FilterKind::Date),
        ],
        search_fields: &["client__username", "creative__user__username"],
    },
    ModelAdmin {
        model: ModelKind::Order,
        list_display: &[
            "id",
            "client",
            "product",
            "quantity",
            "total_price",
            "status",
            "created_at",
        ],
        list_filter: &[filter("status", FilterKind::Choice)],
        search_fields: &["client__username", "product__name"],
    },
];

/// Looks up a model's admin by URL slug.
pub fn get(slug: &str) -> Option<&'static ModelAdmin> {
    REGISTRY.iter().find(|admin| admin.model.slug() == slug)
}

pub fn for_model(model: ModelKind) -> &'static ModelAdmin {
    REGISTRY
        .iter()
        .find(|admin| admin.model == model)
        .unwrap_or_else(|| unreachable!("every ModelKind is registered"))
}

/// Resolves a relation field (`creative`) to its `*_id` column and target model.
pub fn foreign_key(model: ModelKind, field: &str) -> Option<ForeignKey> {
    let fk = |column, target| ForeignKey {
        column,
        target,
        nullable: false,
    };

    match (model, field) {
        (ModelKind::SubCategory, "industry") => Some(fk("industry_id", ModelKind::IndustryCategory)),
        (ModelKind::CreativeProfile, "user") => Some(fk("user_id", ModelKind::User)),
        (ModelKind::CreativeProfile, "sub_category") => Some(ForeignKey {
            nullable: true,
            ..fk("sub_category_id", ModelKind::SubCategory)
        }),
        (ModelKind::ServicePackage, "creative") | (ModelKind::Product, "creative") => {
            Some(fk("creative_id", ModelKind::CreativeProfile))
        }
        (ModelKind::Booking, "client") | (ModelKind::Order, "client") => {
            Some(fk("client_id", ModelKind::User))
        }
        (ModelKind::Booking, "creative") => Some(fk("creative_id", ModelKind::CreativeProfile)),
        (ModelKind::Order, "product") => Some(fk("product_id", ModelKind::Product)),
        _ => None,
    }
}

/// Database column backing a list-display or filter field.
pub fn column_for(model: ModelKind, field: &'static str) -> &'static str {
    foreign_key(model, field).map_or(field, |fk| fk.column)
}
