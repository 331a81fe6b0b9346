//! sea-orm entities for the marketplace.
//!
//! Primary keys are auto-increment integers and foreign keys are plain
//! `*_id` columns, so admin lookups such as `creative__user__username` can be
//! resolved by walking the `*_id` columns through [`crate::admin::registry`].

pub mod booking;
pub mod creative_profile;
pub mod industry_category;
pub mod order;
pub mod product;
pub mod service_package;
pub mod sub_category;
pub mod user;

pub use booking::BookingStatus;
pub use order::OrderStatus;
pub use user::UserRole;

/// Human-readable label for a stored row, shown by the admin detail view.
pub trait DisplayName {
    fn display_name(&self) -> String;
}
