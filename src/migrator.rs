use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users_table::Migration),
            Box::new(m20250101_000002_create_category_tables::Migration),
            Box::new(m20250101_000003_create_creative_tables::Migration),
            Box::new(m20250101_000004_create_booking_and_order_tables::Migration),
        ]
    }
}

// Migration implementations

mod m20250101_000001_create_users_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000001_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Users::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Users::Username)
                                .string_len(150)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::Email).string_len(254).not_null())
                        .col(
                            ColumnDef::new(Users::Role)
                                .string_len(20)
                                .not_null()
                                .default("client"),
                        )
                        .col(ColumnDef::new(Users::PhoneNumber).string_len(20).null())
                        .col(
                            ColumnDef::new(Users::DateJoined)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_users_role")
                        .table(Users::Table)
                        .col(Users::Role)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Users {
        Table,
        Id,
        Username,
        Email,
        Role,
        PhoneNumber,
        DateJoined,
    }
}

mod m20250101_000002_create_category_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000002_create_category_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(IndustryCategories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(IndustryCategories::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(IndustryCategories::Name)
                                .string_len(100)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IndustryCategories::IconCode)
                                .string_len(50)
                                .not_null()
                                .default(""),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SubCategories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SubCategories::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(SubCategories::Name).string_len(100).not_null())
                        .col(ColumnDef::new(SubCategories::IndustryId).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sub_categories_industry")
                                .from(SubCategories::Table, SubCategories::IndustryId)
                                .to(IndustryCategories::Table, IndustryCategories::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sub_categories_industry_id")
                        .table(SubCategories::Table)
                        .col(SubCategories::IndustryId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SubCategories::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(IndustryCategories::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum IndustryCategories {
        Table,
        Id,
        Name,
        IconCode,
    }

    #[derive(DeriveIden)]
    pub enum SubCategories {
        Table,
        Id,
        Name,
        IndustryId,
    }
}

mod m20250101_000003_create_creative_tables {

    use super::m20250101_000001_create_users_table::Users;
    use super::m20250101_000002_create_category_tables::SubCategories;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000003_create_creative_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(CreativeProfiles::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CreativeProfiles::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(CreativeProfiles::UserId)
                                .integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(CreativeProfiles::SubCategoryId).integer().null())
                        .col(
                            ColumnDef::new(CreativeProfiles::HourlyRate)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(CreativeProfiles::Rating)
                                .decimal_len(3, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(CreativeProfiles::IsVerified)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_creative_profiles_user")
                                .from(CreativeProfiles::Table, CreativeProfiles::UserId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_creative_profiles_sub_category")
                                .from(CreativeProfiles::Table, CreativeProfiles::SubCategoryId)
                                .to(SubCategories::Table, SubCategories::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_creative_profiles_is_verified")
                        .table(CreativeProfiles::Table)
                        .col(CreativeProfiles::IsVerified)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ServicePackages::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ServicePackages::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(ServicePackages::Title).string_len(200).not_null())
                        .col(ColumnDef::new(ServicePackages::CreativeId).integer().not_null())
                        .col(
                            ColumnDef::new(ServicePackages::Price)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ServicePackages::DeliveryTime)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_service_packages_creative")
                                .from(ServicePackages::Table, ServicePackages::CreativeId)
                                .to(CreativeProfiles::Table, CreativeProfiles::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Products::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Products::Name).string_len(200).not_null())
                        .col(ColumnDef::new(Products::CreativeId).integer().not_null())
                        .col(ColumnDef::new(Products::Price).decimal_len(10, 2).not_null())
                        .col(
                            ColumnDef::new(Products::Stock)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Products::ImageUrl).string_len(1024).null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_products_creative")
                                .from(Products::Table, Products::CreativeId)
                                .to(CreativeProfiles::Table, CreativeProfiles::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_creative_id")
                        .table(Products::Table)
                        .col(Products::CreativeId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ServicePackages::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(CreativeProfiles::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum CreativeProfiles {
        Table,
        Id,
        UserId,
        SubCategoryId,
        HourlyRate,
        Rating,
        IsVerified,
    }

    #[derive(DeriveIden)]
    pub enum ServicePackages {
        Table,
        Id,
        Title,
        CreativeId,
        Price,
        DeliveryTime,
    }

    #[derive(DeriveIden)]
    pub enum Products {
        Table,
        Id,
        Name,
        CreativeId,
        Price,
        Stock,
        ImageUrl,
    }
}

mod m20250101_000004_create_booking_and_order_tables {

    use super::m20250101_000001_create_users_table::Users;
    use super::m20250101_000003_create_creative_tables::{CreativeProfiles, Products};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000004_create_booking_and_order_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Bookings::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Bookings::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Bookings::ClientId).integer().not_null())
                        .col(ColumnDef::new(Bookings::CreativeId).integer().not_null())
                        .col(ColumnDef::new(Bookings::BookingDate).date().not_null())
                        .col(
                            ColumnDef::new(Bookings::Status)
                                .string_len(20)
                                .not_null()
                                .default("pending"),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_bookings_client")
                                .from(Bookings::Table, Bookings::ClientId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_bookings_creative")
                                .from(Bookings::Table, Bookings::CreativeId)
                                .to(CreativeProfiles::Table, CreativeProfiles::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_bookings_status")
                        .table(Bookings::Table)
                        .col(Bookings::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_bookings_booking_date")
                        .table(Bookings::Table)
                        .col(Bookings::BookingDate)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Orders::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Orders::ClientId).integer().not_null())
                        .col(ColumnDef::new(Orders::ProductId).integer().not_null())
                        .col(
                            ColumnDef::new(Orders::Quantity)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(
                            ColumnDef::new(Orders::TotalPrice)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Orders::Status)
                                .string_len(20)
                                .not_null()
                                .default("pending"),
                        )
                        .col(
                            ColumnDef::new(Orders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_client")
                                .from(Orders::Table, Orders::ClientId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_product")
                                .from(Orders::Table, Orders::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_status")
                        .table(Orders::Table)
                        .col(Orders::Status)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Bookings::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Bookings {
        Table,
        Id,
        ClientId,
        CreativeId,
        BookingDate,
        Status,
    }

    #[derive(DeriveIden)]
    pub enum Orders {
        Table,
        Id,
        ClientId,
        ProductId,
        Quantity,
        TotalPrice,
        Status,
        CreatedAt,
    }
}
