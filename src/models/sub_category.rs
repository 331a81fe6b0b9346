use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sub_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub industry_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::industry_category::Entity",
        from = "Column::IndustryId",
        to = "super::industry_category::Column::Id",
        on_delete = "Cascade"
    )]
    Industry,
    #[sea_orm(has_many = "super::creative_profile::Entity")]
    CreativeProfiles,
}

impl Related<super::industry_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Industry.def()
    }
}

impl Related<super::creative_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreativeProfiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl super::DisplayName for Model {
    fn display_name(&self) -> String {
        self.name.clone()
    }
}
