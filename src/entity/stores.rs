use sea_orm::entity::prelude::*;

use crate::lifecycle::StoreState;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stores")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub store_name: String,
    pub owner_name: String,
    pub phone: String,
    pub email: String,
    pub license_number: String,
    pub city: String,
    pub area: String,
    pub pincode: String,
    pub address: String,
    pub image_ref: Option<String>,
    pub license_file_ref: Option<String>,
    /// Lowercased name, owner, license, city and area; matched by listing search.
    pub search_key: String,
    pub state: StoreState,
    pub rejection_reason: Option<String>,
    pub approved_at: Option<DateTimeWithTimeZone>,
    pub removed_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
    #[sea_orm(has_many = "super::store_activity::Entity")]
    StoreActivity,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::store_activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StoreActivity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
