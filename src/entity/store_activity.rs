use sea_orm::entity::prelude::*;

use crate::lifecycle::StoreState;

/// Append-only record of approval workflow transitions.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "store_activity")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub store_id: Uuid,
    pub from_state: Option<StoreState>,
    pub to_state: StoreState,
    pub actor_id: Option<Uuid>,
    pub reason: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stores::Entity",
        from = "Column::StoreId",
        to = "super::stores::Column::Id"
    )]
    Stores,
}

impl Related<super::stores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
