use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "device_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub device_id: i32,
    pub user_id: Option<String>,
    pub action: String,

    // JSON object
    pub details: String,

    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
