use sea_orm::entity::prelude::*;

/// Immutable audit row. Inserted by the access engine or the alerts API,
/// never updated or deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "blocked_attempts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub source_ip: Option<String>,
    pub target_device_id: Option<i32>,
    pub attempt_type: String,
    pub blocked_at: i64,
    pub attempt_count: i32,
    pub user_agent: Option<String>,

    // JSON object; always carries user_id and blocked_reason
    pub request_details: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
