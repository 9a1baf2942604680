use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "security_alerts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    // Nullable on purpose: alerts may reference devices that were later removed
    pub device_id: Option<i32>,

    pub alert_type: String,

    // "low" | "medium" | "high" | "critical"
    pub severity: String,

    pub description: String,
    pub source_ip: Option<String>,
    pub detected_at: i64,
    pub resolved_at: Option<i64>,

    // "active" | "investigating" | "resolved" | "false_positive"
    pub status: String,

    pub resolved_by: Option<String>,

    // JSON object, free-form key/value payload
    pub metadata: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
