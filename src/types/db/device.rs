use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub device_type: String,
    #[sea_orm(unique)]
    pub mac_address: Option<String>,
    pub ip_address: Option<String>,

    // "online" | "offline" | "alert"
    pub status: String,

    pub location: String,

    // Non-empty firmware_version doubles as the security-enabled posture flag
    pub firmware_version: Option<String>,

    pub last_seen: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
