use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct SettingEntity {
    pub key: String,
    pub value: String,
}
