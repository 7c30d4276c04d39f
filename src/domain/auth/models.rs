use time::PrimitiveDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role_key: String,
    pub role_weight: i32,
    pub status: String,
    pub profile_image_url: Option<String>,
    /// Never leaves the service layer; response shaping drops it.
    pub password_hash: String,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}
