use sqlx::FromRow;
use uuid::Uuid;

use business::domain::category::model::Category;

#[derive(Debug, FromRow)]
pub struct CategoryEntity {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
}

impl CategoryEntity {
    pub fn into_domain(self) -> Category {
        Category {
            id: self.id,
            name: self.name,
            slug: self.slug,
            image_url: self.image_url,
        }
    }
}
