//! Product category database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::ProductCategory;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "product_categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub display_name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::client_product_category::Entity")]
    ClientProductCategories,
}

impl Related<super::client_product_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClientProductCategories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ProductCategory {
    fn from(model: Model) -> Self {
        ProductCategory {
            product_category_id: model.id,
            product_category_name: model.display_name,
        }
    }
}
