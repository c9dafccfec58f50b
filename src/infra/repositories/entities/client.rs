//! Client database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Client;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub client_number: i32,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub address: String,
    #[sea_orm(unique)]
    pub phone_number: String,
    #[sea_orm(unique)]
    pub email: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
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

/// Convert database model to domain entity
impl From<Model> for Client {
    fn from(model: Model) -> Self {
        Client {
            id: model.id,
            client_number: model.client_number,
            first_name: model.first_name,
            middle_name: model.middle_name,
            last_name: model.last_name,
            address: model.address,
            phone_number: model.phone_number,
            email: model.email,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
