//! `SeaORM` Entity for the users table.
//!
//! Minimal user rows for scoping transactions and budgets; credentials live
//! with the external identity provider.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A user row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// User ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Email address (unique).
    #[sea_orm(unique)]
    pub email: String,
    /// Display name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Transactions recorded by this user.
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
    /// Budgets defined by this user.
    #[sea_orm(has_many = "super::budgets::Entity")]
    Budgets,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl Related<super::budgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budgets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
