use rulegate_core::types::{DbId, Timestamp};
use rulegate_core::validation::{ActiveStatus, ValidatorDefinition};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::parse_active_status;

/// A row from the `validators` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ValidatorRow {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub context: Option<String>,
    pub sort_order: i32,
    pub active_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ValidatorRow {
    pub fn to_definition(&self) -> ValidatorDefinition {
        ValidatorDefinition {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            context: self.context.clone(),
            active_status: parse_active_status(&self.active_status),
            sort_order: self.sort_order,
        }
    }
}

/// DTO for creating a validator.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateValidator {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(length(max = 255))]
    pub context: Option<String>,
    pub sort_order: Option<i32>,
    pub active_status: Option<ActiveStatus>,
}

/// DTO for updating a validator. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateValidator {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(length(max = 255))]
    pub context: Option<String>,
    pub sort_order: Option<i32>,
    pub active_status: Option<ActiveStatus>,
}
