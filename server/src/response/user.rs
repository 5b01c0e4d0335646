use crate::controller::Exhaust;
use application::transfer::UserDto;
use axum::Json;
use kernel::prelude::entity::Role;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    id: Uuid,
    name: String,
    role: Role,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl From<UserDto> for UserResponse {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            role: value.role,
            created_at: value.created_at,
        }
    }
}

pub struct UserPresenter;

impl Exhaust<UserDto> for UserPresenter {
    type To = Json<UserResponse>;
    fn emit(&self, input: UserDto) -> Self::To {
        Json(UserResponse::from(input))
    }
}

impl Exhaust<Vec<UserDto>> for UserPresenter {
    type To = Json<Vec<UserResponse>>;
    fn emit(&self, input: Vec<UserDto>) -> Self::To {
        Json(input.into_iter().map(UserResponse::from).collect())
    }
}
