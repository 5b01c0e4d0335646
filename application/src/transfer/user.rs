use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{DestructUser, Role, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub created_at: OffsetDateTime,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let DestructUser {
            id,
            name,
            role,
            created_at,
            ..
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            role,
            created_at: created_at.into(),
        }
    }
}

pub struct RegisterUserDto {
    pub actor: Option<Uuid>,
    pub name: String,
    pub credential: String,
    pub role: Role,
}

pub struct GetUserDto {
    pub id: Uuid,
}

pub struct ChangeRoleDto {
    pub actor: Uuid,
    pub id: Uuid,
    pub role: Role,
}
