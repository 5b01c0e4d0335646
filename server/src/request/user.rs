use crate::controller::Intake;
use crate::request::Actor;
use application::transfer::{ChangeRoleDto, GetUserDto, RegisterUserDto};
use kernel::prelude::entity::Role;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    name: String,
    credential: String,
    role: Role,
}

#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    role: Role,
}

#[derive(Debug)]
pub struct GetUserRequest {
    id: Uuid,
}

impl GetUserRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct UserTransformer;

impl Intake<(Option<Actor>, RegisterUserRequest)> for UserTransformer {
    type To = RegisterUserDto;
    fn emit(&self, input: (Option<Actor>, RegisterUserRequest)) -> Self::To {
        let (actor, input) = input;
        RegisterUserDto {
            actor: actor.map(Into::into),
            name: input.name,
            credential: input.credential,
            role: input.role,
        }
    }
}

impl Intake<GetUserRequest> for UserTransformer {
    type To = GetUserDto;
    fn emit(&self, input: GetUserRequest) -> Self::To {
        GetUserDto { id: input.id }
    }
}

impl Intake<(Actor, Uuid, ChangeRoleRequest)> for UserTransformer {
    type To = ChangeRoleDto;
    fn emit(&self, input: (Actor, Uuid, ChangeRoleRequest)) -> Self::To {
        let (actor, id, input) = input;
        ChangeRoleDto {
            actor: actor.into(),
            id,
            role: input.role,
        }
    }
}
