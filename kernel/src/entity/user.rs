mod credential;
mod id;
mod name;
mod role;

pub use self::{credential::*, id::*, name::*, role::*};
use crate::entity::CreatedAt;
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Destructure, References)]
pub struct User {
    id: UserId,
    name: UserName,
    credential: CredentialHash,
    role: Role,
    created_at: CreatedAt<User>,
}

impl User {
    pub fn new(
        id: UserId,
        name: UserName,
        credential: CredentialHash,
        role: Role,
        created_at: CreatedAt<User>,
    ) -> Self {
        Self {
            id,
            name,
            credential,
            role,
            created_at,
        }
    }

    pub fn with_role(self, role: Role) -> Self {
        self.reconstruct(|user| user.role = role)
    }
}
