use error_stack::Report;

use kernel::interface::query::UserQuery;
use kernel::interface::update::UserModifier;
use kernel::prelude::entity::{User, UserId, UserName};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryUserRepository;

#[async_trait::async_trait]
impl UserQuery for InMemoryUserRepository {
    type Transaction = InMemoryTransaction;
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con
            .state()
            .users
            .iter()
            .find(|user| user.id() == id)
            .cloned())
    }

    async fn find_by_name(
        &self,
        con: &mut InMemoryTransaction,
        name: &UserName,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con
            .state()
            .users
            .iter()
            .find(|user| user.name() == name)
            .cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<User>, KernelError> {
        Ok(con.state().users.clone())
    }

    async fn count_for_update(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<i64, KernelError> {
        i64::try_from(con.state().users.len())
            .map_err(|error| Report::new(error).change_context(KernelError::Internal))
    }
}

#[async_trait::async_trait]
impl UserModifier for InMemoryUserRepository {
    type Transaction = InMemoryTransaction;
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        let users = &mut con.state_mut().users;
        if users
            .iter()
            .any(|stored| stored.id() == user.id() || stored.name() == user.name())
        {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("User id or name already taken"));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        if let Some(stored) = con
            .state_mut()
            .users
            .iter_mut()
            .find(|stored| stored.id() == user.id())
        {
            *stored = user.clone();
        }
        Ok(())
    }
}
