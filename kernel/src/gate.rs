use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Permission, UserId};
use crate::query::UserQuery;
use crate::KernelError;

/// Answers whether a user may perform an action. Runs inside the caller's
/// transaction so the check and the action see the same user state.
#[async_trait::async_trait]
pub trait PermissionGate: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn has_permission(
        &self,
        con: &mut Self::Transaction,
        user_id: &UserId,
        permission: Permission,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnPermissionGate: 'static + Sync + Send + DependOnDatabaseConnection {
    type PermissionGate: PermissionGate<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn permission_gate(&self) -> &Self::PermissionGate;
}

/// Gate backed by the user store and the fixed role table. Unknown users
/// hold no permissions.
#[derive(Debug, Clone, Default)]
pub struct RoleGate<Q> {
    users: Q,
}

impl<Q> RoleGate<Q> {
    pub fn new(users: Q) -> Self {
        Self { users }
    }
}

#[async_trait::async_trait]
impl<Q: UserQuery> PermissionGate for RoleGate<Q> {
    type Transaction = Q::Transaction;
    async fn has_permission(
        &self,
        con: &mut Self::Transaction,
        user_id: &UserId,
        permission: Permission,
    ) -> error_stack::Result<bool, KernelError> {
        let user = self.users.find_by_id(con, user_id).await?;
        Ok(user.is_some_and(|user| user.role().permits(permission)))
    }
}
