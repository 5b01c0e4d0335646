use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{User, UserId, UserName};
use crate::KernelError;

#[async_trait::async_trait]
pub trait UserQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError>;

    async fn find_by_name(
        &self,
        con: &mut Self::Transaction,
        name: &UserName,
    ) -> error_stack::Result<Option<User>, KernelError>;

    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<User>, KernelError>;

    /// Counts users and keeps other transactions from inserting one until
    /// this transaction ends.
    async fn count_for_update(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<i64, KernelError>;
}

pub trait DependOnUserQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type UserQuery: UserQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn user_query(&self) -> &Self::UserQuery;
}
