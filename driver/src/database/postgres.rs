use std::ops::{Deref, DerefMut};

use error_stack::{Report, ResultExt};
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::gate::{DependOnPermissionGate, RoleGate};
use kernel::interface::query::{
    DependOnBookQuery, DependOnSaleQuery, DependOnStockAdjustmentQuery, DependOnUserQuery,
};
use kernel::interface::update::{
    DependOnBookModifier, DependOnSaleModifier, DependOnStockAdjustmentModifier,
    DependOnUserModifier,
};
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

pub use self::{adjustment::*, book::*, sale::*, user::*};

mod adjustment;
mod book;
mod sale;
mod user;

static POSTGRES_URL: &str = "POSTGRES_URL";

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
    gate: RoleGate<PostgresUserRepository>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        Self::connect(&url).await
    }

    #[tracing::instrument(skip_all)]
    pub async fn connect(url: &str) -> error_stack::Result<Self, KernelError> {
        let pool = Pool::connect(url).await.convert_error()?;
        tracing::debug!("Connected to postgres");
        Ok(Self {
            pool,
            gate: RoleGate::new(PostgresUserRepository),
        })
    }

    pub async fn migrate(&self) -> error_stack::Result<(), KernelError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable("Failed to run migrations")?;
        tracing::info!("Migrations applied");
        Ok(())
    }
}

pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let tx = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(tx))
    }
}

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl DependOnBookQuery for PostgresDatabase {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier for PostgresDatabase {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

impl DependOnSaleQuery for PostgresDatabase {
    type SaleQuery = PostgresSaleRepository;
    fn sale_query(&self) -> &Self::SaleQuery {
        &PostgresSaleRepository
    }
}

impl DependOnSaleModifier for PostgresDatabase {
    type SaleModifier = PostgresSaleRepository;
    fn sale_modifier(&self) -> &Self::SaleModifier {
        &PostgresSaleRepository
    }
}

impl DependOnStockAdjustmentQuery for PostgresDatabase {
    type StockAdjustmentQuery = PostgresStockAdjustmentRepository;
    fn stock_adjustment_query(&self) -> &Self::StockAdjustmentQuery {
        &PostgresStockAdjustmentRepository
    }
}

impl DependOnStockAdjustmentModifier for PostgresDatabase {
    type StockAdjustmentModifier = PostgresStockAdjustmentRepository;
    fn stock_adjustment_modifier(&self) -> &Self::StockAdjustmentModifier {
        &PostgresStockAdjustmentRepository
    }
}

impl DependOnUserQuery for PostgresDatabase {
    type UserQuery = PostgresUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &PostgresUserRepository
    }
}

impl DependOnUserModifier for PostgresDatabase {
    type UserModifier = PostgresUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &PostgresUserRepository
    }
}

impl DependOnPermissionGate for PostgresDatabase {
    type PermissionGate = RoleGate<PostgresUserRepository>;
    fn permission_gate(&self) -> &Self::PermissionGate {
        &self.gate
    }
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                Error::PoolTimedOut => KernelError::Timeout,
                Error::Database(db) if db.is_unique_violation() => KernelError::Validation,
                Error::Database(db) if db.is_check_violation() => KernelError::InsufficientStock,
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}
