use driver::database::PostgresDatabase;
use error_stack::Report;
use kernel::prelude::entity::Cart;
use kernel::KernelError;
use std::collections::HashMap;
use std::ops::Deref;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;
use vodca::References;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

#[derive(References)]
pub struct Handler {
    pgpool: PostgresDatabase,
    carts: CartSessions,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;
        pgpool.migrate().await?;

        Ok(Self {
            pgpool,
            carts: CartSessions::default(),
        })
    }
}

const IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

struct Session {
    cart: Arc<Mutex<Cart>>,
    touched: Instant,
}

impl Session {
    fn is_idle(&self, timeout: Duration) -> bool {
        self.touched.elapsed() > timeout
    }
}

fn session_not_found(id: &Uuid) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("Cart {id} not found"))
}

/// Open carts keyed by session id. Each cart has its own lock so that a
/// checkout in progress only blocks requests against the same session.
/// Sessions untouched for longer than the idle timeout are dropped.
pub struct CartSessions {
    sessions: RwLock<HashMap<Uuid, Session>>,
    idle: Duration,
}

impl Default for CartSessions {
    fn default() -> Self {
        Self::new(IDLE_TIMEOUT)
    }
}

impl CartSessions {
    pub fn new(idle: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle,
        }
    }

    pub async fn open(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle(self.idle));
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, "Dropped idle cart sessions");
        }
        sessions.insert(
            id,
            Session {
                cart: Arc::new(Mutex::new(Cart::new())),
                touched: Instant::now(),
            },
        );
        id
    }

    pub async fn find(&self, id: &Uuid) -> error_stack::Result<Arc<Mutex<Cart>>, KernelError> {
        let mut sessions = self.sessions.write().await;
        if sessions
            .get(id)
            .is_some_and(|session| session.is_idle(self.idle))
        {
            sessions.remove(id);
        }
        let session = sessions.get_mut(id).ok_or_else(|| session_not_found(id))?;
        session.touched = Instant::now();
        Ok(Arc::clone(&session.cart))
    }

    pub async fn close(&self, id: &Uuid) -> error_stack::Result<(), KernelError> {
        if self.discard(id).await {
            Ok(())
        } else {
            Err(session_not_found(id))
        }
    }

    /// Removes a session if it is still open. Returns whether it was.
    pub async fn discard(&self, id: &Uuid) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use kernel::KernelError;
    use uuid::Uuid;

    use super::CartSessions;

    #[tokio::test]
    async fn sessions_are_isolated() -> error_stack::Result<(), KernelError> {
        let sessions = CartSessions::default();
        let first = sessions.open().await;
        let second = sessions.open().await;
        assert_ne!(first, second);

        sessions.find(&first).await?;
        sessions.close(&first).await?;
        let missing = sessions.find(&first).await.map(|_| ()).unwrap_err();
        assert_eq!(missing.current_context(), &KernelError::NotFound);
        sessions.find(&second).await?;

        let unknown = sessions.find(&Uuid::new_v4()).await.map(|_| ()).unwrap_err();
        assert_eq!(unknown.current_context(), &KernelError::NotFound);
        Ok(())
    }

    #[tokio::test]
    async fn idle_sessions_are_dropped() -> error_stack::Result<(), KernelError> {
        let sessions = CartSessions::new(Duration::from_millis(20));
        let stale = sessions.open().await;
        let kept = sessions.open().await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        let expired = sessions.find(&stale).await.map(|_| ()).unwrap_err();
        assert_eq!(expired.current_context(), &KernelError::NotFound);

        let fresh = sessions.open().await;
        sessions.find(&fresh).await?;
        assert!(!sessions.discard(&kept).await);
        Ok(())
    }

    #[tokio::test]
    async fn discard_ignores_missing_sessions() -> error_stack::Result<(), KernelError> {
        let sessions = CartSessions::default();
        let id = sessions.open().await;
        assert!(sessions.discard(&id).await);
        assert!(!sessions.discard(&id).await);
        let closed = sessions.close(&id).await.unwrap_err();
        assert_eq!(closed.current_context(), &KernelError::NotFound);
        Ok(())
    }
}
