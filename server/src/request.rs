use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use error_stack::{Report, ResultExt};
use kernel::KernelError;
use uuid::Uuid;

use crate::error::ErrorStatus;

pub use self::{book::*, cart::*, report::*, sale::*, stock::*, user::*};

mod book;
mod cart;
mod report;
mod sale;
mod stock;
mod user;

static ACTOR_HEADER: &str = "x-user-id";

/// The acting user, taken from the `x-user-id` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor(Uuid);

impl From<Actor> for Uuid {
    fn from(value: Actor) -> Self {
        value.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ErrorStatus;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(ACTOR_HEADER).ok_or_else(|| {
            Report::new(KernelError::PermissionDenied)
                .attach_printable(format!("Missing {ACTOR_HEADER} header"))
        })?;
        let id = header
            .to_str()
            .change_context_lazy(|| KernelError::Validation)
            .and_then(|value| {
                Uuid::parse_str(value.trim()).change_context_lazy(|| KernelError::Validation)
            })
            .attach_printable_lazy(|| format!("Malformed {ACTOR_HEADER} header"))?;
        Ok(Actor(id))
    }
}

#[cfg(test)]
mod test {
    use axum::extract::FromRequestParts;
    use axum::http::Request;
    use uuid::Uuid;

    use super::Actor;

    #[tokio::test]
    async fn reads_actor_header() {
        let id = Uuid::new_v4();
        let (mut parts, _) = Request::builder()
            .header("x-user-id", id.to_string())
            .body(())
            .map(Request::into_parts)
            .unwrap();
        let actor = Actor::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(Uuid::from(actor), id);
    }

    #[tokio::test]
    async fn rejects_missing_or_malformed_header() {
        let (mut parts, _) = Request::builder()
            .body(())
            .map(Request::into_parts)
            .unwrap();
        assert!(Actor::from_request_parts(&mut parts, &()).await.is_err());

        let (mut parts, _) = Request::builder()
            .header("x-user-id", "not-a-uuid")
            .body(())
            .map(Request::into_parts)
            .unwrap();
        assert!(Actor::from_request_parts(&mut parts, &()).await.is_err());
    }
}
