use std::future::IntoFuture;

// Based on: https://github.com/HalsekiRaika/architectured/blob/e5caa5c7ae801d1aaac6e275b3ea0ef26d6ff26b/server/src/controller.rs
/// Turns an HTTP request shape into the DTO a service consumes.
pub trait Intake<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

/// Turns a service result into the HTTP response shape.
pub trait Exhaust<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

/// Pairs a transformer with a presenter around one service call. Use `()`
/// as the transformer when the handler has nothing to convert.
pub struct Controller<T, P> {
    transformer: T,
    presenter: P,
}

impl<T, P> Controller<T, P> {
    pub fn new(transformer: T, presenter: P) -> Self {
        Self {
            transformer,
            presenter,
        }
    }

    pub fn intake<I>(self, input: I) -> Transformed<<T as Intake<I>>::To, P>
    where
        T: Intake<I>,
    {
        Transformed {
            transformed: self.transformer.emit(input),
            presenter: self.presenter,
        }
    }
}

impl<P> Controller<(), P> {
    pub async fn bypass<F, Fut, O, E>(self, f: F) -> Result<P::To, E>
    where
        P: Exhaust<O>,
        F: FnOnce() -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        Ok(self.presenter.emit(f().await?))
    }
}

pub struct Transformed<D, P> {
    transformed: D,
    presenter: P,
}

impl<D, P> Transformed<D, P> {
    pub async fn handle<F, Fut, O, E>(self, f: F) -> Result<P::To, E>
    where
        P: Exhaust<O>,
        F: FnOnce(D) -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        let presenter = self.presenter;
        Ok(presenter.emit(f(self.transformed).await?))
    }
}
