use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_stack::Report;
use kernel::KernelError;
use serde_json::json;
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> Response {
        let context = self.0.current_context();
        let status = match context {
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::Validation | KernelError::EmptyCart => StatusCode::BAD_REQUEST,
            KernelError::InsufficientStock | KernelError::StockChanged => StatusCode::CONFLICT,
            KernelError::InsufficientPayment => StatusCode::PAYMENT_REQUIRED,
            KernelError::PermissionDenied => StatusCode::FORBIDDEN,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!("{:?}", self.0);
        }
        (status, Json(json!({ "error": context.kind() }))).into_response()
    }
}
