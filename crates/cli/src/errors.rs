//! User-facing wording for service failures.

use stockbook_core::DomainError;
use stockbook_infra::ServiceError;

pub fn service_error_message(err: &ServiceError) -> String {
    match err {
        ServiceError::Domain(e) => domain_error_message(e),
        ServiceError::Store(e) => format!("Could not save data: {e}"),
    }
}

pub fn domain_error_message(err: &DomainError) -> String {
    match err {
        DomainError::Validation(msg) => format!("Invalid input: {msg}"),
        DomainError::NotFound(what) => format!("Product not found: {what}"),
        DomainError::InsufficientStock { available, .. } => {
            format!("Insufficient stock! Available: {available}")
        }
    }
}
