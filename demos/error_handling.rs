//! Example: Classifying failures with ErrorKind.
//!
//! Run with: cargo run --example error_handling

use bithumb_api_client::BithumbError;
use bithumb_api_client::error::{ApiError, ApiErrorKind, ErrorKind, error_names};

fn main() {
    let api_error = ApiError::new(
        error_names::UNDER_MIN_TOTAL_BID,
        "최소 주문금액 이상으로 주문해주세요",
        400,
    );
    println!("API error: {}", api_error);
    println!("Is validation: {}", api_error.is_validation());

    let err = BithumbError::Api(api_error);
    match err.kind() {
        ErrorKind::Validation => println!("Fix the order parameters before retrying"),
        ErrorKind::RateLimited => println!("Back off and retry later"),
        other => println!("Unhandled failure: {:?}", other),
    }
    assert_eq!(err.api_error().map(|e| e.kind), Some(ApiErrorKind::UnderMinTotal));
    println!("Retryable: {}", err.is_retryable());
}
