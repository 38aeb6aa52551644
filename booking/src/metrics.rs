//! Prometheus metrics for booking operations.
//!
//! Metric names:
//! - `booking_requests_total{operation}`: engine operations started
//! - `booking_created_total`: bookings created
//! - `booking_replaced_total`: bookings moved to another room
//! - `booking_rejected_total{reason}`: operations refused by a business rule
//! - `booking_operation_duration_seconds{operation}`: latency per operation
//!
//! Recording is a no-op until a recorder is installed (the server installs
//! the Prometheus exporter at startup).

use hotel_booking_core::BookingError;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;

/// Engine operation, used as the `operation` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `get_current_booking`
    GetCurrent,
    /// `create_booking`
    Create,
    /// `replace_booking`
    Replace,
}

impl Operation {
    /// Label value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GetCurrent => "get_current",
            Self::Create => "create",
            Self::Replace => "replace",
        }
    }
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        "booking_requests_total",
        "Total number of booking operations started"
    );
    describe_counter!("booking_created_total", "Total number of bookings created");
    describe_counter!(
        "booking_replaced_total",
        "Total number of bookings moved to another room"
    );
    describe_counter!(
        "booking_rejected_total",
        "Total number of booking operations refused by a business rule"
    );
    describe_histogram!(
        "booking_operation_duration_seconds",
        "Time taken by booking operations"
    );
}

/// Booking metrics recorder.
pub struct BookingMetrics;

impl BookingMetrics {
    /// Record the start of an operation.
    pub fn record_request(operation: Operation) {
        counter!("booking_requests_total", "operation" => operation.as_str()).increment(1);
    }

    /// Record the outcome of an operation.
    ///
    /// Storage failures only count towards the latency histogram; they are
    /// reported through logs.
    pub fn record_outcome(operation: Operation, error: Option<&BookingError>, duration: Duration) {
        histogram!(
            "booking_operation_duration_seconds",
            "operation" => operation.as_str()
        )
        .record(duration.as_secs_f64());

        match (operation, error) {
            (Operation::Create, None) => counter!("booking_created_total").increment(1),
            (Operation::Replace, None) => counter!("booking_replaced_total").increment(1),
            (_, Some(err)) if err.is_rejection() => {
                counter!("booking_rejected_total", "reason" => err.kind()).increment(1);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_booking_core::UserId;

    #[test]
    fn test_operation_labels() {
        assert_eq!(Operation::GetCurrent.as_str(), "get_current");
        assert_eq!(Operation::Create.as_str(), "create");
        assert_eq!(Operation::Replace.as_str(), "replace");
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        register_metrics();
        BookingMetrics::record_request(Operation::Create);
        BookingMetrics::record_outcome(
            Operation::Create,
            Some(&BookingError::AlreadyBooked {
                user_id: UserId::new(1),
            }),
            Duration::from_millis(3),
        );
    }
}
