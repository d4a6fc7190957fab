//! Fulfillment status state machine.
//!
//! Defines the production/shipping lifecycle of an order and which
//! transitions the fulfillment workflow allows. Used by both single-order
//! status updates and bulk operations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{OrderId, StateMachine, ValidationError};

/// Position of an order in the production/shipping lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentStatus {
    /// Paid, waiting for production to start.
    Pending,

    /// Print file sent to production.
    Printing,

    /// Printed and packed, waiting for carrier pickup.
    ReadyToShip,

    /// Handed to the carrier.
    Shipped,

    /// Confirmed delivered. Terminal.
    Delivered,

    /// Cancelled before shipping. Terminal.
    Cancelled,
}

impl FulfillmentStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [FulfillmentStatus; 6] = [
        FulfillmentStatus::Pending,
        FulfillmentStatus::Printing,
        FulfillmentStatus::ReadyToShip,
        FulfillmentStatus::Shipped,
        FulfillmentStatus::Delivered,
        FulfillmentStatus::Cancelled,
    ];

    /// Wire name of the status (`snake_case`, matches the database column).
    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentStatus::Pending => "pending",
            FulfillmentStatus::Printing => "printing",
            FulfillmentStatus::ReadyToShip => "ready_to_ship",
            FulfillmentStatus::Shipped => "shipped",
            FulfillmentStatus::Delivered => "delivered",
            FulfillmentStatus::Cancelled => "cancelled",
        }
    }

    /// Hebrew label shown to fulfillment operators.
    pub fn display_label(&self) -> &'static str {
        match self {
            FulfillmentStatus::Pending => "ממתין",
            FulfillmentStatus::Printing => "בהדפסה",
            FulfillmentStatus::ReadyToShip => "מוכן למשלוח",
            FulfillmentStatus::Shipped => "נשלח",
            FulfillmentStatus::Delivered => "נמסר",
            FulfillmentStatus::Cancelled => "בוטל",
        }
    }
}

impl StateMachine for FulfillmentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use FulfillmentStatus::*;
        matches!(
            (self, target),
            // Forward flow
            (Pending, Printing)
                | (Printing, ReadyToShip)
                | (ReadyToShip, Shipped)
                | (Shipped, Delivered)
            // Rollbacks
                | (Printing, Pending)
                | (ReadyToShip, Printing)
            // Cancellation is only possible before production starts
                | (Pending, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use FulfillmentStatus::*;
        match self {
            Pending => vec![Printing, Cancelled],
            Printing => vec![ReadyToShip, Pending],
            ReadyToShip => vec![Shipped, Printing],
            Shipped => vec![Delivered],
            Delivered => vec![],
            Cancelled => vec![],
        }
    }
}

impl fmt::Display for FulfillmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FulfillmentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(FulfillmentStatus::Pending),
            "printing" => Ok(FulfillmentStatus::Printing),
            "ready_to_ship" => Ok(FulfillmentStatus::ReadyToShip),
            "shipped" => Ok(FulfillmentStatus::Shipped),
            "delivered" => Ok(FulfillmentStatus::Delivered),
            "cancelled" => Ok(FulfillmentStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("Unknown fulfillment status '{}'", other),
            )),
        }
    }
}

/// An order whose requested transition is not allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTransition {
    pub order_id: OrderId,
    pub reason: String,
}

/// Outcome of validating a batch of status transitions.
///
/// Every input item lands in exactly one of the two buckets.
#[derive(Debug, Clone, Default)]
pub struct BatchValidation {
    pub valid: Vec<OrderId>,
    pub invalid: Vec<InvalidTransition>,
}

/// Partitions a batch of orders by whether each may move to `target`.
///
/// Reasons name both statuses so the caller can surface them verbatim.
pub fn validate_batch(
    items: &[(OrderId, FulfillmentStatus)],
    target: FulfillmentStatus,
) -> BatchValidation {
    let mut result = BatchValidation::default();

    for (order_id, current) in items {
        if current.can_transition_to(&target) {
            result.valid.push(*order_id);
        } else {
            result.invalid.push(InvalidTransition {
                order_id: *order_id,
                reason: format!(
                    "Cannot change status from '{}' to '{}'",
                    current, target
                ),
            });
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table() -> Vec<(FulfillmentStatus, FulfillmentStatus)> {
        use FulfillmentStatus::*;
        vec![
            (Pending, Printing),
            (Pending, Cancelled),
            (Printing, ReadyToShip),
            (Printing, Pending),
            (ReadyToShip, Shipped),
            (ReadyToShip, Printing),
            (Shipped, Delivered),
        ]
    }

    #[test]
    fn every_table_entry_is_valid() {
        for (from, to) in table() {
            assert!(
                from.can_transition_to(&to),
                "{} -> {} should be allowed",
                from,
                to
            );
        }
    }

    #[test]
    fn every_pair_outside_table_is_invalid() {
        let allowed = table();
        for from in FulfillmentStatus::ALL {
            for to in FulfillmentStatus::ALL {
                let in_table = allowed.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(&to),
                    in_table,
                    "{} -> {} mismatch",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn delivered_and_cancelled_are_terminal() {
        assert!(FulfillmentStatus::Delivered.is_terminal());
        assert!(FulfillmentStatus::Cancelled.is_terminal());
        assert!(FulfillmentStatus::Delivered.valid_transitions().is_empty());
        assert!(FulfillmentStatus::Cancelled.valid_transitions().is_empty());
    }

    #[test]
    fn shipped_cannot_roll_back() {
        assert!(!FulfillmentStatus::Shipped.can_transition_to(&FulfillmentStatus::ReadyToShip));
        assert!(!FulfillmentStatus::Shipped.can_transition_to(&FulfillmentStatus::Pending));
    }

    #[test]
    fn status_roundtrips_through_from_str() {
        for status in FulfillmentStatus::ALL {
            assert_eq!(status.as_str().parse::<FulfillmentStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_status_string_is_rejected() {
        assert!("in_transit".parse::<FulfillmentStatus>().is_err());
        assert!("".parse::<FulfillmentStatus>().is_err());
    }

    #[test]
    fn validate_batch_all_valid() {
        let items: Vec<_> = (0..3)
            .map(|_| (OrderId::new(), FulfillmentStatus::Pending))
            .collect();

        let result = validate_batch(&items, FulfillmentStatus::Printing);

        assert_eq!(result.valid.len(), 3);
        assert!(result.invalid.is_empty());
    }

    #[test]
    fn validate_batch_mixed_names_both_statuses_in_reason() {
        let pending = OrderId::new();
        let delivered = OrderId::new();
        let cancelled = OrderId::new();
        let items = vec![
            (pending, FulfillmentStatus::Pending),
            (delivered, FulfillmentStatus::Delivered),
            (cancelled, FulfillmentStatus::Cancelled),
        ];

        let result = validate_batch(&items, FulfillmentStatus::Printing);

        assert_eq!(result.valid, vec![pending]);
        assert_eq!(result.invalid.len(), 2);
        assert!(result.invalid[0].reason.contains("delivered"));
        assert!(result.invalid[0].reason.contains("printing"));
        assert!(result.invalid[1].reason.contains("cancelled"));
    }

    proptest! {
        #[test]
        fn validate_batch_partitions_every_item(
            statuses in proptest::collection::vec(0usize..6, 0..40),
            target in 0usize..6,
        ) {
            let items: Vec<_> = statuses
                .iter()
                .map(|&i| (OrderId::new(), FulfillmentStatus::ALL[i]))
                .collect();
            let target = FulfillmentStatus::ALL[target];

            let result = validate_batch(&items, target);

            prop_assert_eq!(result.valid.len() + result.invalid.len(), items.len());
        }
    }
}
