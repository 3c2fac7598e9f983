//! 订单状态迁移表
//!
//! ```text
//! draft ──submit──▶ pending ──process/first toggle──▶ in_progress ──complete──▶ completed
//!   │                  │                                   │
//!   └──────────────────┴──────────── cancel ───────────────┴──────────────────▶ cancelled
//! ```

use super::error::{OrderError, OrderResult};
use shared::models::{Order, OrderStatus};

/// Whether `from → to` is a legal status change
pub const fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    match (from, to) {
        (Draft, Pending) | (Pending, InProgress) | (InProgress, Completed) => true,
        (Draft | Pending | InProgress, Cancelled) => true,
        _ => false,
    }
}

pub fn ensure_transition(from: OrderStatus, to: OrderStatus) -> OrderResult<()> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(OrderError::InvalidTransition { from, to })
    }
}

/// Item and notes mutations are only allowed while the order is open
pub fn ensure_open(order: &Order) -> OrderResult<()> {
    if order.status.is_terminal() {
        return Err(OrderError::OrderClosed {
            id: order.id,
            status: order.status,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::OrderStatus::*;

    const ALL: [OrderStatus; 5] = [Draft, Pending, InProgress, Completed, Cancelled];

    #[test]
    fn test_forward_path() {
        assert!(can_transition(Draft, Pending));
        assert!(can_transition(Pending, InProgress));
        assert!(can_transition(InProgress, Completed));
    }

    #[test]
    fn test_no_shortcuts() {
        assert!(!can_transition(Draft, InProgress));
        assert!(!can_transition(Pending, Completed));
        assert!(!can_transition(Draft, Completed));
        assert!(!can_transition(InProgress, Pending));
    }

    #[test]
    fn test_terminal_statuses_are_final() {
        for to in ALL {
            assert!(!can_transition(Completed, to));
            assert!(!can_transition(Cancelled, to));
        }
    }

    #[test]
    fn test_cancel_from_any_open_status() {
        for from in [Draft, Pending, InProgress] {
            assert!(can_transition(from, Cancelled));
        }
    }

    #[test]
    fn test_ensure_transition_error() {
        let err = ensure_transition(Completed, Cancelled).unwrap_err();
        assert!(matches!(
            err,
            OrderError::InvalidTransition {
                from: Completed,
                to: Cancelled
            }
        ));
    }
}
