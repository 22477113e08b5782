use thiserror::Error;
use uuid::Uuid;

/// Length of the simulated payment window.
pub const CHECKOUT_SECS: u32 = 60;

#[derive(Error, Debug, PartialEq)]
pub enum CheckoutError {
    #[error("No items in cart. Please add items before checking out.")]
    NothingToPay,
}

/// Simulated order confirmation. The machine knows nothing about clocks;
/// whoever drives it calls `tick` once per elapsed second.
#[derive(Debug, Clone, PartialEq)]
pub enum Checkout {
    Idle,
    Confirming { remaining_secs: u32, order_ref: Uuid },
    Expired,
}

impl Checkout {
    pub fn new() -> Self {
        Checkout::Idle
    }

    /// Opens the payment window. Rejected when there is nothing to pay
    /// for, in which case the current state is untouched.
    pub fn begin(&mut self, amount_due: f64) -> Result<Uuid, CheckoutError> {
        if amount_due <= 0.0 {
            return Err(CheckoutError::NothingToPay);
        }
        let order_ref = Uuid::new_v4();
        *self = Checkout::Confirming {
            remaining_secs: CHECKOUT_SECS,
            order_ref,
        };
        Ok(order_ref)
    }

    /// One second of the payment window elapses. Hitting zero moves to
    /// `Expired`; ticking anything but `Confirming` is a no-op.
    pub fn tick(&mut self) {
        if let Checkout::Confirming { remaining_secs, .. } = self {
            *remaining_secs = remaining_secs.saturating_sub(1);
            if *remaining_secs == 0 {
                *self = Checkout::Expired;
            }
        }
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        match self {
            Checkout::Confirming { remaining_secs, .. } => Some(*remaining_secs),
            _ => None,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Checkout::Expired)
    }
}

impl Default for Checkout {
    fn default() -> Self {
        Checkout::new()
    }
}
