//! Naira amounts.

use std::fmt;

/// An amount in whole naira, displayed with the naira sign and thousands
/// separators.
///
/// ```rust
/// use bookam_core::currency::Naira;
///
/// assert_eq!(Naira(30000).to_string(), "₦30,000");
/// assert_eq!(Naira(950).to_string(), "₦950");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Naira(pub u64);

impl Naira {
    /// Unit price times seat count.
    pub fn fare(price: u64, seats: usize) -> Self {
        Self(price.saturating_mul(seats as u64))
    }
}

impl fmt::Display for Naira {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        write!(f, "₦{grouped}")
    }
}

impl From<u64> for Naira {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}
