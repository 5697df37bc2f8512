//! The slice of a raffle the prize rules care about.

use serde::{Deserialize, Serialize};

use crate::datetime;
use crate::error::CoreError;
use crate::types::Timestamp;

/// A raffle's ticket sale window.
///
/// `sale_close > sale_open` is enforced where raffles are created; the rule
/// engine assumes it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleWindow {
    pub sale_open: Timestamp,
    pub sale_close: Timestamp,
}

impl SaleWindow {
    /// Build a window from raw datetime strings (backend or UI format).
    ///
    /// Both dates must be present; the unset sentinel is rejected.
    pub fn from_raw(sale_open: &str, sale_close: &str) -> Result<Self, CoreError> {
        Ok(Self {
            sale_open: datetime::parse_required(sale_open, "sale open date")?,
            sale_close: datetime::parse_required(sale_close, "sale close date")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_mixed_formats() {
        let w = SaleWindow::from_raw("2025-06-01 00:00:00", "2025-06-30T18:00").unwrap();
        assert!(w.sale_close > w.sale_open);
    }

    #[test]
    fn rejects_sentinel_dates() {
        assert!(SaleWindow::from_raw("0000-00-00 00:00:00", "2025-06-30 18:00:00").is_err());
    }
}
