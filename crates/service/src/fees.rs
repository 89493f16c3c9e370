//! Fee breakdown shown on the service detail page.

use serde::Serialize;

const SERVICE_SHARE: f64 = 0.85;
const PROCESSING_SHARE: f64 = 0.10;
const PLATFORM_SHARE: f64 = 0.05;

/// Three display components derived from a service price.
///
/// The components are rounded independently and are not reconciled with
/// `total`, which is always the catalog price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeBreakdown {
    pub service_fee: u64,
    pub processing_fee: u64,
    pub platform_fee: u64,
    pub total: u32,
}

fn share(price: u32, ratio: f64) -> u64 {
    // f64::round rounds half away from zero
    (f64::from(price) * ratio).round() as u64
}

impl FeeBreakdown {
    pub fn from_price(price: u32) -> Self {
        Self {
            service_fee: share(price, SERVICE_SHARE),
            processing_fee: share(price, PROCESSING_SHARE),
            platform_fee: share(price, PLATFORM_SHARE),
            total: price,
        }
    }

    pub fn parts_sum(&self) -> u64 {
        self.service_fee + self.processing_fee + self.platform_fee
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_for_150_keeps_rounding_discrepancy() {
        let fees = FeeBreakdown::from_price(150);
        assert_eq!(fees.service_fee, 128);
        assert_eq!(fees.processing_fee, 15);
        assert_eq!(fees.platform_fee, 8);
        assert_eq!(fees.total, 150);
        assert_eq!(fees.parts_sum(), 151);
        assert_ne!(fees.parts_sum(), u64::from(fees.total));
    }

    #[test]
    fn zero_price_is_all_zero() {
        let fees = FeeBreakdown::from_price(0);
        assert_eq!(fees.parts_sum(), 0);
        assert_eq!(fees.total, 0);
    }

    #[test]
    fn round_numbers_reconcile() {
        let fees = FeeBreakdown::from_price(100);
        assert_eq!((fees.service_fee, fees.processing_fee, fees.platform_fee), (85, 10, 5));
        assert_eq!(fees.parts_sum(), 100);
    }
}
