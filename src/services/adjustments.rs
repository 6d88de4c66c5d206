//! Adjustment pipeline
//!
//! Stages applied to the base subtotal in a fixed order. Each stage is a pure
//! function over the running total and may append at most one line item.

use crate::models::{EstimateRequest, LineItem};
use crate::services::pricing::RunningTotal;
use crate::utils::error::AppResult;
use crate::utils::money::{round_currency, try_mul, try_percent_of, try_sub};
use rust_decimal::Decimal;
use tracing::trace;

/// Signature shared by every adjustment stage
pub type AdjustmentFn = fn(&EstimateRequest, u64, RunningTotal) -> AppResult<RunningTotal>;

/// Named pipeline stage
#[derive(Clone, Copy)]
pub struct Adjustment {
    pub name: &'static str,
    pub apply: AdjustmentFn,
}

/// Stages in application order
pub const PIPELINE: [Adjustment; 4] = [
    Adjustment {
        name: "setup_fee",
        apply: apply_setup_fee,
    },
    Adjustment {
        name: "freemium",
        apply: apply_freemium,
    },
    Adjustment {
        name: "minimum_commitment",
        apply: apply_minimum_commitment,
    },
    Adjustment {
        name: "discount",
        apply: apply_discount,
    },
];

/// Thread `base` through every stage of [`PIPELINE`], stopping at the first failing stage
pub fn apply_adjustments(
    request: &EstimateRequest,
    usage: u64,
    base: RunningTotal,
) -> AppResult<RunningTotal> {
    PIPELINE.iter().try_fold(base, |running, stage| {
        let items_before = running.breakdown.len();
        let next = (stage.apply)(request, usage, running)?;
        trace!(
            stage = stage.name,
            applied = next.breakdown.len() > items_before,
            total = %next.total,
            "Adjustment stage evaluated"
        );
        Ok(next)
    })
}

/// One-time setup fee
pub fn apply_setup_fee(
    request: &EstimateRequest,
    _usage: u64,
    mut running: RunningTotal,
) -> AppResult<RunningTotal> {
    if !request.includes_setup() {
        return Ok(running);
    }
    if let Some(fee) = request.setup_fee {
        running.try_push(LineItem::new("Setup Fee", format!("One-time setup fee {}", fee), fee))?;
    }
    Ok(running)
}

/// Credit for free units, always valued at `perUnitAmount` whichever model is selected
pub fn apply_freemium(
    request: &EstimateRequest,
    usage: u64,
    mut running: RunningTotal,
) -> AppResult<RunningTotal> {
    if !request.includes_freemium() {
        return Ok(running);
    }
    let Some(free_units) = request.free_units else {
        return Ok(running);
    };

    let credited_units = free_units.min(usage);
    let rate = request.safe_per_unit_amount();
    let credit = try_mul(rate, Decimal::from(credited_units))?;
    if credit > Decimal::ZERO {
        running.try_push(LineItem::new(
            "Freemium Credit",
            format!("{} free units x {}", credited_units, rate),
            -credit,
        ))?;
    }
    Ok(running)
}

/// Raise the total to the committed minimum; never lowers it
pub fn apply_minimum_commitment(
    request: &EstimateRequest,
    _usage: u64,
    mut running: RunningTotal,
) -> AppResult<RunningTotal> {
    if !request.includes_commitment() {
        return Ok(running);
    }
    let Some(minimum) = request.min_commitment_amount else {
        return Ok(running);
    };

    if running.total < minimum {
        let uplift = try_sub(minimum, running.total)?;
        let calculation = format!("Uplift from {} to committed minimum {}", running.total, minimum);
        running.try_push(LineItem::new("Minimum Commitment", calculation, uplift))?;
    }
    Ok(running)
}

/// Percentage discount, or the flat discount when no percentage is set.
/// The total is not floored and may go negative.
pub fn apply_discount(
    request: &EstimateRequest,
    _usage: u64,
    mut running: RunningTotal,
) -> AppResult<RunningTotal> {
    if !request.includes_discount() {
        return Ok(running);
    }

    let pct = request.safe_discount_pct();
    let flat = request.safe_flat_discount_amount();
    let (discount, calculation) = if pct > Decimal::ZERO {
        let amount = round_currency(try_percent_of(running.total, pct)?);
        (amount, format!("{}% of {}", pct, running.total))
    } else if flat > Decimal::ZERO {
        (flat, format!("Flat discount {}", flat))
    } else {
        (Decimal::ZERO, String::new())
    };

    if discount > Decimal::ZERO {
        running.try_push(LineItem::new("Discount", calculation, -discount))?;
    }
    Ok(running)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricingModel;
    use crate::utils::error::AppError;
    use rust_decimal_macros::dec;

    fn running(total: Decimal) -> RunningTotal {
        RunningTotal {
            breakdown: vec![LineItem::new("Base", "test", total)],
            total,
        }
    }

    fn request() -> EstimateRequest {
        EstimateRequest::for_model(PricingModel::FlatFee)
    }

    #[test]
    fn test_setup_fee_requires_toggle_and_amount() {
        let mut req = request();
        req.setup_fee = Some(dec!(25));
        assert_eq!(apply_setup_fee(&req, 0, running(dec!(100))).unwrap().total, dec!(100));

        req.include_setup = Some(true);
        let result = apply_setup_fee(&req, 0, running(dec!(100))).unwrap();
        assert_eq!(result.total, dec!(125));
        assert_eq!(result.breakdown.last().unwrap().label, "Setup Fee");

        req.setup_fee = None;
        assert_eq!(apply_setup_fee(&req, 0, running(dec!(100))).unwrap().breakdown.len(), 1);
    }

    #[test]
    fn test_freemium_caps_at_usage() {
        let req = EstimateRequest {
            include_freemium: Some(true),
            free_units: Some(5000),
            per_unit_amount: Some(dec!(0.02)),
            ..request()
        };

        let result = apply_freemium(&req, 1000, running(dec!(20))).unwrap();
        assert_eq!(result.breakdown.last().unwrap().amount, dec!(-20.00));
        assert_eq!(result.total, Decimal::ZERO);
    }

    #[test]
    fn test_freemium_without_unit_rate_is_silent() {
        let req = EstimateRequest {
            include_freemium: Some(true),
            free_units: Some(100),
            ..request()
        };

        let result = apply_freemium(&req, 1000, running(dec!(100))).unwrap();
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.total, dec!(100));
    }

    #[test]
    fn test_minimum_commitment_only_raises() {
        let req = EstimateRequest {
            include_commitment: Some(true),
            min_commitment_amount: Some(dec!(150)),
            ..request()
        };

        let raised = apply_minimum_commitment(&req, 0, running(dec!(100))).unwrap();
        assert_eq!(raised.total, dec!(150));
        assert_eq!(raised.breakdown.last().unwrap().amount, dec!(50));

        let untouched = apply_minimum_commitment(&req, 0, running(dec!(200))).unwrap();
        assert_eq!(untouched.total, dec!(200));
        assert_eq!(untouched.breakdown.len(), 1);

        let equal = apply_minimum_commitment(&req, 0, running(dec!(150))).unwrap();
        assert_eq!(equal.breakdown.len(), 1);
    }

    #[test]
    fn test_percentage_discount_wins_over_flat() {
        let req = EstimateRequest {
            include_discount: Some(true),
            discount_pct: Some(dec!(10)),
            flat_discount_amount: Some(dec!(50)),
            ..request()
        };

        let result = apply_discount(&req, 0, running(dec!(100))).unwrap();
        let discounts: Vec<_> = result.breakdown.iter().filter(|i| i.label == "Discount").collect();
        assert_eq!(discounts.len(), 1);
        assert_eq!(discounts[0].amount, dec!(-10.00));
        assert_eq!(result.total, dec!(90.00));
    }

    #[test]
    fn test_percentage_discount_rounds_half_up() {
        let req = EstimateRequest {
            include_discount: Some(true),
            discount_pct: Some(dec!(15)),
            ..request()
        };

        // 15% of 0.50 = 0.075
        let result = apply_discount(&req, 0, running(dec!(0.50))).unwrap();
        assert_eq!(result.breakdown.last().unwrap().amount, dec!(-0.08));
    }

    #[test]
    fn test_flat_discount_can_push_total_negative() {
        let req = EstimateRequest {
            include_discount: Some(true),
            flat_discount_amount: Some(dec!(30)),
            ..request()
        };

        let result = apply_discount(&req, 0, running(dec!(20))).unwrap();
        assert_eq!(result.total, dec!(-10));
    }

    #[test]
    fn test_pipeline_order() {
        let names: Vec<&str> = PIPELINE.iter().map(|stage| stage.name).collect();
        assert_eq!(names, vec!["setup_fee", "freemium", "minimum_commitment", "discount"]);
    }

    fn assert_out_of_range(result: AppResult<RunningTotal>) {
        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "amount out of range"),
            other => panic!("Expected out of range error, got {:?}", other),
        }
    }

    #[test]
    fn test_setup_fee_overflow_is_validation_error() {
        let req = EstimateRequest {
            include_setup: Some(true),
            setup_fee: Some(dec!(1)),
            ..request()
        };
        assert_out_of_range(apply_setup_fee(&req, 0, running(Decimal::MAX)));
    }

    #[test]
    fn test_freemium_overflow_is_validation_error() {
        let req = EstimateRequest {
            include_freemium: Some(true),
            free_units: Some(u64::MAX),
            per_unit_amount: Some(dec!(10000000000)),
            ..request()
        };
        assert_out_of_range(apply_freemium(&req, u64::MAX, running(dec!(100))));
    }

    #[test]
    fn test_minimum_commitment_overflow_is_validation_error() {
        let req = EstimateRequest {
            include_commitment: Some(true),
            min_commitment_amount: Some(dec!(1)),
            ..request()
        };
        assert_out_of_range(apply_minimum_commitment(&req, 0, running(Decimal::MIN)));
    }

    #[test]
    fn test_discount_overflow_is_validation_error() {
        let pct = EstimateRequest {
            include_discount: Some(true),
            discount_pct: Some(dec!(1000000)),
            ..request()
        };
        assert_out_of_range(apply_discount(&pct, 0, running(dec!(1000000000000000000000000))));

        let flat = EstimateRequest {
            include_discount: Some(true),
            flat_discount_amount: Some(dec!(1)),
            ..request()
        };
        assert_out_of_range(apply_discount(&flat, 0, running(Decimal::MIN)));
    }

    #[test]
    fn test_pipeline_stops_at_failing_stage() {
        let req = EstimateRequest {
            include_setup: Some(true),
            setup_fee: Some(dec!(1)),
            include_commitment: Some(true),
            min_commitment_amount: Some(dec!(10)),
            ..request()
        };

        assert_out_of_range(apply_adjustments(&req, 0, running(Decimal::MAX)));
        let ok = apply_adjustments(&req, 0, running(dec!(2))).unwrap();
        assert_eq!(ok.total, dec!(10));
    }
}
