//! Base pricing calculators
//!
//! One pure function per [`PricingModel`]. Each takes the request and the
//! resolved usage and returns the base line items together with their subtotal.
//! Caller-supplied tiers and steps are never reordered in place; every
//! calculator sorts its own copy.

use crate::models::{EstimateRequest, LineItem, PricingModel, Step, Tier};
use crate::utils::error::{helpers::validation_error, AppResult};
use crate::utils::money::{try_add, try_mul};
use rust_decimal::Decimal;

/// Line items and running total threaded through the estimate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningTotal {
    pub breakdown: Vec<LineItem>,
    pub total: Decimal,
}

impl RunningTotal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a charge or credit and fold its amount into the total
    pub fn try_push(&mut self, item: LineItem) -> AppResult<()> {
        self.total = try_add(self.total, item.amount)?;
        self.breakdown.push(item);
        Ok(())
    }
}

/// Run the base calculator selected by `model`
pub fn calculate_base(
    model: PricingModel,
    request: &EstimateRequest,
    usage: u64,
) -> AppResult<RunningTotal> {
    match model {
        PricingModel::FlatFee => flat_fee(request, usage),
        PricingModel::UsageBased => usage_based(request, usage),
        PricingModel::Tiered => tiered(request, usage),
        PricingModel::VolumeBased => volume_based(request, usage),
        PricingModel::StairStep => stair_step(request, usage),
    }
}

/// Flat fee plus overage for units beyond the included allotment
pub fn flat_fee(request: &EstimateRequest, usage: u64) -> AppResult<RunningTotal> {
    let mut result = RunningTotal::new();

    let fee = request.safe_flat_fee_amount();
    result.try_push(LineItem::new("Flat Fee", format!("Fixed fee {}", fee), fee))?;

    let included = request.safe_included_units();
    let over_units = usage.saturating_sub(included);
    let rate = request.safe_overage_unit_rate();
    if over_units > 0 && rate > Decimal::ZERO {
        result.try_push(LineItem::new(
            "Overage",
            format!(
                "{} units over {} included x {}",
                over_units, included, rate
            ),
            try_mul(rate, Decimal::from(over_units))?,
        ))?;
    }

    Ok(result)
}

/// Every unit billed at `perUnitAmount`
pub fn usage_based(request: &EstimateRequest, usage: u64) -> AppResult<RunningTotal> {
    let rate = request.safe_per_unit_amount();
    let mut result = RunningTotal::new();
    result.try_push(LineItem::new(
        "Usage Charge",
        format!("{} units x {}", usage, rate),
        try_mul(rate, Decimal::from(usage))?,
    ))?;
    Ok(result)
}

/// Progressive brackets: each tier reached by the usage bills its own band
pub fn tiered(request: &EstimateRequest, usage: u64) -> AppResult<RunningTotal> {
    let tiers = sorted_tiers(request.safe_tiers());
    let mut result = RunningTotal::new();

    // Signed arithmetic so inverted ranges are billed as given instead of wrapping.
    let mut remaining = i128::from(usage);
    for (index, tier) in tiers.iter().enumerate() {
        if usage < tier.min_units {
            continue;
        }
        let band_units = match tier.max_units {
            Some(max) => remaining.min(i128::from(max) - i128::from(tier.min_units) + 1),
            None => remaining,
        };
        let units = Decimal::try_from_i128_with_scale(band_units, 0)
            .map_err(|_| validation_error("amount out of range"))?;
        result.try_push(LineItem::new(
            format!("Tier {} ({})", index + 1, tier.range_label()),
            format!("{} units x {}", band_units, tier.price_per_unit),
            try_mul(units, tier.price_per_unit)?,
        ))?;
        remaining -= band_units;
        if remaining <= 0 {
            break;
        }
    }

    Ok(result)
}

/// Whole usage billed at the rate of the single matching tier
pub fn volume_based(request: &EstimateRequest, usage: u64) -> AppResult<RunningTotal> {
    let tiers = sorted_tiers(request.safe_tiers());
    let mut result = RunningTotal::new();

    let matched = tiers
        .iter()
        .find(|tier| tier.contains(usage))
        .or_else(|| tiers.last());

    if let Some(tier) = matched {
        result.try_push(LineItem::new(
            format!("Volume Tier ({})", tier.range_label()),
            format!("{} units x {}", usage, tier.price_per_unit),
            try_mul(Decimal::from(usage), tier.price_per_unit)?,
        ))?;
    }

    Ok(result)
}

/// Flat charge of the single matching step
pub fn stair_step(request: &EstimateRequest, usage: u64) -> AppResult<RunningTotal> {
    let steps = sorted_steps(request.safe_steps());
    let mut result = RunningTotal::new();

    let matched = steps
        .iter()
        .find(|step| step.contains(usage))
        .or_else(|| steps.last());

    if let Some(step) = matched {
        result.try_push(LineItem::new(
            format!("Stair Step ({})", step.range_label()),
            format!("{} units falls in step {}", usage, step.range_label()),
            step.monthly_charge,
        ))?;
    }

    Ok(result)
}

// Stable sorts: tiers sharing a lower bound keep the caller's order.
fn sorted_tiers(tiers: &[Tier]) -> Vec<Tier> {
    let mut sorted = tiers.to_vec();
    sorted.sort_by_key(|tier| tier.min_units);
    sorted
}

fn sorted_steps(steps: &[Step]) -> Vec<Step> {
    let mut sorted = steps.to_vec();
    sorted.sort_by_key(|step| step.usage_threshold_start);
    sorted
}
