//! Revenue estimate data models
//!
//! Defines the estimate request, response and line item structures exchanged
//! with the pricing UI. Field names are camelCase on the wire.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base pricing algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingModel {
    /// Fixed fee with an included allotment and per-unit overage
    FlatFee,
    /// Every unit billed at one rate
    UsageBased,
    /// Progressive brackets, each band billed at its own rate
    Tiered,
    /// Whole usage billed at the rate of the single matching band
    VolumeBased,
    /// Flat charge of the single matching bracket
    StairStep,
}

impl PricingModel {
    /// All selectable models, in UI display order
    pub const ALL: [PricingModel; 5] = [
        PricingModel::FlatFee,
        PricingModel::UsageBased,
        PricingModel::Tiered,
        PricingModel::VolumeBased,
        PricingModel::StairStep,
    ];

    /// Wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingModel::FlatFee => "FLAT_FEE",
            PricingModel::UsageBased => "USAGE_BASED",
            PricingModel::Tiered => "TIERED",
            PricingModel::VolumeBased => "VOLUME_BASED",
            PricingModel::StairStep => "STAIR_STEP",
        }
    }

    /// Short human readable description
    pub fn description(&self) -> &'static str {
        match self {
            PricingModel::FlatFee => "Flat fee with included units and per-unit overage",
            PricingModel::UsageBased => "Every unit billed at a single per-unit rate",
            PricingModel::Tiered => "Usage billed progressively across ascending tiers",
            PricingModel::VolumeBased => "All usage billed at the rate of the matching tier",
            PricingModel::StairStep => "Flat charge of the step containing the usage",
        }
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Usage band with a per-unit rate, used by tiered and volume pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    /// First unit of the band (inclusive)
    #[serde(default)]
    pub min_units: u64,
    /// Last unit of the band (inclusive), `None` means unbounded
    #[serde(default)]
    pub max_units: Option<u64>,
    /// Price charged per unit inside the band
    #[serde(default)]
    pub price_per_unit: Decimal,
}

impl Tier {
    pub fn new(min_units: u64, max_units: Option<u64>, price_per_unit: Decimal) -> Self {
        Self {
            min_units,
            max_units,
            price_per_unit,
        }
    }

    /// Whether `usage` falls inside `[min_units, max_units]`
    pub fn contains(&self, usage: u64) -> bool {
        usage >= self.min_units && self.max_units.map_or(true, |max| usage <= max)
    }

    /// Human readable range, e.g. `0-999` or `1000+`
    pub fn range_label(&self) -> String {
        range_label(self.min_units, self.max_units)
    }
}

/// Usage bracket with a flat monthly charge, used by stair-step pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// First unit of the bracket (inclusive)
    #[serde(default)]
    pub usage_threshold_start: u64,
    /// Last unit of the bracket (inclusive), `None` means unbounded
    #[serde(default)]
    pub usage_threshold_end: Option<u64>,
    /// Charge for any usage inside the bracket
    #[serde(default)]
    pub monthly_charge: Decimal,
}

impl Step {
    pub fn new(start: u64, end: Option<u64>, monthly_charge: Decimal) -> Self {
        Self {
            usage_threshold_start: start,
            usage_threshold_end: end,
            monthly_charge,
        }
    }

    /// Whether `usage` falls inside `[start, end]`
    pub fn contains(&self, usage: u64) -> bool {
        usage >= self.usage_threshold_start
            && self.usage_threshold_end.map_or(true, |end| usage <= end)
    }

    pub fn range_label(&self) -> String {
        range_label(self.usage_threshold_start, self.usage_threshold_end)
    }
}

fn range_label(start: u64, end: Option<u64>) -> String {
    match end {
        Some(end) => format!("{}-{}", start, end),
        None => format!("{}+", start),
    }
}

/// Revenue estimate request
///
/// Every numeric field is optional on the wire. Use the `safe_*` accessors,
/// which default absent values to zero, instead of reading fields directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    /// Selected base pricing algorithm (required)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing_model: Option<PricingModel>,
    /// Units consumed in the period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<u64>,

    /// Flat fee charged regardless of usage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flat_fee_amount: Option<Decimal>,
    /// Units included in the flat fee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_api_calls: Option<u64>,
    /// Rate applied to units beyond the included allotment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overage_unit_rate: Option<Decimal>,

    /// Per-unit rate for usage-based pricing, also used to value freemium units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_unit_amount: Option<Decimal>,

    /// Tiers for tiered and volume pricing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiers: Option<Vec<Tier>>,
    /// Steps for stair-step pricing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_setup: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_fee: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_freemium: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_units: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_commitment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_commitment_amount: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_discount: Option<bool>,
    /// Percentage discount, takes precedence over the flat discount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_pct: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flat_discount_amount: Option<Decimal>,
}

impl EstimateRequest {
    /// Create a request for the given model with every other field absent
    pub fn for_model(pricing_model: PricingModel) -> Self {
        Self {
            pricing_model: Some(pricing_model),
            ..Default::default()
        }
    }

    pub fn safe_usage(&self) -> u64 {
        self.usage.unwrap_or(0)
    }

    pub fn safe_flat_fee_amount(&self) -> Decimal {
        self.flat_fee_amount.unwrap_or(Decimal::ZERO)
    }

    pub fn safe_included_units(&self) -> u64 {
        self.number_of_api_calls.unwrap_or(0)
    }

    pub fn safe_overage_unit_rate(&self) -> Decimal {
        self.overage_unit_rate.unwrap_or(Decimal::ZERO)
    }

    pub fn safe_per_unit_amount(&self) -> Decimal {
        self.per_unit_amount.unwrap_or(Decimal::ZERO)
    }

    pub fn safe_tiers(&self) -> &[Tier] {
        self.tiers.as_deref().unwrap_or(&[])
    }

    pub fn safe_steps(&self) -> &[Step] {
        self.steps.as_deref().unwrap_or(&[])
    }

    pub fn safe_discount_pct(&self) -> Decimal {
        self.discount_pct.unwrap_or(Decimal::ZERO)
    }

    pub fn safe_flat_discount_amount(&self) -> Decimal {
        self.flat_discount_amount.unwrap_or(Decimal::ZERO)
    }

    pub fn includes_setup(&self) -> bool {
        self.include_setup.unwrap_or(false)
    }

    pub fn includes_freemium(&self) -> bool {
        self.include_freemium.unwrap_or(false)
    }

    pub fn includes_commitment(&self) -> bool {
        self.include_commitment.unwrap_or(false)
    }

    pub fn includes_discount(&self) -> bool {
        self.include_discount.unwrap_or(false)
    }
}

/// One labeled charge or credit in the breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Category name
    pub label: String,
    /// How the amount was derived, for display only
    pub calculation: String,
    /// Positive for charges, negative for credits
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
}

impl LineItem {
    pub fn new(label: impl Into<String>, calculation: impl Into<String>, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            calculation: calculation.into(),
            amount,
        }
    }
}

/// Revenue estimate response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    /// Echo of the selected pricing model
    pub model_type: PricingModel,
    /// Line items in computation order
    pub breakdown: Vec<LineItem>,
    /// Final total, two fractional digits
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total: Decimal,
}

/// Entry of the pricing model catalogue served to the UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingModelInfo {
    pub id: PricingModel,
    pub description: String,
}

impl From<PricingModel> for PricingModelInfo {
    fn from(model: PricingModel) -> Self {
        Self {
            id: model,
            description: model.description().to_string(),
        }
    }
}
