//! Acceleration (forsering) under §33.8.
//!
//! When the owner rejects or reduces a time claim the contractor may treat
//! the rejection as an instruction to accelerate. The acceleration cost is
//! capped by the 30% rule: the ceiling is 30% of the liquidated damages that
//! would have accrued over the rejected days.
//!
//! The calculator does not check that a rejection exists; callers gate on
//! `rejected_days > 0` themselves (see [`Case::acceleration_assessment`]).
//!
//! [`Case::acceleration_assessment`]: crate::Case::acceleration_assessment

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The contractual 30% factor.
pub fn thirty_percent() -> Decimal {
    Decimal::new(30, 2)
}

/// Cost ceiling for an acceleration: `0.30 * daily_rate * rejected_days`.
pub fn cost_ceiling(daily_rate: Decimal, rejected_days: i64) -> EngineResult<Decimal> {
    if rejected_days < 0 {
        tracing::warn!(rejected_days, "acceleration ceiling requested for negative days");
        return Err(EngineError::NegativeDays(rejected_days));
    }
    if daily_rate.is_sign_negative() && !daily_rate.is_zero() {
        tracing::warn!(%daily_rate, "acceleration ceiling requested for negative rate");
        return Err(EngineError::NegativeRate(daily_rate));
    }
    thirty_percent()
        .checked_mul(daily_rate)
        .and_then(|partial| partial.checked_mul(Decimal::from(rejected_days)))
        .ok_or_else(|| {
            tracing::warn!(%daily_rate, rejected_days, "acceleration ceiling out of range");
            EngineError::CeilingOverflow {
                daily_rate,
                rejected_days,
            }
        })
}

/// Result of checking an acceleration against the 30% rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccelerationAssessment {
    pub daily_rate: Decimal,
    pub rejected_days: i64,
    pub cost_ceiling: Decimal,
    /// The declared estimate, when one exists.
    pub estimated_cost: Option<Decimal>,
    /// `estimated_cost <= cost_ceiling`. True when no estimate is declared.
    pub within_ceiling: bool,
}

/// Assess a declared estimate against the ceiling.
pub fn assess(
    daily_rate: Decimal,
    rejected_days: i64,
    estimated_cost: Decimal,
) -> EngineResult<AccelerationAssessment> {
    let mut assessment = ceiling_only(daily_rate, rejected_days)?;
    assessment.within_ceiling = estimated_cost <= assessment.cost_ceiling;
    assessment.estimated_cost = Some(estimated_cost);
    tracing::debug!(
        %daily_rate,
        rejected_days,
        cost_ceiling = %assessment.cost_ceiling,
        %estimated_cost,
        within_ceiling = assessment.within_ceiling,
        "assessed acceleration"
    );
    Ok(assessment)
}

/// The ceiling without an estimate to compare against.
pub fn ceiling_only(daily_rate: Decimal, rejected_days: i64) -> EngineResult<AccelerationAssessment> {
    Ok(AccelerationAssessment {
        daily_rate,
        rejected_days,
        cost_ceiling: cost_ceiling(daily_rate, rejected_days)?,
        estimated_cost: None,
        within_ceiling: true,
    })
}

/// Where an acceleration stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccelerationStage {
    NotDeclared,
    Declared,
    InEffect,
    Stopped,
}

/// Contractor-declared acceleration attached to a case.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Acceleration {
    #[serde(default)]
    pub declared: bool,
    #[serde(default)]
    pub declared_on: Option<NaiveDate>,
    #[serde(default)]
    pub estimated_cost: Option<Decimal>,
    #[serde(default)]
    pub rationale: String,
    /// The contractor has confirmed the estimate is within the 30% rule.
    #[serde(default)]
    pub thirty_percent_acknowledged: bool,
    #[serde(default)]
    pub put_into_effect: bool,
    #[serde(default)]
    pub effective_on: Option<NaiveDate>,
    #[serde(default)]
    pub stopped: bool,
}

impl Acceleration {
    pub fn stage(&self) -> AccelerationStage {
        if !self.declared {
            AccelerationStage::NotDeclared
        } else if self.stopped {
            AccelerationStage::Stopped
        } else if self.put_into_effect {
            AccelerationStage::InEffect
        } else {
            AccelerationStage::Declared
        }
    }
}
