//! Notification compliance matrix.
//!
//! A per-point view of the [`PreclusionReport`] for display. Each of the six
//! points becomes one indicator row; the matrix also answers the two
//! questions the owner usually asks first: is anything missing, and has
//! anything been objected to.
//!
//! ```text
//! §32.2 | Varsel om endring | Sendt | 2025-02-01
//! §33.4 | Nøytralt varsel om fristforlengelse | Ikke relevant | -
//! ```

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::preclusion::{NotificationPoint, PointStatus, PreclusionReport};

/// One row of the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceIndicator {
    pub point: NotificationPoint,
    pub label: String,
    pub paragraph: String,
    pub status: PointStatus,
    pub date: Option<NaiveDate>,
    pub objection_text: Option<String>,
}

/// The six indicators in fixed order, plus summary flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceMatrix {
    pub indicators: [ComplianceIndicator; 6],
    /// At least one applicable notice has not been sent.
    pub has_missing: bool,
    /// The owner has objected to at least one notice.
    pub has_objection: bool,
}

impl ComplianceMatrix {
    pub fn from_report(report: &PreclusionReport) -> Self {
        let indicators = report.points.clone().map(|evaluation| ComplianceIndicator {
            point: evaluation.point,
            label: evaluation.label,
            paragraph: evaluation.paragraph,
            status: evaluation.status,
            date: evaluation.date,
            objection_text: evaluation.objection_text,
        });
        let has_missing = indicators
            .iter()
            .any(|indicator| indicator.status == PointStatus::Missing);
        let has_objection = indicators
            .iter()
            .any(|indicator| indicator.status == PointStatus::Objected);
        Self {
            indicators,
            has_missing,
            has_objection,
        }
    }

    pub fn get(&self, point: NotificationPoint) -> &ComplianceIndicator {
        &self.indicators[point as usize]
    }

    /// Indicators for points that apply to the case.
    pub fn applicable(&self) -> impl Iterator<Item = &ComplianceIndicator> {
        self.indicators
            .iter()
            .filter(|indicator| indicator.status != PointStatus::NotApplicable)
    }
}

impl fmt::Display for ComplianceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, indicator) in self.indicators.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{} | {} | {} | ",
                indicator.paragraph,
                indicator.label,
                indicator.status.label()
            )?;
            match indicator.date {
                Some(date) => write!(f, "{}", date)?,
                None => f.write_str("-")?,
            }
            if let Some(objection) = &indicator.objection_text {
                write!(f, " | {}", objection)?;
            }
        }
        Ok(())
    }
}
