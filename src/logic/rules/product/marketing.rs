use crate::logic::rules::Rule;
use crate::models::{AdviceCategory, AdvisoryLine, ProductSnapshot, QualityGrade, Severity};
use chrono::NaiveDate;

pub const PREMIUM_GRADE: &str =
    "⭐ Premium grade products can command higher prices - target specialty markets.";
pub const ORGANIC_GRADE: &str =
    "🌱 Organic certification adds value - highlight in your marketing materials.";

pub fn terroir_note(origin: &str) -> String {
    format!(
        "🗺️ Highlight the unique terroir of {} in your product story.",
        origin
    )
}

/// Quality grade rule
pub struct QualityGradeRule;

impl Rule<ProductSnapshot> for QualityGradeRule {
    fn id(&self) -> &'static str {
        "quality_grade"
    }

    fn name(&self) -> &'static str {
        "Quality Grade"
    }

    fn evaluate(&self, product: &ProductSnapshot, _today: NaiveDate) -> Vec<AdvisoryLine> {
        let text = match product.quality_grade {
            Some(QualityGrade::Premium) => PREMIUM_GRADE,
            Some(QualityGrade::Organic) => ORGANIC_GRADE,
            Some(QualityGrade::Standard) | Some(QualityGrade::Unspecified) | None => {
                return Vec::new()
            }
        };

        vec![AdvisoryLine::new(AdviceCategory::Quality, Severity::Info, text)]
    }
}

/// Origin story rule: any named origin is a selling point.
pub struct OriginRule;

impl Rule<ProductSnapshot> for OriginRule {
    fn id(&self) -> &'static str {
        "origin"
    }

    fn name(&self) -> &'static str {
        "Origin Story"
    }

    fn evaluate(&self, product: &ProductSnapshot, _today: NaiveDate) -> Vec<AdvisoryLine> {
        product
            .origin_location()
            .map(|origin| {
                AdvisoryLine::new(AdviceCategory::Origin, Severity::Info, terroir_note(origin))
            })
            .into_iter()
            .collect()
    }
}
