use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RatingTier {
    Beginner,
    Intermediate,
    Advanced,
    SemiPro,
    Pro,
}

const TIERS: [(RatingTier, f64, f64); 5] = [
    (RatingTier::Beginner, 0.0, 3.5),
    (RatingTier::Intermediate, 3.5, 4.5),
    (RatingTier::Advanced, 4.5, 5.5),
    (RatingTier::SemiPro, 5.5, 6.5),
    (RatingTier::Pro, 6.5, f64::INFINITY),
];

impl RatingTier {
    pub fn label(&self) -> &'static str {
        match self {
            RatingTier::Beginner => "Beginner",
            RatingTier::Intermediate => "Intermediate",
            RatingTier::Advanced => "Advanced",
            RatingTier::SemiPro => "Semi-pro",
            RatingTier::Pro => "Pro",
        }
    }

    pub fn min_rating(&self) -> f64 {
        TIERS[self.index()].1
    }

    pub fn next(&self) -> Option<RatingTier> {
        TIERS.get(self.index() + 1).map(|(tier, _, _)| *tier)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Where a rating sits in the tier ladder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierProgress {
    pub rating: f64,
    pub tier: RatingTier,
    /// 0..=100 through the current tier; 100 at the top tier
    pub progress_percent: f64,
    pub next_tier: Option<RatingTier>,
    pub rating_needed: Option<f64>,
}

/// Ratings below zero land in the first tier
pub fn tier_for(rating: f64) -> RatingTier {
    TIERS
        .iter()
        .find(|(_, min, max)| rating >= *min && rating < *max)
        .map(|(tier, _, _)| *tier)
        .unwrap_or(if rating < 0.0 {
            RatingTier::Beginner
        } else {
            RatingTier::Pro
        })
}

pub fn tier_progress(rating: f64) -> TierProgress {
    let tier = tier_for(rating);
    let (_, min, max) = TIERS[tier.index()];

    let progress_percent = if max.is_infinite() {
        100.0
    } else {
        ((rating - min) / (max - min) * 100.0).clamp(0.0, 100.0)
    };
    let next_tier = tier.next();

    TierProgress {
        rating,
        tier,
        progress_percent,
        next_tier,
        rating_needed: next_tier.map(|next| next.min_rating() - rating),
    }
}
