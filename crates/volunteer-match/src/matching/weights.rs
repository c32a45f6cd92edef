//! Fixed business constants for each scoring dimension.
//!
//! Ladders are listed in evaluation order; the first band that matches wins.
//! The personalization and recommendation cut-offs are product-tunable rather
//! than structural.

use crate::domain::SkillImportance;

pub const SKILLS_MAX: f64 = 40.0;
pub const AVAILABILITY_MAX: f64 = 20.0;
pub const LOCATION_MAX: f64 = 15.0;
pub const CAUSE_MAX: f64 = 10.0;
pub const COMMITMENT_MAX: f64 = 10.0;
pub const PERSONALIZATION_MAX: f64 = 5.0;

pub const TOTAL_MAX: f64 = 100.0;

pub fn skill_weight(importance: SkillImportance) -> f64 {
    match importance {
        SkillImportance::Required => 15.0,
        SkillImportance::Preferred => 8.0,
        SkillImportance::Bonus => 5.0,
    }
}

/// Score used when the volunteer has not recorded weekly hours.
pub const AVAILABILITY_UNKNOWN: f64 = 5.0;
/// `(fraction of required hours covered, score)`, highest band first.
pub const AVAILABILITY_BANDS: [(f64, f64); 3] = [(1.0, 20.0), (0.75, 15.0), (0.5, 10.0)];
pub const AVAILABILITY_FLOOR: f64 = 5.0;

pub const LOCATION_REMOTE: f64 = 15.0;
pub const LOCATION_SAME_CITY: f64 = 15.0;
pub const LOCATION_SAME_STATE: f64 = 10.0;
/// `(distance strictly below km, score)`, nearest band first.
pub const DISTANCE_BANDS_KM: [(f64, f64); 3] = [(5.0, 15.0), (15.0, 12.0), (30.0, 8.0)];
pub const LOCATION_FLOOR: f64 = 5.0;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const CAUSE_MATCH: f64 = 10.0;
pub const CAUSE_NEUTRAL: f64 = 5.0;

pub const COMMITMENT_MATCH: f64 = 10.0;
pub const COMMITMENT_NEUTRAL: f64 = 5.0;
/// Long-term engagements must run strictly longer than this.
pub const LONG_TERM_MIN_DAYS: f64 = 180.0;
pub const SHORT_TERM_MAX_DAYS: f64 = 90.0;
pub const ONE_TIME_MAX_DAYS: f64 = 7.0;

pub const PREFERRED_ISSUER_BONUS: f64 = 5.0;
pub const ENGAGED_HISTORY_BONUS: f64 = 3.0;
/// Engagements needed before the history bonus applies (strictly more than).
pub const ENGAGED_HISTORY_THRESHOLD: usize = 3;

pub const PERFECT_MATCH_SCORE: f64 = 85.0;
pub const GREAT_MATCH_SCORE: f64 = 70.0;
pub const SKILL_GAP_BELOW: f64 = 20.0;
pub const TIME_GAP_BELOW: f64 = 15.0;

pub const HIGH_LABEL_MIN: u8 = 70;
pub const MEDIUM_LABEL_MIN: u8 = 40;
