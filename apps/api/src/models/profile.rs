use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Score at or above which a trait reads as `High`. Scores are means over
/// 1-5 Likert answers, so 3.0 is the scale midpoint.
pub const HIGH_LEVEL_THRESHOLD: f64 = 3.0;

/// The six HEXACO personality dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HexacoTrait {
    HonestyHumility,
    Emotionality,
    Extraversion,
    Agreeableness,
    Conscientiousness,
    Openness,
}

impl HexacoTrait {
    /// Fixed evaluation order used everywhere traits are iterated: H, E, X, A, C, O.
    pub const ORDER: [HexacoTrait; 6] = [
        HexacoTrait::HonestyHumility,
        HexacoTrait::Emotionality,
        HexacoTrait::Extraversion,
        HexacoTrait::Agreeableness,
        HexacoTrait::Conscientiousness,
        HexacoTrait::Openness,
    ];

    pub fn letter(self) -> char {
        match self {
            HexacoTrait::HonestyHumility => 'H',
            HexacoTrait::Emotionality => 'E',
            HexacoTrait::Extraversion => 'X',
            HexacoTrait::Agreeableness => 'A',
            HexacoTrait::Conscientiousness => 'C',
            HexacoTrait::Openness => 'O',
        }
    }

    /// Position in [`HexacoTrait::ORDER`].
    pub fn index(self) -> usize {
        match self {
            HexacoTrait::HonestyHumility => 0,
            HexacoTrait::Emotionality => 1,
            HexacoTrait::Extraversion => 2,
            HexacoTrait::Agreeableness => 3,
            HexacoTrait::Conscientiousness => 4,
            HexacoTrait::Openness => 5,
        }
    }
}

/// Binary reading of a trait score, split at [`HIGH_LEVEL_THRESHOLD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitLevel {
    High,
    Low,
}

/// A user's six HEXACO scores, each the mean over ten questionnaire items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitScores {
    pub h: f64,
    pub e: f64,
    pub x: f64,
    pub a: f64,
    pub c: f64,
    pub o: f64,
}

impl TraitScores {
    pub fn score(&self, dimension: HexacoTrait) -> f64 {
        match dimension {
            HexacoTrait::HonestyHumility => self.h,
            HexacoTrait::Emotionality => self.e,
            HexacoTrait::Extraversion => self.x,
            HexacoTrait::Agreeableness => self.a,
            HexacoTrait::Conscientiousness => self.c,
            HexacoTrait::Openness => self.o,
        }
    }

    pub fn level(&self, dimension: HexacoTrait) -> TraitLevel {
        if self.score(dimension) >= HIGH_LEVEL_THRESHOLD {
            TraitLevel::High
        } else {
            TraitLevel::Low
        }
    }
}

/// One diagnostic submission. Submissions append; the current profile is the
/// most recent row by `diagnosed_at`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HexacoResultRow {
    pub result_id: i32,
    pub user_did: String,
    pub h: f64,
    pub e: f64,
    pub x: f64,
    pub a: f64,
    pub c: f64,
    pub o: f64,
    pub diagnosed_at: DateTime<Utc>,
}

impl From<HexacoResultRow> for TraitScores {
    fn from(row: HexacoResultRow) -> Self {
        TraitScores {
            h: row.h,
            e: row.e,
            x: row.x,
            a: row.a,
            c: row.c,
            o: row.o,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_splits_at_threshold() {
        let scores = TraitScores {
            h: 3.0,
            e: 2.99,
            x: 5.0,
            a: 1.0,
            c: 3.01,
            o: 2.0,
        };
        assert_eq!(scores.level(HexacoTrait::HonestyHumility), TraitLevel::High);
        assert_eq!(scores.level(HexacoTrait::Emotionality), TraitLevel::Low);
        assert_eq!(scores.level(HexacoTrait::Extraversion), TraitLevel::High);
        assert_eq!(scores.level(HexacoTrait::Conscientiousness), TraitLevel::High);
    }

    #[test]
    fn test_order_covers_all_traits_once() {
        for (i, dimension) in HexacoTrait::ORDER.into_iter().enumerate() {
            assert_eq!(dimension.index(), i);
        }
    }
}
