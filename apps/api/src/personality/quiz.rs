//! The 60-item HEXACO questionnaire and its scoring.
//!
//! Items cycle through the traits in a fixed stride (O, C, A, X, E, H,
//! repeating), ten items per trait. Reverse-keyed items score `6 - answer`.
//! Each trait score is the mean of its ten item scores.

use thiserror::Error;

use crate::models::profile::{HexacoTrait, TraitScores};

pub const QUESTION_COUNT: usize = 60;

pub const QUESTIONS: [&str; QUESTION_COUNT] = [
    // 1-10
    "I believe in the importance of art.",
    "I like keeping things neat and organized.",
    "I stay gentle even with people who deserve my anger.",
    "I rarely talk to people.",
    "I think of myself as a coward.",
    "I laugh along with jokes I don't find funny when I want something from someone.",
    "I'm interested in learning about history and science.",
    "I push myself hard to reach my goals.",
    "I can have a sharp tongue.",
    "I'm good at speaking in front of people off the cuff.",
    // 11-20
    "I worry about a lot of things.",
    "If I were sure I could never get caught, I might steal a fortune.",
    "Sudden flashes of insight rarely come to me.",
    "I keep working until everything is perfect.",
    "I demand a lot and am hard to satisfy.",
    "I'm good at making friends.",
    "I'm easily influenced by other people.",
    "Becoming very rich is not especially important to me.",
    "People think of me as an oddball.",
    "I sometimes decide things without thinking them through.",
    // 21-30
    "I rarely feel anger toward other people.",
    "I'm usually full of energy and on the move.",
    "Hearing about sad events makes me sad right away.",
    "I think of myself as an ordinary person, nothing special.",
    "I love coming up with new ideas.",
    "I want to pursue the highest quality in my work.",
    "I find it hard to forgive people.",
    "I'm the one who livens up a party.",
    "I would panic if danger were closing in.",
    "I avoid flattering my boss to get ahead, even when it would work.",
    // 31-40
    "I like people who do things differently from everyone else.",
    "I make plans in advance and act on them.",
    "I get irritated and angry when people don't meet my expectations.",
    "I can take the lead in a group.",
    "I often worry over things that turn out not to matter.",
    "I would not accept a bribe, no matter how large.",
    "I barely notice the emotional side of paintings and photographs.",
    "I often forget to put things back where they belong.",
    "Other people's mistakes irritate me.",
    "A job full of social interaction would not suit me.",
    // 41-50
    "I feel the need for someone to protect me.",
    "Owning expensive brand-name things makes me really happy.",
    "I'm unlikely to dig deeply into any subject.",
    "I hold my work to exacting standards.",
    "Little things irritate me easily.",
    "I often laugh out loud.",
    "I feel other people's emotions as if they were my own.",
    "I think I stand out more than the average person.",
    "I don't have much of an imagination.",
    "I pay close attention to details.",
    // 51-60
    "I rarely complain or grumble.",
    "I laugh loudly and with gusto.",
    "Facing real danger, I wouldn't be able to stop shaking.",
    "I won't pretend to like someone just to get a favor from them.",
    "Abstract subjects like philosophy don't interest me.",
    "I carry things out according to plan.",
    "It annoys me when others rearrange what I've organized.",
    "I sometimes find it hard to start a conversation with someone.",
    "I respond readily to what other people need.",
    "If there were no risk of being caught, I'd be tempted to pass counterfeit money.",
];

/// Per-item scoring key in questionnaire order: the trait the item loads on
/// and whether it is reverse-keyed.
const SCORING_KEY: [(HexacoTrait, bool); QUESTION_COUNT] = {
    use HexacoTrait::*;
    [
        // 1-10
        (Openness, false),
        (Conscientiousness, false),
        (Agreeableness, false),
        (Extraversion, true),
        (Emotionality, false),
        (HonestyHumility, true),
        (Openness, false),
        (Conscientiousness, false),
        (Agreeableness, true),
        (Extraversion, false),
        // 11-20
        (Emotionality, false),
        (HonestyHumility, true),
        (Openness, true),
        (Conscientiousness, false),
        (Agreeableness, true),
        (Extraversion, false),
        (Emotionality, false),
        (HonestyHumility, false),
        (Openness, false),
        (Conscientiousness, true),
        // 21-30
        (Agreeableness, false),
        (Extraversion, false),
        (Emotionality, false),
        (HonestyHumility, false),
        (Openness, false),
        (Conscientiousness, false),
        (Agreeableness, true),
        (Extraversion, false),
        (Emotionality, false),
        (HonestyHumility, false),
        // 31-40
        (Openness, false),
        (Conscientiousness, false),
        (Agreeableness, true),
        (Extraversion, false),
        (Emotionality, false),
        (HonestyHumility, false),
        (Openness, true),
        (Conscientiousness, true),
        (Agreeableness, true),
        (Extraversion, true),
        // 41-50
        (Emotionality, false),
        (HonestyHumility, true),
        (Openness, true),
        (Conscientiousness, false),
        (Agreeableness, true),
        (Extraversion, false),
        (Emotionality, false),
        (HonestyHumility, true),
        (Openness, true),
        (Conscientiousness, false),
        // 51-60
        (Agreeableness, false),
        (Extraversion, false),
        (Emotionality, false),
        (HonestyHumility, false),
        (Openness, true),
        (Conscientiousness, false),
        (Agreeableness, true),
        (Extraversion, true),
        (Emotionality, false),
        (HonestyHumility, true),
    ]
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("expected {QUESTION_COUNT} answers, got {0}")]
    WrongAnswerCount(usize),

    #[error("answer {value} at item {item} is outside the 1-5 scale")]
    OutOfScale { item: usize, value: u8 },
}

/// Scores a complete answer sheet into the six trait means.
pub fn calculate_scores(answers: &[u8]) -> Result<TraitScores, QuizError> {
    if answers.len() != QUESTION_COUNT {
        return Err(QuizError::WrongAnswerCount(answers.len()));
    }

    let mut sums = [0.0_f64; 6];
    let mut counts = [0_u32; 6];

    for (i, (&answer, &(dimension, reversed))) in
        answers.iter().zip(SCORING_KEY.iter()).enumerate()
    {
        if !(1..=5).contains(&answer) {
            return Err(QuizError::OutOfScale {
                item: i + 1,
                value: answer,
            });
        }
        let value = f64::from(if reversed { 6 - answer } else { answer });
        sums[dimension.index()] += value;
        counts[dimension.index()] += 1;
    }

    let mean = |dimension: HexacoTrait| {
        sums[dimension.index()] / counts[dimension.index()] as f64
    };

    Ok(TraitScores {
        h: mean(HexacoTrait::HonestyHumility),
        e: mean(HexacoTrait::Emotionality),
        x: mean(HexacoTrait::Extraversion),
        a: mean(HexacoTrait::Agreeableness),
        c: mean(HexacoTrait::Conscientiousness),
        o: mean(HexacoTrait::Openness),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_trait_has_ten_items() {
        let mut counts = [0_u32; 6];
        for (dimension, _) in SCORING_KEY {
            counts[dimension.index()] += 1;
        }
        assert_eq!(counts, [10; 6]);
    }

    #[test]
    fn test_all_threes_scores_midpoint_everywhere() {
        let scores = calculate_scores(&[3; QUESTION_COUNT]).unwrap();
        for dimension in HexacoTrait::ORDER {
            assert_eq!(scores.score(dimension), 3.0);
        }
    }

    #[test]
    fn test_reverse_keyed_items_invert() {
        // All fives: forward items score 5, reverse-keyed items score 1.
        // Emotionality has no reverse-keyed items; Honesty-Humility has five.
        let scores = calculate_scores(&[5; QUESTION_COUNT]).unwrap();
        assert_eq!(scores.e, 5.0);
        assert_eq!(scores.h, 3.0);
    }

    #[test]
    fn test_wrong_answer_count_is_an_error() {
        assert_eq!(
            calculate_scores(&[3; 59]),
            Err(QuizError::WrongAnswerCount(59))
        );
    }

    #[test]
    fn test_out_of_scale_answer_is_an_error() {
        let mut answers = [3; QUESTION_COUNT];
        answers[10] = 6;
        assert_eq!(
            calculate_scores(&answers),
            Err(QuizError::OutOfScale { item: 11, value: 6 })
        );
    }

    #[test]
    fn test_questions_and_key_stay_in_step() {
        assert_eq!(QUESTIONS.len(), SCORING_KEY.len());
    }
}
