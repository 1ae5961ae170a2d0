use serde::{Deserialize, Serialize};

/// User judgment on a filter decision: was hiding this post right?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackVerdict {
    Correct,
    Incorrect,
}

impl FeedbackVerdict {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackVerdict::Correct => "correct",
            FeedbackVerdict::Incorrect => "incorrect",
        }
    }
}
