//! Weather trivia quizzes.

use rand::Rng;

use crate::types::{Quiz, QuizDifficulty};

/// Points (and experience) for a correct answer
pub const QUIZ_POINTS: u32 = 10;

/// Static quiz entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDef {
    pub id: &'static str,
    pub question: &'static str,
    pub options: &'static [&'static str],
    pub correct_index: usize,
    pub explanation: &'static str,
    pub difficulty: QuizDifficulty,
    pub category: &'static str,
}

impl QuizDef {
    pub fn to_quiz(&self) -> Quiz {
        Quiz {
            id: self.id.to_string(),
            question: self.question.to_string(),
            options: self.options.iter().map(|o| o.to_string()).collect(),
            correct_index: self.correct_index,
            explanation: self.explanation.to_string(),
            difficulty: self.difficulty,
            category: self.category.to_string(),
        }
    }
}

pub const CATALOG: &[QuizDef] = &[
    QuizDef {
        id: "clouds-cumulonimbus",
        question: "Which cloud type is most often associated with thunderstorms?",
        options: &["Cirrus", "Stratus", "Cumulonimbus", "Altocumulus"],
        correct_index: 2,
        explanation: "Cumulonimbus clouds grow tall enough to produce lightning, heavy rain and hail.",
        difficulty: QuizDifficulty::Easy,
        category: "clouds",
    },
    QuizDef {
        id: "pressure-falling",
        question: "What does a rapidly falling barometer usually signal?",
        options: &[
            "Clear skies ahead",
            "An approaching storm",
            "Rising temperatures",
            "Lower humidity",
        ],
        correct_index: 1,
        explanation: "Falling pressure means a low-pressure system is moving in, which brings clouds and precipitation.",
        difficulty: QuizDifficulty::Easy,
        category: "pressure",
    },
    QuizDef {
        id: "dew-point",
        question: "What happens when the air temperature drops to the dew point?",
        options: &[
            "The wind stops",
            "Pressure rises sharply",
            "Water vapor condenses",
            "Ozone forms",
        ],
        correct_index: 2,
        explanation: "At the dew point the air is saturated, so vapor condenses into dew, fog or cloud droplets.",
        difficulty: QuizDifficulty::Medium,
        category: "humidity",
    },
    QuizDef {
        id: "coriolis-hurricanes",
        question: "In which direction do hurricanes rotate in the Northern Hemisphere?",
        options: &["Clockwise", "Counterclockwise", "They do not rotate", "It varies randomly"],
        correct_index: 1,
        explanation: "The Coriolis effect turns low-pressure systems counterclockwise north of the equator.",
        difficulty: QuizDifficulty::Medium,
        category: "storms",
    },
    QuizDef {
        id: "lake-effect-snow",
        question: "Lake-effect snow forms when:",
        options: &[
            "Warm air moves over a frozen lake",
            "Cold air moves over warmer lake water",
            "A lake evaporates in summer",
            "Rain falls on a frozen lake",
        ],
        correct_index: 1,
        explanation: "Cold air picks up heat and moisture from unfrozen lake water, then dumps it as snow downwind.",
        difficulty: QuizDifficulty::Hard,
        category: "precipitation",
    },
];

pub fn find(id: &str) -> Option<&'static QuizDef> {
    CATALOG.iter().find(|q| q.id == id)
}

/// Uniformly random catalog entry
pub fn random() -> &'static QuizDef {
    let index = rand::thread_rng().gen_range(0..CATALOG.len());
    &CATALOG[index]
}
