pub mod builder;
pub mod quiz;

pub use builder::{
    build_questions,
    lookup_definitions,
    BuildReport,
    QuizQuestion,
    SpellingLookup,
};
pub use quiz::{
    ChooseOutcome,
    SimilarQuiz,
    AUTO_ADVANCE_DELAY,
};
