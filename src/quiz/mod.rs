pub mod session;
pub mod source;
pub mod walk;

pub use session::{
    AnswerOutcome,
    DictationSession,
    SaveState,
    SessionState,
};
pub use source::QuizSource;
pub use walk::ItemWalker;
