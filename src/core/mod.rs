pub mod dates;
pub mod errors;
pub mod models;

pub use errors::VocabError;
pub use models::{
    AttemptResult,
    CaptureCandidate,
    NewVocabulary,
    PagedResult,
    UpsertVocabulary,
    VocabularyItem,
};
