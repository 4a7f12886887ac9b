use crate::{
    core::{
        CaptureCandidate,
        PagedResult,
        VocabularyItem,
    },
    similar::BuildReport,
};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
    Upsert,
    SaveSession,
}

#[derive(Debug, Clone)]
pub enum TaskPayload {
    Dates(Result<Vec<String>, String>),
    Page { page: usize, result: Result<PagedResult, String> },
    Search(Result<Vec<VocabularyItem>, String>),
    Vocabulary(Result<VocabularyItem, String>),
    Items(Result<Vec<VocabularyItem>, String>),
    Captured(Result<Vec<CaptureCandidate>, String>),
    Mutated { kind: Mutation, result: Result<(), String> },
    SimilarQuiz(Result<BuildReport, String>),
    Definitions { question_index: usize, results: Vec<(String, Option<String>)> },
}

/// A finished background request, tagged with the id handed out when it started.
#[derive(Debug, Clone)]
pub struct TaskResult {
    pub request_id: RequestId,
    pub payload: TaskPayload,
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match &self.payload {
            TaskPayload::Dates(_) => "dates",
            TaskPayload::Page { .. } => "page",
            TaskPayload::Search(_) => "search",
            TaskPayload::Vocabulary(_) => "vocabulary",
            TaskPayload::Items(_) => "items",
            TaskPayload::Captured(_) => "captured",
            TaskPayload::Mutated { .. } => "mutated",
            TaskPayload::SimilarQuiz(_) => "similar_quiz",
            TaskPayload::Definitions { .. } => "definitions",
        }
    }
}
