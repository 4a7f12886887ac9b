use std::{
    future::Future,
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use chrono::NaiveDate;
use eframe::egui;
use tokio::runtime::Runtime;
use tracing::debug;

use super::types::{
    Mutation,
    RequestId,
    TaskPayload,
    TaskResult,
};
use crate::{
    api::VocabularyApi,
    core::{
        NewVocabulary,
        UpsertVocabulary,
        VocabError,
        VocabularyItem,
    },
    quiz::QuizSource,
    similar::{
        build_questions,
        lookup_definitions,
    },
};

/// Runs backend requests off the UI thread and hands results back through a channel.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    api: VocabularyApi,
    repaint: Option<egui::Context>,
    next_id: RequestId,
}

impl TaskManager {
    pub fn new(api: VocabularyApi) -> Result<Self, VocabError> {
        let runtime = Arc::new(Runtime::new()?);
        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, receiver, sender, api, repaint: None, next_id: 0 })
    }

    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn set_api(&mut self, api: VocabularyApi) {
        self.api = api;
    }

    pub fn api(&self) -> &VocabularyApi {
        &self.api
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn spawn<F, Fut>(&mut self, task: F) -> RequestId
    where
        F: FnOnce(VocabularyApi) -> Fut + Send + 'static,
        Fut: Future<Output = TaskPayload>,
    {
        self.next_id += 1;
        let request_id = self.next_id;
        let sender = self.sender.clone();
        let runtime = self.runtime.clone();
        let api = self.api.clone();
        let repaint = self.repaint.clone();

        thread::spawn(move || {
            let payload = runtime.block_on(task(api));
            let result = TaskResult { request_id, payload };
            debug!(request_id, task = result.task_type(), "task finished");
            let _ = sender.send(result);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });

        request_id
    }

    pub fn load_dates(&mut self) -> RequestId {
        self.spawn(|api| async move {
            TaskPayload::Dates(api.updated_dates().await.map_err(|e| e.to_string()))
        })
    }

    pub fn load_page(&mut self, page: usize, page_size: usize) -> RequestId {
        self.spawn(move |api| async move {
            let result = api.list_page(page, page_size).await.map_err(|e| e.to_string());
            TaskPayload::Page { page, result }
        })
    }

    pub fn search(&mut self, term: String) -> RequestId {
        self.spawn(move |api| async move {
            TaskPayload::Search(api.search(&term).await.map_err(|e| e.to_string()))
        })
    }

    pub fn load_vocabulary(&mut self, id: i64) -> RequestId {
        self.spawn(move |api| async move {
            TaskPayload::Vocabulary(api.get(id).await.map_err(|e| e.to_string()))
        })
    }

    pub fn load_items(&mut self, source: QuizSource) -> RequestId {
        self.spawn(move |api| async move {
            TaskPayload::Items(source.fetch(&api).await.map_err(|e| e.to_string()))
        })
    }

    pub fn capture(&mut self, text: String) -> RequestId {
        self.spawn(move |api| async move {
            TaskPayload::Captured(api.capture(&text).await.map_err(|e| e.to_string()))
        })
    }

    pub fn create(&mut self, form: NewVocabulary) -> RequestId {
        self.spawn(move |api| async move {
            mutated(Mutation::Create, api.create(&form).await)
        })
    }

    pub fn update(&mut self, id: i64, item: VocabularyItem) -> RequestId {
        self.spawn(move |api| async move {
            mutated(Mutation::Update, api.update(id, &item).await)
        })
    }

    pub fn delete(&mut self, id: i64) -> RequestId {
        self.spawn(move |api| async move { mutated(Mutation::Delete, api.delete(id).await) })
    }

    pub fn upsert(&mut self, rows: Vec<UpsertVocabulary>) -> RequestId {
        self.spawn(move |api| async move {
            mutated(Mutation::Upsert, api.upsert_by_spelling(&rows).await)
        })
    }

    pub fn save_session(&mut self, items: Vec<VocabularyItem>) -> RequestId {
        self.spawn(move |api| async move {
            mutated(Mutation::SaveSession, api.save_session(&items).await)
        })
    }

    /// Loads the words of `date` and builds the similar-spelling questions for them.
    pub fn build_similar_quiz(&mut self, date: NaiveDate) -> RequestId {
        self.spawn(move |api| async move {
            let result = match api.by_updated_date(date).await {
                Ok(items) => {
                    let mut rng = rand::rng();
                    Ok(build_questions(&api, items, &mut rng).await)
                }
                Err(e) => Err(e.to_string()),
            };
            TaskPayload::SimilarQuiz(result)
        })
    }

    pub fn lookup_definitions(&mut self, question_index: usize, spellings: Vec<String>) -> RequestId {
        self.spawn(move |api| async move {
            let results = lookup_definitions(&api, spellings).await;
            TaskPayload::Definitions { question_index, results }
        })
    }
}

fn mutated(kind: Mutation, result: Result<(), VocabError>) -> TaskPayload {
    TaskPayload::Mutated { kind, result: result.map_err(|e| e.to_string()) }
}
