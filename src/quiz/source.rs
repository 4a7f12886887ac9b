use chrono::NaiveDate;

use crate::{
    api::VocabularyApi,
    core::{
        dates::to_date_key,
        VocabError,
        VocabularyItem,
    },
};

/// Where a dictation session gets its words from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizSource {
    ByDate(NaiveDate),
    Failed,
    TnPlus,
}

impl QuizSource {
    pub fn title(&self) -> &'static str {
        match self {
            QuizSource::ByDate(_) => "Dictation by Date",
            QuizSource::Failed => "Dictation By Fail",
            QuizSource::TnPlus => "Dictation TN+",
        }
    }

    pub fn key(&self) -> String {
        match self {
            QuizSource::ByDate(date) => format!("by-date-{}", to_date_key(*date)),
            QuizSource::Failed => "by-fail".to_string(),
            QuizSource::TnPlus => "tn-plus".to_string(),
        }
    }

    pub async fn fetch(&self, api: &VocabularyApi) -> Result<Vec<VocabularyItem>, VocabError> {
        match self {
            QuizSource::ByDate(date) => api.by_updated_date(*date).await,
            QuizSource::Failed => api.failed_to_test().await,
            QuizSource::TnPlus => api.tn_plus().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_identify_the_source() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(QuizSource::ByDate(date).key(), "by-date-2024-05-01");
        assert_eq!(QuizSource::Failed.key(), "by-fail");
    }
}
