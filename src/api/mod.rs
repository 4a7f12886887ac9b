pub mod types;

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{
    Client,
    Method,
    RequestBuilder,
    Response,
};
use serde::Serialize;
use serde_json::Value;
pub use types::SimilarSpelling;

use crate::core::{
    dates::{
        normalize_date_values,
        to_date_key,
    },
    CaptureCandidate,
    NewVocabulary,
    PagedResult,
    UpsertVocabulary,
    VocabError,
    VocabularyItem,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Async client for the vocabulary REST backend.
#[derive(Debug, Clone)]
pub struct VocabularyApi {
    client: Client,
    base_url: String,
}

impl VocabularyApi {
    pub fn new(base_url: &str) -> Result<Self, VocabError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| VocabError::Custom(format!("HTTP client build failed: {e}")))?;

        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/Vocabularies{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    async fn send(&self, request: RequestBuilder, context: &str) -> Result<Response, VocabError> {
        let response = request.send().await?;
        ensure_success(response, context)
    }

    async fn fetch_json(&self, request: RequestBuilder, context: &str) -> Result<Value, VocabError> {
        Ok(self.send(request, context).await?.json::<Value>().await?)
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        context: &str,
    ) -> Result<Response, VocabError> {
        self.send(self.request(Method::POST, path).json(body), context).await
    }

    pub async fn list_page(&self, page: usize, page_size: usize) -> Result<PagedResult, VocabError> {
        let request = self
            .request(Method::GET, "")
            .query(&[("page", page.to_string()), ("pageSize", page_size.to_string())]);
        let value = self.fetch_json(request, "Failed to fetch vocabulary data").await?;
        Ok(types::paged_result(&value))
    }

    pub async fn search(&self, term: &str) -> Result<Vec<VocabularyItem>, VocabError> {
        let request = self.request(Method::GET, "/search").query(&[("q", term)]);
        let value = self.fetch_json(request, "Failed to search vocabulary").await?;
        Ok(types::search_results(&value))
    }

    pub async fn get(&self, id: i64) -> Result<VocabularyItem, VocabError> {
        let response =
            self.send(self.request(Method::GET, &format!("/{id}")), "Failed to fetch vocabulary data").await?;
        Ok(response.json::<VocabularyItem>().await?)
    }

    pub async fn update(&self, id: i64, item: &VocabularyItem) -> Result<(), VocabError> {
        let request = self.request(Method::PUT, &format!("/{id}")).json(item);
        self.send(request, "Failed to save vocabulary data").await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), VocabError> {
        self.send(self.request(Method::DELETE, &format!("/{id}")), "Failed to delete vocabulary")
            .await?;
        Ok(())
    }

    pub async fn create(&self, form: &NewVocabulary) -> Result<(), VocabError> {
        self.post_json("", form, "Failed to add vocabulary").await?;
        Ok(())
    }

    pub async fn upsert_by_spelling(&self, rows: &[UpsertVocabulary]) -> Result<(), VocabError> {
        self.post_json("/upsert-by-spelling", rows, "Failed to save").await?;
        Ok(())
    }

    /// Sends free text and returns the words the backend picked out of it.
    pub async fn capture(&self, text: &str) -> Result<Vec<CaptureCandidate>, VocabError> {
        let response = self.post_json("/capture-new-vocabularies", text, "Failed to capture").await?;
        Ok(types::capture_candidates(&response.json::<Value>().await?))
    }

    pub async fn updated_dates(&self) -> Result<Vec<String>, VocabError> {
        let value = self
            .fetch_json(self.request(Method::GET, "/updated-dates"), "Failed to load dates")
            .await?;
        Ok(normalize_date_values(&value))
    }

    pub async fn by_updated_date(&self, date: NaiveDate) -> Result<Vec<VocabularyItem>, VocabError> {
        let request =
            self.request(Method::GET, "/by-updated-date").query(&[("date", to_date_key(date))]);
        let value = self.fetch_json(request, "Failed to load vocabularies").await?;
        Ok(types::item_list(&value))
    }

    pub async fn failed_to_test(&self) -> Result<Vec<VocabularyItem>, VocabError> {
        let value = self
            .fetch_json(
                self.request(Method::GET, "/failed-to-test"),
                "Failed to load failed vocabularies",
            )
            .await?;
        Ok(types::item_list(&value))
    }

    pub async fn tn_plus(&self) -> Result<Vec<VocabularyItem>, VocabError> {
        let value =
            self.fetch_json(self.request(Method::GET, "/tn-plus"), "Failed to load TN+").await?;
        Ok(types::item_list(&value))
    }

    pub async fn similar_spellings(&self, spelling: &str) -> Result<Vec<SimilarSpelling>, VocabError> {
        let request =
            self.request(Method::GET, "/similar-spellings").query(&[("spelling", spelling)]);
        let value = self.fetch_json(request, "Failed to load similar spellings").await?;
        Ok(types::similar_spellings(&value))
    }

    /// Stores the attempt counters of a finished session.
    pub async fn save_session(&self, items: &[VocabularyItem]) -> Result<(), VocabError> {
        self.post_json("/save", items, "Failed to save").await?;
        Ok(())
    }
}

fn ensure_success(response: Response, context: &str) -> Result<Response, VocabError> {
    if !response.status().is_success() {
        return Err(VocabError::http(response.status(), context));
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_trimmed() {
        let api = VocabularyApi::new("http://localhost:5000/api/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:5000/api");
        assert_eq!(api.url("/search"), "http://localhost:5000/api/Vocabularies/search");
        assert_eq!(api.url(""), "http://localhost:5000/api/Vocabularies");
    }
}
