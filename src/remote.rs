use std::time::Duration;
use reqwest::{Client, ClientBuilder, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::records::{ArticleRecord, ClassificationResult, ExtractionResult};

const PREDICT_PATH: &str = "predict";
const EXTRACT_PATH: &str = "extract";
const MISSING: &str = "N/A";

/// Body shared by `/predict` and `/extract`.
#[derive(Debug, Serialize)]
struct ArticlePayload<'a> {
    title: &'a str,
    summary: &'a str,
    translated: &'a str,
    description: &'a str,
    #[serde(rename = "importDateUTC", skip_serializing_if = "Option::is_none")]
    import_date_utc: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    locations: Option<&'a str>,
}

impl<'a> ArticlePayload<'a> {
    fn for_prediction(article: &'a ArticleRecord) -> Self {
        Self {
            locations: None,
            ..Self::for_extraction(article)
        }
    }

    fn for_extraction(article: &'a ArticleRecord) -> Self {
        Self {
            title: &article.title,
            summary: &article.summary,
            translated: &article.translated_description,
            description: &article.description,
            import_date_utc: article.import_date_utc.as_deref(),
            locations: article.locations.as_deref(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PredictResponse {
    relevant: Value,
    reason: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExtractResponse {
    disease: Value,
    location: Value,
    time: Value,
    cases: Value,
    country: Value,
    error: Option<String>,
    raw: Option<String>,
}

impl From<PredictResponse> for ClassificationResult {
    fn from(res: PredictResponse) -> Self {
        ClassificationResult {
            relevant: relevant_flag(&res.relevant),
            reason: display_value(&res.reason).unwrap_or_else(|| MISSING.to_string()),
        }
    }
}

impl From<ExtractResponse> for ExtractionResult {
    fn from(res: ExtractResponse) -> Self {
        ExtractionResult {
            disease: display_value(&res.disease).unwrap_or_else(|| MISSING.to_string()),
            location: display_value(&res.location).unwrap_or_else(|| MISSING.to_string()),
            date: display_value(&res.time).unwrap_or_else(|| MISSING.to_string()),
            cases: display_value(&res.cases).unwrap_or_else(|| MISSING.to_string()),
            country: display_value(&res.country),
        }
    }
}

/// Numeric or boolean 1 is relevant; anything else, including strings, is not.
fn relevant_flag(value: &Value) -> i64 {
    let relevant = match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() == Some(1.0),
        _ => false,
    };
    i64::from(relevant)
}

/// Strings pass through unquoted, numbers and booleans are stringified,
/// null and absent values have no display form.
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Client for the external relevance classifier and information extractor.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: Client,
    base_url: Url,
}

impl PredictionClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::ConfigError(format!("Invalid endpoint {}: {}", path, e)))
    }

    async fn post<B: Serialize, R: serde::de::DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "sending article");

        let res = self.client.post(url).json(body).send().await?.error_for_status()?;
        Ok(res.json::<R>().await?)
    }

    /// `POST /predict`: is the article relevant to an outbreak signal?
    pub async fn predict(&self, article: &ArticleRecord) -> Result<ClassificationResult> {
        let res: PredictResponse = self.post(PREDICT_PATH, &ArticlePayload::for_prediction(article)).await?;
        Ok(res.into())
    }

    /// `POST /extract`: disease, location, date and case count.
    pub async fn extract(&self, article: &ArticleRecord) -> Result<ExtractionResult> {
        let res: ExtractResponse = self.post(EXTRACT_PATH, &ArticlePayload::for_extraction(article)).await?;
        if let Some(error) = &res.error {
            tracing::warn!(raw = res.raw.as_deref().unwrap_or(""), "extractor reported an error: {}", error);
        }
        Ok(res.into())
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
