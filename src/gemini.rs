use crate::config::Config;
use crate::error::{Error, Result};
use crate::upload::Upload;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use yew::format::Text;
use yew::services::fetch::Request;

pub const PROMPT: &str = "You are an expert frontend developer. Analyze this UI design/wireframe/sketch and generate clean, modern HTML code with Tailwind CSS.

Requirements:
- Use semantic HTML5 elements
- Use Tailwind CSS classes ONLY (no custom CSS)
- Make it fully responsive (mobile-first)
- Include proper spacing and typography
- Add realistic placeholder content where needed
- Use modern UI components (cards, buttons, forms) as shown
- Return ONLY the HTML code inside a body tag, no explanations

Generate complete, production-ready code:";

/// Finish reasons where the candidate's text must not be used.
const BLOCKED_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "LANGUAGE",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

static HTML_FENCE: OnceLock<Regex> = OnceLock::new();
static FENCE: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Serialize, PartialEq)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(alias = "inlineData")]
        inline_data: Blob,
    },
    Other(serde_json::Value),
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Blob {
    #[serde(alias = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl GenerateContentRequest {
    pub fn new(prompt: &str, upload: &Upload) -> Self {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::Text {
                        text: prompt.to_string(),
                    },
                    Part::InlineData {
                        inline_data: Blob {
                            mime_type: upload.mime_type.clone(),
                            data: upload.base64(),
                        },
                    },
                ],
            }],
        }
    }
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, joined. Blocked prompts and
    /// candidates stopped by a filter are errors even if text came back.
    pub fn text(&self) -> Result<String> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_ref())
        {
            return Err(Error::Blocked(reason.clone()));
        }

        let candidate = self.candidates.first().ok_or(Error::EmptyResponse)?;

        if let Some(reason) = &candidate.finish_reason {
            if BLOCKED_FINISH_REASONS.contains(&reason.as_str()) {
                return Err(Error::Blocked(reason.clone()));
            }
        }

        let content = candidate.content.as_ref().ok_or(Error::EmptyResponse)?;

        let text: String = content
            .parts
            .iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        if text.trim().is_empty() {
            Err(Error::EmptyResponse)
        } else {
            Ok(text)
        }
    }
}

/// The one call we make: the fixed prompt plus the image.
pub fn request(config: &Config, upload: &Upload) -> Result<Request<Text>> {
    let api_key = config.api_key()?;
    let body = serde_json::to_string(&GenerateContentRequest::new(PROMPT, upload))
        .map_err(|e| Error::Request(e.to_string()))?;

    let url = config.generate_content_url();

    Request::post(url.as_str())
        .header("Content-Type", "application/json")
        .header("x-goog-api-key", api_key)
        .body(Ok(body))
        .map_err(|e| Error::Request(e.to_string()))
}

pub fn parse_response(status: u16, body: &str) -> Result<String> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| body.trim().to_string());

        return Err(Error::Api { status, message });
    }

    let response: GenerateContentResponse = serde_json::from_str(body)?;

    response.text()
}

/// Models like to wrap their answer in a markdown code block even when
/// told not to. Each pass is a single scan, so text joined up by the
/// first pass is not looked at again by it.
pub fn strip_code_fences(text: &str) -> String {
    let html_fence = HTML_FENCE.get_or_init(|| Regex::new("```html\n?").unwrap());
    let fence = FENCE.get_or_init(|| Regex::new("```\n?").unwrap());

    let text = html_fence.replace_all(text, "");
    fence.replace_all(&text, "").trim().to_string()
}

/// What ends up on screen: the model's text without fences. A reply that
/// was nothing but fences counts as empty.
pub fn markup(text: &str) -> Result<String> {
    let code = strip_code_fences(text);

    if code.is_empty() {
        Err(Error::EmptyResponse)
    } else {
        Ok(code)
    }
}
