use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeminiAvailableModel {
    pub model_name: &'static str,
    pub supports_response_schema: bool,
}

#[derive(Clone, Debug, Serialize)]
pub enum Provider {
    Gemini {
        /// Name of the environment variable holding the key, resolved on each call.
        api_key: String,
        model: String,
        base_url: String,
    },
}

pub const GEMINI_MODELS: &[GeminiAvailableModel] = &[
    GeminiAvailableModel {
        model_name: "gemini-2.5-flash",
        supports_response_schema: true,
    },
    GeminiAvailableModel {
        model_name: "gemini-2.5-pro",
        supports_response_schema: true,
    },
];

/// Primitive kinds accepted by the `responseSchema` field.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

/// OpenAPI-subset schema understood by `generateContent`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, ResponseSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ResponseSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<String>,
}

impl ResponseSchema {
    fn of(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            properties: None,
            items: None,
            required: None,
            min_items: None,
            max_items: None,
        }
    }

    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::of(SchemaType::Number)
    }

    pub fn object<I, K>(properties: I, required: &[&str]) -> Self
    where
        I: IntoIterator<Item = (K, ResponseSchema)>,
        K: Into<String>,
    {
        Self {
            properties: Some(properties.into_iter().map(|(k, v)| (k.into(), v)).collect()),
            required: Some(required.iter().map(|r| r.to_string()).collect()),
            ..Self::of(SchemaType::Object)
        }
    }

    pub fn array(items: ResponseSchema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(SchemaType::Array)
        }
    }

    /// Pins an array schema to exactly `count` items. Gemini expects the bounds as strings.
    pub fn with_exact_len(mut self, count: usize) -> Self {
        self.min_items = Some(count.to_string());
        self.max_items = Some(count.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<ResponseSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single-turn request asking for JSON that conforms to `schema`.
    pub fn json(prompt: impl Into<String>, schema: ResponseSchema) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema),
                temperature: Some(0.7),
                max_output_tokens: None,
            }),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub index: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: Option<u32>,
    #[serde(default)]
    pub candidates_token_count: Option<u32>,
    #[serde(default)]
    pub total_token_count: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    pub model_version: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it produced any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
