use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::configs::LanguageModel as LanguageModelConfig;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("response has no candidates")]
    EmptyResponse,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }

    /// Answer to a function call, sent back on the user turn.
    pub fn function_response(name: impl Into<String>, result: Value) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                function_response: Some(FunctionResponse {
                    name: name.into(),
                    response: serde_json::json!({ "result": result }),
                }),
                ..Part::default()
            }],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
    /// Opaque token attached by thinking models, echoed back unchanged in the next turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought_signature: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub name: String,
    pub response: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    /// OpenAPI-style schema of the arguments.
    pub parameters: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub contents: Vec<Content>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Content of the first candidate, the turn that is echoed back in a follow-up request.
    pub fn first_content(&self) -> Option<&Content> {
        self.candidates.first().map(|candidate| &candidate.content)
    }

    pub fn function_calls(&self) -> Vec<&FunctionCall> {
        self.first_content()
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.function_call.as_ref())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Concatenated text parts of the first candidate, `None` when there are none.
    pub fn text(&self) -> Option<String> {
        let texts: Vec<&str> = self
            .first_content()?
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

/// A generative-language service speaking the `generateContent` protocol.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError>;
}

#[derive(Clone)]
pub struct GeminiClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &LanguageModelConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            http_client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateContentResponse>()
            .await?;

        if response.candidates.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_uses_wire_names() {
        let request = GenerateContentRequest {
            system_instruction: Some(Content::system("be brief")),
            contents: vec![
                Content::user("hello"),
                Content::function_response("retrieve_plant_data", json!([])),
            ],
            tools: vec![Tool {
                function_declarations: vec![FunctionDeclaration {
                    name: "retrieve_plant_data".to_string(),
                    description: "lookup".to_string(),
                    parameters: json!({ "type": "OBJECT" }),
                }],
            }],
        };

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["systemInstruction"], json!({ "parts": [{ "text": "be brief" }] }));
        assert_eq!(value["contents"][0], json!({ "role": "user", "parts": [{ "text": "hello" }] }));
        assert_eq!(
            value["contents"][1]["parts"][0]["functionResponse"],
            json!({ "name": "retrieve_plant_data", "response": { "result": [] } })
        );
        assert_eq!(
            value["tools"][0]["functionDeclarations"][0]["name"],
            json!("retrieve_plant_data")
        );
    }

    #[test]
    fn test_thought_signature_is_echoed() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{
                        "functionCall": { "name": "retrieve_plant_data", "args": { "plant_name": "Ficus lyrata" } },
                        "thoughtSignature": "c2lnbmF0dXJl"
                    }]
                }
            }]
        }))
        .unwrap();

        let turn = serde_json::to_value(response.first_content().unwrap()).unwrap();

        assert_eq!(turn["parts"][0]["thoughtSignature"], json!("c2lnbmF0dXJl"));
        assert_eq!(turn["parts"][0]["functionCall"]["name"], json!("retrieve_plant_data"));
    }

    #[test]
    fn test_response_exposes_calls_and_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "functionCall": { "name": "retrieve_plant_data", "args": { "plant_name": "Ficus lyrata" } } }
                    ]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "totalTokenCount": 12 }
        }))
        .unwrap();

        let calls = response.function_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args["plant_name"], json!("Ficus lyrata"));
        assert_eq!(response.text(), None);

        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] } }]
        }))
        .unwrap();

        assert!(response.function_calls().is_empty());
        assert_eq!(response.text().as_deref(), Some("{\"a\":1}"));
    }
}
