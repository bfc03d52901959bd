use std::sync::Arc;

use plantknight_api::models::{Advice, Recommendation, Scores};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::errors::RecommendationError;
use crate::models::Reading;
use crate::services::{
    Content, FunctionCall, FunctionDeclaration, GenerateContentRequest, GenerateContentResponse,
    LanguageModel, ReferenceSource, Tool,
};

pub const TOOL_NAME: &str = "retrieve_plant_data";

const SYSTEM_INSTRUCTION: &str = r#"You are a highly specialized Horticulture AI Agent. Your primary function is to provide expert, actionable plant care recommendations.
Procedure:
1. ALWAYS use the `retrieve_plant_data` tool to fetch plant care information before making any recommendations.
2. Compare the current environmental conditions (Temperature, Moisture, Light Levels) with the ideal conditions retrieved from the `retrieve_plant_data` tool.
3. Analyze discrepancies between current and ideal conditions and give a score from 1 to 100 on each parameter (Temperature, Moisture, Light Levels), where 100 means perfect conditions.
4. Based on the scores, provide specific, actionable advice to optimize plant health in 1 to 2 sentences.
5. ALWAYS output your findings as a single JSON object with the following structure and nothing else:
{
    "temperature_score": int,
    "moisture_score": int,
    "light_levels_score": int,
    "recommendations": {
        "temperature": str,
        "moisture": str,
        "light_levels": str
    }
}"#;

/// Shape the model is instructed to answer with.
#[derive(Debug, Deserialize)]
struct Assessment {
    temperature_score: i64,
    moisture_score: i64,
    light_levels_score: i64,
    recommendations: Advice,
}

pub struct RecommendationService {
    language_model: Arc<dyn LanguageModel>,
    reference_source: Arc<dyn ReferenceSource>,
}

impl RecommendationService {
    pub fn new(
        language_model: Arc<dyn LanguageModel>,
        reference_source: Arc<dyn ReferenceSource>,
    ) -> Self {
        Self {
            language_model,
            reference_source,
        }
    }

    /// Scores `reading` against the species' reference conditions.
    ///
    /// One completion request, plus a second one when the model asks for the reference-data tool.
    /// Only the first function call of the first answer is honoured.
    pub async fn recommend(&self, reading: &Reading) -> Result<Recommendation, RecommendationError> {
        let prompt = Content::user(build_prompt(reading));
        let mut request = GenerateContentRequest {
            system_instruction: Some(Content::system(SYSTEM_INSTRUCTION)),
            contents: vec![prompt],
            tools: vec![reference_tool()],
        };

        let mut response = self.generate(&request).await?;

        let call = response.function_calls().first().map(|call| (*call).clone());
        if let Some(call) = call {
            tracing::debug!(device_id = %reading.device_id, "model called {} with {}", call.name, call.args);

            if call.name != TOOL_NAME {
                return Err(RecommendationError::UnknownTool(call.name));
            }

            let result = self.run_tool(&call).await;

            if let Some(turn) = response.first_content().cloned() {
                request.contents.push(turn);
            }
            request
                .contents
                .push(Content::function_response(&call.name, result));

            response = self.generate(&request).await?;
        }

        let text = response.text().ok_or_else(|| {
            RecommendationError::MalformedResponse("response contains no text".to_string())
        })?;

        parse_recommendation(&text).inspect_err(|e| {
            tracing::warn!(device_id = %reading.device_id, "unusable recommendation ({e}): {text}");
        })
    }

    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, RecommendationError> {
        self.language_model
            .generate(request)
            .await
            .map_err(|e| RecommendationError::Upstream(e.to_string()))
    }

    /// Executes `retrieve_plant_data`. Lookup failures are reported to the model, not to the caller.
    async fn run_tool(&self, call: &FunctionCall) -> Value {
        if let Some(id) = call.args.get("id").and_then(Value::as_i64) {
            return match self.reference_source.get_conditions(id).await {
                Some(conditions) => json!({ "id": id, "conditions": conditions }),
                None => json!({ "error": format!("no conditions found for plant {id}") }),
            };
        }

        let Some(name) = call.args.get("plant_name").and_then(Value::as_str) else {
            return json!({ "error": "plant_name is required" });
        };

        match self.reference_source.lookup_conditions(name).await {
            Some((plant, conditions)) => json!({ "plant": plant, "conditions": conditions }),
            None => json!({ "error": format!("no conditions found for {name}") }),
        }
    }
}

fn reference_tool() -> Tool {
    Tool {
        function_declarations: vec![FunctionDeclaration {
            name: TOOL_NAME.to_string(),
            description: "Retrieves the ideal growing conditions (sunlight, watering rate and \
                          schedule, hardiness zone) of a plant from a horticultural database."
                .to_string(),
            parameters: json!({
                "type": "OBJECT",
                "properties": {
                    "plant_name": {
                        "type": "STRING",
                        "description": "Common or scientific name of the plant."
                    },
                    "id": {
                        "type": "INTEGER",
                        "description": "Plant database identifier, when already known."
                    }
                },
                "required": ["plant_name"]
            }),
        }],
    }
}

fn build_prompt(reading: &Reading) -> String {
    let mut prompt = format!(
        "Please analyze the following plant care scenario and provide a recommendation:\n\
         Plant Species: {}\n\
         Current Conditions: {}°F temperature, {}% moisture, {} lumens light levels.",
        reading.species, reading.temperature, reading.moisture, reading.light_levels
    );

    if let Some(soil_ph) = reading.soil_ph {
        prompt.push_str(&format!("\nSoil pH: {soil_ph}."));
    }

    prompt
}

/// Extracts the JSON object from the model's text and checks every score is within 1..=100.
pub fn parse_recommendation(text: &str) -> Result<Recommendation, RecommendationError> {
    let malformed = |reason: String| RecommendationError::MalformedResponse(reason);

    let start = text
        .find('{')
        .ok_or_else(|| malformed("no JSON object found".to_string()))?;
    let end = text
        .rfind('}')
        .filter(|end| *end > start)
        .ok_or_else(|| malformed("no JSON object found".to_string()))?;

    // Slicing between the braces also drops Markdown code fences.
    let assessment: Assessment =
        serde_json::from_str(&text[start..=end]).map_err(|e| malformed(e.to_string()))?;

    let score = |name: &str, value: i64| -> Result<u8, RecommendationError> {
        match u8::try_from(value) {
            Ok(value) if (1..=100).contains(&value) => Ok(value),
            _ => Err(malformed(format!("{name} score {value} is outside 1..=100"))),
        }
    };

    Ok(Recommendation {
        scores: Scores {
            temperature: score("temperature", assessment.temperature_score)?,
            moisture: score("moisture", assessment.moisture_score)?,
            light_levels: score("light_levels", assessment.light_levels_score)?,
        },
        recommendations: assessment.recommendations,
    })
}
