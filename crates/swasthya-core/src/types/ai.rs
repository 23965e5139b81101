//! AI diagnosis request and response types.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Body of the symptom-based endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomsRequest {
    pub symptoms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SymptomsRequest {
    pub fn new(symptoms: Vec<String>, description: Option<String>) -> Self {
        Self {
            symptoms,
            description,
        }
    }

    /// Normalizes free-form user input.
    ///
    /// Entries are trimmed and blank ones dropped. When no symptom remains the
    /// description, if any, becomes the only symptom.
    pub fn from_input<I, S>(symptoms: I, description: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_owned);

        let mut symptoms: Vec<String> = symptoms
            .into_iter()
            .map(|s| s.as_ref().trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();

        if symptoms.is_empty()
            && let Some(description) = &description
        {
            symptoms.push(description.clone());
        }

        Self {
            symptoms,
            description,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }
}

/// One candidate condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default, deserialize_with = "null_as_default")]
    pub condition: String,
    /// Probability in `0.0..=1.0`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub probability: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
}

/// Ranked suggestions with an optional free-text analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionSet {
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<Suggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

/// Response of `POST /api/ai/diagnose`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub diagnosis: SuggestionSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performed_by: Option<Value>,
}

/// Response of `POST /api/ai/analyze-symptoms`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymptomsAnalysisResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub analysis: SuggestionSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
}

/// Findings of an image analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    #[serde(default, deserialize_with = "null_as_default")]
    pub diagnosis: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conditions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub findings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
}

/// Response of `POST /api/ai/analyze-image`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysisResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub analysis: ImageAnalysis,
}

/// Severity bucket derived from a probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// High probability of a known condition reads as low severity.
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.7 {
            Self::Low
        } else if probability > 0.4 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// Condensed, display-ready diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisSummary {
    pub condition: String,
    /// Confidence as a whole percentage.
    pub confidence: u8,
    pub description: String,
    pub recommendations: Vec<String>,
    pub severity: Severity,
}

impl DiagnosisSummary {
    /// Summary used when the service returned no suggestion.
    pub fn inconclusive() -> Self {
        Self {
            condition: "No specific diagnosis".to_owned(),
            confidence: 0,
            description: "Could not identify specific condition. \
                          Please consult with a healthcare professional."
                .to_owned(),
            recommendations: vec![
                "Schedule an appointment with a doctor".to_owned(),
                "Provide more detailed symptom information".to_owned(),
            ],
            severity: Severity::High,
        }
    }

    /// Summarizes the top-ranked suggestion of a suggestion set.
    pub fn from_suggestions(set: &SuggestionSet) -> Self {
        let Some(top) = set.suggestions.first() else {
            return Self::inconclusive();
        };

        let condition = non_empty(&top.condition).unwrap_or("Unknown condition");
        let description = top
            .description
            .as_deref()
            .and_then(non_empty)
            .or_else(|| set.analysis.as_deref().and_then(non_empty))
            .unwrap_or("Analysis completed.");

        Self {
            condition: condition.to_owned(),
            confidence: to_percent(top.probability),
            description: description.to_owned(),
            recommendations: top.recommendations.clone().unwrap_or_default(),
            severity: Severity::from_probability(top.probability),
        }
    }

    /// Summarizes an image analysis.
    pub fn from_image(analysis: &ImageAnalysis) -> Self {
        let condition =
            non_empty(&analysis.diagnosis).unwrap_or("No specific condition identified");
        let description = if analysis.findings.is_empty() {
            "Image analysis completed.".to_owned()
        } else {
            analysis.findings.join(". ")
        };

        Self {
            condition: condition.to_owned(),
            confidence: to_percent(analysis.confidence),
            description,
            recommendations: analysis.recommendations.clone().unwrap_or_default(),
            severity: Severity::from_probability(analysis.confidence),
        }
    }
}

impl From<&DiagnosisResponse> for DiagnosisSummary {
    fn from(response: &DiagnosisResponse) -> Self {
        Self::from_suggestions(&response.diagnosis)
    }
}

impl From<&SymptomsAnalysisResponse> for DiagnosisSummary {
    fn from(response: &SymptomsAnalysisResponse) -> Self {
        Self::from_suggestions(&response.analysis)
    }
}

impl From<&ImageAnalysisResponse> for DiagnosisSummary {
    fn from(response: &ImageAnalysisResponse) -> Self {
        Self::from_image(&response.analysis)
    }
}

/// Reads an explicit `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

fn to_percent(probability: f64) -> u8 {
    if probability.is_nan() {
        return 0;
    }
    (probability.clamp(0.0, 1.0) * 100.0).round() as u8
}
