use serde::{Deserialize, Deserializer, Serialize};

/// A generated "virtual internship" project. Field names follow the JSON the
/// model is asked to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedProjectData {
    pub background: ProjectBackground,
    pub timeline: Vec<TimelinePhase>,
    pub competency: Competency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBackground {
    /// One-line statement of what the project set out to do.
    pub target: String,
    pub role_definition: String,
    pub business_value: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    /// The hardest problem, used to answer "biggest challenge" questions.
    pub core_challenges: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePhase {
    pub phase: String,
    pub duration: String,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub deliverables: Vec<String>,
    pub interview_focus: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competency {
    pub radar: Vec<RadarScore>,
    #[serde(rename = "interviewQA", default)]
    pub interview_qa: Vec<InterviewQa>,
    #[serde(default)]
    pub portfolio_assets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarScore {
    pub dimension: String,
    #[serde(deserialize_with = "deserialize_score")]
    pub value: u8,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQa {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub tag: String,
}

/// Accepts any JSON number and clamps it into 0–100. Models occasionally emit
/// `87.5` or `120` for a score.
fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw.is_nan() {
        return Ok(0);
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_json() -> serde_json::Value {
        json!({
            "background": {
                "target": "Build a churn dashboard",
                "roleDefinition": "Analyst",
                "businessValue": "Cut churn by 3%",
                "techStack": ["SQL"],
                "coreChallenges": "Dirty event data"
            },
            "timeline": [{
                "phase": "Week 1",
                "duration": "5 days",
                "actionItems": ["Interview stakeholders"],
                "deliverables": ["Requirements doc"],
                "interviewFocus": "Prioritisation"
            }],
            "competency": {
                "radar": [{"dimension": "Data", "value": 90, "label": "Data driven"}],
                "interviewQA": [{"question": "Q?", "answer": "A.", "tag": "Conflict"}],
                "portfolioAssets": ["dashboard.png"]
            }
        })
    }

    #[test]
    fn test_parses_model_shaped_json() {
        let data: GeneratedProjectData = serde_json::from_value(minimal_json()).unwrap();
        assert_eq!(data.background.tech_stack, vec!["SQL"]);
        assert_eq!(data.timeline[0].interview_focus, "Prioritisation");
        assert_eq!(data.competency.interview_qa[0].tag, "Conflict");
    }

    #[test]
    fn test_interview_qa_key_survives_serialization() {
        let data: GeneratedProjectData = serde_json::from_value(minimal_json()).unwrap();
        let value = serde_json::to_value(&data).unwrap();
        assert!(value["competency"]["interviewQA"].is_array());
        assert!(value["background"]["roleDefinition"].is_string());
    }

    #[test]
    fn test_scores_are_clamped_and_rounded() {
        let mut value = minimal_json();
        value["competency"]["radar"] = json!([
            {"dimension": "a", "value": 87.6},
            {"dimension": "b", "value": 140},
            {"dimension": "c", "value": -5}
        ]);
        let data: GeneratedProjectData = serde_json::from_value(value).unwrap();
        let scores: Vec<u8> = data.competency.radar.iter().map(|r| r.value).collect();
        assert_eq!(scores, vec![88, 100, 0]);
    }

    #[test]
    fn test_missing_background_is_rejected() {
        let mut value = minimal_json();
        value.as_object_mut().unwrap().remove("background");
        let result: Result<GeneratedProjectData, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_numeric_score_is_rejected() {
        let mut value = minimal_json();
        value["competency"]["radar"] = json!([{"dimension": "a", "value": "high"}]);
        let result: Result<GeneratedProjectData, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }
}
