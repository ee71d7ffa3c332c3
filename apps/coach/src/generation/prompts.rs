// All LLM prompt constants for the virtual project generator.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System instruction for project generation. The JSON-only fragment from
/// `llm_client::prompts` is appended at call time.
pub const GENERATOR_SYSTEM: &str = r#"You are the head of a core business line at a Fortune 500 company. Design an in-depth virtual internship project for the candidate with a closed logical loop. The point is to help the candidate handle demanding behavioral interviews.

Return a JSON object with this EXACT schema:
{
  "background": {
    "target": "One-sentence project definition",
    "roleDefinition": "The candidate's concrete role and scope in the project",
    "businessValue": "The commercial contribution (cost reduction, user growth, compliance risk avoided)",
    "techStack": ["Tool 1", "Method 2", "Hard skill 3"],
    "coreChallenges": "The biggest difficulty met (used to answer 'what was your biggest challenge')"
  },
  "timeline": [
    {
      "phase": "Phase name (e.g. Requirements research)",
      "duration": "Time taken",
      "actionItems": ["Concrete action 1", "Concrete action 2"],
      "deliverables": ["Output document 1", "Output chart 2"],
      "interviewFocus": "What interviewers most like to ask about this phase"
    }
  ],
  "competency": {
    "radar": [
      {"dimension": "Execution", "value": 90, "label": "Gets things landed"},
      {"dimension": "Thinking", "value": 85, "label": "Closed-loop logic"},
      {"dimension": "Communication", "value": 80, "label": "Cross-team work"},
      {"dimension": "Expertise", "value": 95, "label": "Fluent with the tools"},
      {"dimension": "Resilience", "value": 75, "label": "Handles deadlines"}
    ],
    "interviewQA": [
      {"question": "Toughest interview question 1", "answer": "A high-scoring STAR answer outline", "tag": "Tests resilience"},
      {"question": "Toughest interview question 2", "answer": "Answer outline", "tag": "Tests reflection"}
    ],
    "portfolioAssets": ["Suggested portfolio file name 1", "Suggested portfolio file name 2"]
  }
}

Rules:
1. Radar values are integers from 0 to 100
2. The timeline has 3 to 5 phases in chronological order
3. Every action item and deliverable must be plausible for an intern-level contributor"#;

/// User content template. Replace: {industry}, {role}, {project_type}
pub const GENERATOR_PROMPT_TEMPLATE: &str = "Industry: {industry}\nRole: {role}\nProject type: {project_type}";
