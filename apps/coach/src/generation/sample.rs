//! Built-in example project, shown when no model can be called.

use crate::models::project::{ArtifactPayload, SavedArtifact};
use crate::models::virtual_project::{
    Competency, GeneratedProjectData, InterviewQa, ProjectBackground, RadarScore, TimelinePhase,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn sample_project_data() -> GeneratedProjectData {
    GeneratedProjectData {
        background: ProjectBackground {
            target: "Build a group-wide, omni-channel real-time pricing monitor".to_string(),
            role_definition: "Core product assistant owning the flow from data-collection \
                requirements to a live dashboard, coordinating the backend and algorithm teams."
                .to_string(),
            business_value: "Replaced manual price checks that lagged 48 hours with minute-level \
                alerts, contributing directly to a 12% GMV lift in Q3."
                .to_string(),
            tech_stack: strings(&[
                "Python (Scrapy)",
                "SQL",
                "Tableau",
                "PRD writing",
                "Competitive analysis",
            ]),
            core_challenges: "Frequent anti-scraping upgrades kept cutting off the data feed. \
                Designed a rotating proxy pool and an alerting SOP that trips on anomalous data."
                .to_string(),
        },
        timeline: vec![
            TimelinePhase {
                phase: "Week 1: Requirements".to_string(),
                duration: "5 days".to_string(),
                action_items: strings(&[
                    "Interviewed operations on their core pain points",
                    "Compiled the top-100 competitor list",
                    "Drafted the data-field dictionary",
                ]),
                deliverables: strings(&[
                    "Competitor data collection BRD",
                    "Field mapping sheet.xlsx",
                ]),
                interview_focus: "How did you prioritise requirements? What if operations asked \
                    for something engineering could not build?"
                    .to_string(),
            },
            TimelinePhase {
                phase: "Weeks 2-3: Design and build".to_string(),
                duration: "10 days".to_string(),
                action_items: strings(&[
                    "Produced high-fidelity Axure prototypes",
                    "Joined the database schema review",
                    "Tracked crawler development progress",
                ]),
                deliverables: strings(&["Monitoring dashboard PRD v1.0", "Tracking spec"]),
                interview_focus: "A delivery slip appeared mid-build. How did you rebalance \
                    resources?"
                    .to_string(),
            },
            TimelinePhase {
                phase: "Week 4: Validation and retro".to_string(),
                duration: "5 days".to_string(),
                action_items: strings(&[
                    "Ran UAT on data accuracy",
                    "Wrote the operations manual and trained the team",
                    "Delivered the ROI analysis",
                ]),
                deliverables: strings(&["Project retrospective.pptx", "UAT sign-off sheet"]),
                interview_focus: "Prove the project's value with data. How did you clean the \
                    dirty records?"
                    .to_string(),
            },
        ],
        competency: Competency {
            radar: vec![
                radar("Data thinking", 90, "Data driven"),
                radar("Project coordination", 85, "Project mgmt"),
                radar("Business sense", 80, "Commercial"),
                radar("Technical fluency", 75, "Tech savvy"),
                radar("Collaboration", 88, "Communication"),
            ],
            interview_qa: vec![
                InterviewQa {
                    question: "What was the biggest disagreement on this project, and how was \
                        it resolved?"
                        .to_string(),
                    answer: "Operations wanted full data coverage while engineering worried about \
                        server load. Show how a tiered collection plan (high frequency for top \
                        items, low for the long tail) reached a compromise."
                        .to_string(),
                    tag: "Conflict resolution".to_string(),
                },
                InterviewQa {
                    question: "If a competitor's site changed and scraping broke, what would you \
                        do as the owner?"
                        .to_string(),
                    answer: "1. Trigger the fallback plan (manual spot checks); 2. estimate the \
                        fix effort; 3. brief stakeholders on the risk. Stress risk awareness and \
                        the SOP."
                        .to_string(),
                    tag: "Crisis handling".to_string(),
                },
            ],
            portfolio_assets: strings(&[
                "Pricing monitor PRD (redacted).pdf",
                "Competitor price movement analysis.xlsx",
                "Retrospective SOP flowchart.png",
            ]),
        },
    }
}

fn radar(dimension: &str, value: u8, label: &str) -> RadarScore {
    RadarScore {
        dimension: dimension.to_string(),
        value,
        label: label.to_string(),
    }
}

/// The example entry a fresh install starts with.
pub fn sample_artifact() -> SavedArtifact {
    SavedArtifact {
        id: 1,
        title: "Promotion-season sales analysis (example)".to_string(),
        target_role: "Data analyst assistant".to_string(),
        progress: 100,
        created_date: "2023-10-24".to_string(),
        is_sample: true,
        payload: ArtifactPayload::GeneratedProject(sample_project_data()),
    }
}
