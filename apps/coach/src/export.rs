//! Print-oriented portfolio document. Meant to be opened in a browser and
//! printed; it is not a data format and cannot be imported back.

use chrono::Local;

use crate::dashboard::ArtifactFilter;
use crate::models::project::{ArtifactPayload, SavedArtifact};

const STYLE: &str = "body{font-family:sans-serif;padding:40px;max-width:800px;margin:0 auto;}\
h1{border-bottom:2px solid #4f46e5;color:#4f46e5;padding-bottom:10px}\
.section-title{margin-top:30px;font-size:16px;color:#333;font-weight:bold;border-bottom:1px solid #eee;padding-bottom:5px;}\
.project{margin-bottom:20px;padding-left:15px;border-left:4px solid #e2e8f0;}\
.title{font-weight:bold;font-size:18px}\
.meta{color:#666;font-size:14px;margin-bottom:5px;}";

/// Renders every saved artifact, generated projects first, then rewritten
/// narratives.
pub fn render_portfolio_html(artifacts: &[SavedArtifact]) -> String {
    let generated_on = Local::now().format("%Y-%m-%d");
    let mut html = format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Interview coaching portfolio</title>\
         <style>{STYLE}</style></head>\n<body><h1>Interview coaching portfolio</h1>\
         <p>Generated on: {generated_on}</p>\n"
    );

    html.push_str("<div class=\"section-title\">Virtual internships</div>\n");
    for artifact in ArtifactFilter::Generated.apply(artifacts) {
        let target = match &artifact.payload {
            ArtifactPayload::GeneratedProject(data) => data.background.target.as_str(),
            ArtifactPayload::RewrittenNarrative(_) => "",
        };
        html.push_str(&project_block(artifact, Some(target)));
    }

    html.push_str("<div class=\"section-title\">Rewritten experiences</div>\n");
    for artifact in ArtifactFilter::Rewritten.apply(artifacts) {
        html.push_str(&project_block(artifact, None));
    }

    html.push_str("<script>window.onload=function(){window.print();}</script></body></html>\n");
    html
}

fn project_block(artifact: &SavedArtifact, detail: Option<&str>) -> String {
    let mut block = format!(
        "<div class=\"project\"><div class=\"title\">{}</div><div class=\"meta\">{} · {}</div>",
        escape_html(&artifact.title),
        escape_html(&artifact.target_role),
        escape_html(&artifact.created_date)
    );
    if let Some(detail) = detail {
        block.push_str(&format!("<div>{}</div>", escape_html(detail)));
    }
    block.push_str("</div>\n");
    block
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
