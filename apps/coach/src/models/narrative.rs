use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A work description rewritten into three registers.
///
/// The JSON keys (`stable`, `aggressive`, `management`) are the ones the
/// model is prompted with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewrittenNarrative {
    #[serde(rename = "stable")]
    pub conservative: NarrativeVariant,
    #[serde(rename = "aggressive")]
    pub growth: NarrativeVariant,
    #[serde(rename = "management")]
    pub leadership: NarrativeVariant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeVariant {
    pub title: String,
    pub content: Vec<Fragment>,
}

/// One piece of a variant: plain text, or a highlighted keyword with a short
/// explanation shown on hover.
///
/// Only `"type": "keyword"` marks a keyword; a missing or any other type is
/// read as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", from = "RawFragment")]
pub enum Fragment {
    Text {
        text: String,
    },
    Keyword {
        text: String,
        #[serde(default)]
        desc: String,
    },
}

#[derive(Deserialize)]
struct RawFragment {
    text: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    desc: Option<String>,
}

impl From<RawFragment> for Fragment {
    fn from(raw: RawFragment) -> Self {
        match raw.kind.as_deref() {
            Some("keyword") => Fragment::Keyword {
                text: raw.text,
                desc: raw.desc.unwrap_or_default(),
            },
            _ => Fragment::Text { text: raw.text },
        }
    }
}

impl Fragment {
    pub fn text(&self) -> &str {
        match self {
            Fragment::Text { text } | Fragment::Keyword { text, .. } => text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NarrativeStyle {
    #[default]
    Conservative,
    Growth,
    Leadership,
}

impl NarrativeStyle {
    pub const ALL: [NarrativeStyle; 3] = [
        NarrativeStyle::Conservative,
        NarrativeStyle::Growth,
        NarrativeStyle::Leadership,
    ];

    /// What this register plays up, and where it lands best.
    pub fn advice(self) -> &'static str {
        match self {
            NarrativeStyle::Conservative => {
                "Plays up execution and rigour; suits large enterprises and compliance-heavy roles."
            }
            NarrativeStyle::Growth => {
                "Plays up results and data thinking; suits internet companies and scale-ups."
            }
            NarrativeStyle::Leadership => {
                "Plays up coordination and process building; suits lead and management roles."
            }
        }
    }
}

impl fmt::Display for NarrativeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NarrativeStyle::Conservative => "conservative",
            NarrativeStyle::Growth => "growth",
            NarrativeStyle::Leadership => "leadership",
        };
        f.write_str(name)
    }
}

impl FromStr for NarrativeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "conservative" | "stable" => Ok(NarrativeStyle::Conservative),
            "growth" | "aggressive" => Ok(NarrativeStyle::Growth),
            "leadership" | "management" => Ok(NarrativeStyle::Leadership),
            other => Err(format!(
                "unknown style '{other}' (expected conservative, growth or leadership)"
            )),
        }
    }
}

impl RewrittenNarrative {
    pub fn variant(&self, style: NarrativeStyle) -> &NarrativeVariant {
        match style {
            NarrativeStyle::Conservative => &self.conservative,
            NarrativeStyle::Growth => &self.growth,
            NarrativeStyle::Leadership => &self.leadership,
        }
    }
}

impl NarrativeVariant {
    /// The variant as one plain string, keyword highlighting dropped.
    pub fn plain_text(&self) -> String {
        self.content.iter().map(Fragment::text).collect()
    }
}
