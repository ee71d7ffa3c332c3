use crate::models::narrative::{Fragment, NarrativeVariant, RewrittenNarrative};

fn text(s: &str) -> Fragment {
    Fragment::Text {
        text: s.to_string(),
    }
}

fn keyword(s: &str, desc: &str) -> Fragment {
    Fragment::Keyword {
        text: s.to_string(),
        desc: desc.to_string(),
    }
}

/// The built-in rewrite of a finance assistant's duties, used when no key is
/// configured or the model's reply is unusable.
pub fn sample_narrative() -> RewrittenNarrative {
    RewrittenNarrative {
        conservative: NarrativeVariant {
            title: "Standard".to_string(),
            content: vec![
                text("Organised the department's tax invoices and helped calculate "),
                keyword("cost allocation", "Precise, detail-oriented bookkeeping"),
                text(". Built an automated ledger in Excel."),
            ],
        },
        growth: NarrativeVariant {
            title: "Growth".to_string(),
            content: vec![
                text("Led the department's "),
                keyword("finance process optimisation", "Drives change"),
                text(" project."),
            ],
        },
        leadership: NarrativeVariant {
            title: "Leadership".to_string(),
            content: vec![
                text("Coordinated resources across departments to roll out the "),
                keyword("ERP system", "Enterprise resource planning"),
                text("."),
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::narrative::NarrativeStyle;

    #[test]
    fn test_every_variant_has_a_keyword() {
        let narrative = sample_narrative();
        for style in NarrativeStyle::ALL {
            let variant = narrative.variant(style);
            assert!(!variant.title.is_empty());
            assert!(variant
                .content
                .iter()
                .any(|f| matches!(f, Fragment::Keyword { desc, .. } if !desc.is_empty())));
        }
    }

    #[test]
    fn test_sample_reads_as_a_sentence() {
        assert_eq!(
            sample_narrative().growth.plain_text(),
            "Led the department's finance process optimisation project."
        );
    }
}
