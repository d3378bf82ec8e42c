// Fixed analysis prompts, one template per statement kind.

use crate::schema::StatementKind;

pub const ANALYST_PREAMBLE: &str = "You are a senior financial analyst.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementTemplate {
    /// Completes "Given the following ..."
    pub subject: &'static str,
    pub sections: &'static [&'static str],
    pub closing: &'static str,
}

const BALANCE_SHEET: StatementTemplate = StatementTemplate {
    subject: "Balance Sheet data",
    sections: &[
        "Summary of assets, liabilities, equity",
        "Key financial ratios",
        "Liquidity position",
        "Observations or risks",
    ],
    closing: "Keep response concise and professional.",
};

const PROFIT_AND_LOSS: StatementTemplate = StatementTemplate {
    subject: "Profit and Loss data",
    sections: &[
        "Revenue trends",
        "Expense breakdown",
        "Profit margins",
        "Growth indicators",
        "Business health summary",
    ],
    closing: "Keep response concise.",
};

const CASH_FLOW: StatementTemplate = StatementTemplate {
    subject: "Cash Flow Statement",
    sections: &[
        "Operating cash flow insights",
        "Investing activities analysis",
        "Financing trends",
        "Cash stability evaluation",
    ],
    closing: "Keep response concise.",
};

pub fn template_for(kind: StatementKind) -> &'static StatementTemplate {
    match kind {
        StatementKind::BalanceSheet => &BALANCE_SHEET,
        StatementKind::ProfitAndLoss => &PROFIT_AND_LOSS,
        StatementKind::CashFlow => &CASH_FLOW,
    }
}

/// Renders the analysis prompt with `data` embedded verbatim.
pub fn build_prompt(kind: StatementKind, data: &str) -> String {
    let template = template_for(kind);

    let mut prompt = format!(
        "\n{}\n\nGiven the following {}:\n{}\n\nProvide:\n",
        ANALYST_PREAMBLE, template.subject, data
    );
    for (i, section) in template.sections.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, section));
    }
    prompt.push_str(&format!("\n{}\n", template.closing));

    prompt
}

/// Like [`build_prompt`], keyed by name. Unknown keys have nothing to analyze.
pub fn build_prompt_for_key(key: &str, data: &str) -> Option<String> {
    StatementKind::from_key(key).map(|kind| build_prompt(kind, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"{"Amount":[1,2,3]}"#;

    #[test]
    fn test_sections_in_order() {
        for kind in StatementKind::ALL {
            let prompt = build_prompt(kind, DATA);
            let mut cursor = 0;
            for (i, section) in template_for(kind).sections.iter().enumerate() {
                let line = format!("{}. {}", i + 1, section);
                let pos = prompt[cursor..]
                    .find(&line)
                    .unwrap_or_else(|| panic!("{:?} prompt is missing '{}'", kind, line));
                cursor += pos + line.len();
            }
        }
    }

    #[test]
    fn test_no_sections_from_other_kinds() {
        for kind in StatementKind::ALL {
            let prompt = build_prompt(kind, DATA);
            for other in StatementKind::ALL.into_iter().filter(|k| *k != kind) {
                for section in template_for(other).sections {
                    assert!(
                        !prompt.contains(section),
                        "{:?} prompt leaked '{}' from {:?}",
                        kind,
                        section,
                        other
                    );
                }
            }
        }
    }

    #[test]
    fn test_prompt_layout() {
        let prompt = build_prompt(StatementKind::BalanceSheet, DATA);
        assert!(prompt.starts_with("\nYou are a senior financial analyst.\n"));
        assert!(prompt.contains("Given the following Balance Sheet data:\n{\"Amount\":[1,2,3]}\n"));
        assert!(prompt.ends_with("\nKeep response concise and professional.\n"));

        let prompt = build_prompt(StatementKind::CashFlow, DATA);
        assert!(prompt.contains("Given the following Cash Flow Statement:"));
        assert!(prompt.ends_with("\nKeep response concise.\n"));
    }

    #[test]
    fn test_deterministic() {
        for kind in StatementKind::ALL {
            assert_eq!(build_prompt(kind, DATA), build_prompt(kind, DATA));
        }
    }

    #[test]
    fn test_unknown_key_yields_no_prompt() {
        assert!(build_prompt_for_key("equity_statement", DATA).is_none());
        assert_eq!(
            build_prompt_for_key("profit_loss", DATA),
            Some(build_prompt(StatementKind::ProfitAndLoss, DATA))
        );
    }
}
