//! Column-name rewrite rules.
//!
//! Metric names coming out of a transposed report are cleaned by an ordered
//! list of pure string rewrites. The default list first applies two literal
//! renames and then normalizes: lower-case, spaces to underscores, and the
//! characters `+ - . /` removed.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters dropped from every column name
static STRIPPED_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[+\-./]").expect("valid regex"));

/// Default rule list, in application order
pub static COLUMN_RULES: Lazy<Vec<RewriteRule>> = Lazy::new(|| {
    vec![
        RewriteRule::Rename {
            from: "Cost Growth".into(),
            to: "Cost Digital".into(),
        },
        RewriteRule::Rename {
            from: "Cost Marketing ".into(),
            to: "Cost offline ".into(),
        },
        RewriteRule::Lowercase,
        RewriteRule::Replace {
            from: " ".into(),
            to: "_".into(),
        },
        RewriteRule::Strip(STRIPPED_CHARS.clone()),
    ]
});

/// A single column-name rewrite
#[derive(Debug, Clone)]
pub enum RewriteRule {
    /// Replace the whole name when it matches exactly
    Rename { from: String, to: String },

    /// Convert to lowercase
    Lowercase,

    /// Replace every occurrence of a literal substring
    Replace { from: String, to: String },

    /// Remove everything the pattern matches
    Strip(Regex),
}

impl RewriteRule {
    /// Apply this rule to a column name
    pub fn apply(&self, name: &str) -> String {
        match self {
            RewriteRule::Rename { from, to } => {
                if name == from {
                    to.clone()
                } else {
                    name.to_string()
                }
            }
            RewriteRule::Lowercase => name.to_lowercase(),
            RewriteRule::Replace { from, to } => name.replace(from.as_str(), to),
            RewriteRule::Strip(pattern) => pattern.replace_all(name, "").into_owned(),
        }
    }
}

/// Run `name` through `rules` in order
pub fn apply_rules(name: &str, rules: &[RewriteRule]) -> String {
    rules
        .iter()
        .fold(name.to_string(), |acc, rule| rule.apply(&acc))
}

/// Normalize a column name with the default rules
pub fn normalize_column(name: &str) -> String {
    apply_rules(name, &COLUMN_RULES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_renames() {
        assert_eq!(normalize_column("Cost Growth"), "cost_digital");
        assert_eq!(normalize_column("Cost Marketing "), "cost_offline_");
        // Without the trailing space the rename does not apply
        assert_eq!(normalize_column("Cost Marketing"), "cost_marketing");
    }

    #[test]
    fn test_normalization() {
        assert_eq!(normalize_column("New Install + First Dis."), "new_install__first_dis");
        assert_eq!(normalize_column("Signup/First-Dis"), "signupfirstdis");
        assert_eq!(normalize_column("CAC"), "cac");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for name in ["Cost Growth", "New Install + First Dis.", "FS/First Disb", "a - b . c"] {
            let once = normalize_column(name);
            assert_eq!(normalize_column(&once), once);
        }
    }

    #[test]
    fn test_rule_order_matters() {
        let rules = vec![
            RewriteRule::Lowercase,
            RewriteRule::Rename {
                from: "Cost Growth".into(),
                to: "Cost Digital".into(),
            },
        ];
        assert_eq!(apply_rules("Cost Growth", &rules), "cost growth");
    }

    #[test]
    fn test_custom_rules_extend() {
        let mut rules = COLUMN_RULES.clone();
        rules.push(RewriteRule::Replace {
            from: "__".into(),
            to: "_".into(),
        });
        assert_eq!(apply_rules("New Install + First", &rules), "new_install_first");
    }
}
