use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::error::{ContrastError, Result};

/// WCAG 2.0 compliance level, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceTier {
    Fail,
    AaLarge,
    Aa,
    Aaa,
}

lazy_static! {
    // from lea verou's contrast ratio checker
    static ref MESSAGES: HashMap<ComplianceTier, &'static str> = HashMap::from([
        (ComplianceTier::Fail, "Fails WCAG 2.0 :-("),
        (ComplianceTier::AaLarge, "Passes AA for large text (above 18pt or bold above 14pt)"),
        (
            ComplianceTier::Aa,
            "Passes AA level for any size text and AAA for large text (above 18pt or bold above 14pt)",
        ),
        (ComplianceTier::Aaa, "Passes AAA level for any size text"),
    ]);
}

impl ComplianceTier {
    /// Label used in JSON output and as the CSS class in rendered views.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::AaLarge => "aa-large",
            Self::Aa => "aa",
            Self::Aaa => "aaa",
        }
    }

    pub fn message(self) -> &'static str {
        MESSAGES[&self]
    }

    /// Whether a caller should offer a recommended replacement color.
    pub fn needs_suggestion(self) -> bool {
        matches!(self, Self::Fail | Self::AaLarge)
    }
}

impl fmt::Display for ComplianceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify(ratio: f64) -> Result<ComplianceTier> {
    match ratio {
        r if (0.0..3.0).contains(&r) => Ok(ComplianceTier::Fail),
        r if (3.0..4.5).contains(&r) => Ok(ComplianceTier::AaLarge),
        r if (4.5..7.0).contains(&r) => Ok(ComplianceTier::Aa),
        r if (7.0..=22.0).contains(&r) => Ok(ComplianceTier::Aaa),
        r => Err(ContrastError::UnclassifiableRatio(r)),
    }
}
