//! Category pattern slices
//!
//! Three fixed alternation patterns over the reason label partition the
//! filtered view into overlapping subsets. The predicates are not mutually
//! exclusive and the overlap is intentional: a row matching two patterns
//! appears in both slices. Slices keep the view's existing order.

use crate::filter::FilteredView;
use crate::record::AlertRecord;
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The fixed category patterns, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    HighRiskSwift,
    MissingOrExpired,
    TransactionOrSignature,
}

impl PatternKind {
    pub const ALL: [PatternKind; 3] = [
        PatternKind::HighRiskSwift,
        PatternKind::MissingOrExpired,
        PatternKind::TransactionOrSignature,
    ];

    /// Alternation pattern matched against the reason label
    pub fn pattern(&self) -> &'static str {
        match self {
            PatternKind::HighRiskSwift => "Risk|SWIFT",
            PatternKind::MissingOrExpired => "Missing|Expired",
            PatternKind::TransactionOrSignature => "Transaction|Signature",
        }
    }

    /// Section title for rendered output
    pub fn title(&self) -> &'static str {
        match self {
            PatternKind::HighRiskSwift => "High-Risk SWIFT",
            PatternKind::MissingOrExpired => "Missing or Expired Paperwork",
            PatternKind::TransactionOrSignature => "Transaction and Signature Flow",
        }
    }
}

/// One themed table: the first `top` view rows matching a pattern
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CategorySlice {
    pub kind: PatternKind,
    pub records: Vec<AlertRecord>,
}

/// Compiled pattern predicates, built once and reused across slices
#[derive(Debug)]
pub struct PatternSet {
    patterns: Vec<(PatternKind, Regex)>,
}

impl PatternSet {
    pub fn new() -> Result<Self> {
        let mut patterns = Vec::with_capacity(PatternKind::ALL.len());
        for kind in PatternKind::ALL {
            let regex = Regex::new(kind.pattern())
                .with_context(|| format!("invalid category pattern: {}", kind.pattern()))?;
            patterns.push((kind, regex));
        }
        Ok(PatternSet { patterns })
    }

    /// Whether a record's reason label matches the given pattern
    pub fn matches(&self, kind: PatternKind, record: &AlertRecord) -> bool {
        self.patterns
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, regex)| regex.is_match(record.reason.as_str()))
            .unwrap_or(false)
    }

    /// First `top` matching rows of the view, in view order
    pub fn slice(&self, view: &FilteredView, kind: PatternKind, top: usize) -> CategorySlice {
        let records = view
            .records()
            .iter()
            .filter(|r| self.matches(kind, r))
            .take(top)
            .copied()
            .collect();
        CategorySlice { kind, records }
    }

    /// All three slices in display order
    pub fn slices(&self, view: &FilteredView, top: usize) -> Vec<CategorySlice> {
        PatternKind::ALL
            .iter()
            .map(|kind| self.slice(view, *kind, top))
            .collect()
    }
}
