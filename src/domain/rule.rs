use crate::error::{Result, SplitError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    /// `value` is a percent of the net pot.
    Percentage,
    /// `value` is an absolute currency amount.
    FlatRate,
}

impl FromStr for RuleType {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "PERCENTAGE" => Ok(Self::Percentage),
            "FLAT_RATE" => Ok(Self::FlatRate),
            other => Err(SplitError::ValidationError(format!(
                "Unknown rule type '{other}'"
            ))),
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percentage => f.write_str("PERCENTAGE"),
            Self::FlatRate => f.write_str("FLAT_RATE"),
        }
    }
}

/// One recipient's payout policy within a split configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PayoutRule {
    /// Stable identifier, preserved across edits.
    pub id: String,
    /// Key into the external roster. Not required to be unique.
    pub recipient_id: String,
    /// Display label carried through to the split output.
    pub recipient_name: String,
    pub r#type: RuleType,
    pub value: Decimal,
    pub role_label: String,
}

/// A roster entry used to seed default rules.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Member {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
}

/// Field replacements for a single rule. `None` leaves the field untouched.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct RulePatch {
    pub recipient_id: Option<String>,
    pub recipient_name: Option<String>,
    pub r#type: Option<RuleType>,
    pub value: Option<Decimal>,
    pub role_label: Option<String>,
}

impl RulePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl PayoutRule {
    /// Returns a copy of this rule with the patch merged in. The id never changes.
    pub fn patched(&self, patch: &RulePatch) -> Self {
        Self {
            id: self.id.clone(),
            recipient_id: patch
                .recipient_id
                .clone()
                .unwrap_or_else(|| self.recipient_id.clone()),
            recipient_name: patch
                .recipient_name
                .clone()
                .unwrap_or_else(|| self.recipient_name.clone()),
            r#type: patch.r#type.unwrap_or(self.r#type),
            value: patch.value.unwrap_or(self.value),
            role_label: patch
                .role_label
                .clone()
                .unwrap_or_else(|| self.role_label.clone()),
        }
    }
}

/// Seeds one zero-value percentage rule per member, in roster order.
///
/// A freshly seeded rule set leaves the whole deposit to the vault until the
/// values are edited.
pub fn default_rules(members: &[Member]) -> Vec<PayoutRule> {
    members
        .iter()
        .map(|member| PayoutRule {
            id: format!("rule-{}", member.id),
            recipient_id: member.id.clone(),
            recipient_name: member.name.clone(),
            r#type: RuleType::Percentage,
            value: Decimal::ZERO,
            role_label: member.role.clone(),
        })
        .collect()
}

/// Replaces the fields of the rule matching `id` and returns the new ordered set.
///
/// The input slice is left untouched; every other rule is carried over as-is.
pub fn update_rule(rules: &[PayoutRule], id: &str, patch: &RulePatch) -> Result<Vec<PayoutRule>> {
    if !rules.iter().any(|rule| rule.id == id) {
        return Err(SplitError::RuleNotFound(id.to_string()));
    }

    Ok(rules
        .iter()
        .map(|rule| {
            if rule.id == id {
                rule.patched(patch)
            } else {
                rule.clone()
            }
        })
        .collect())
}
