//! Checks that sit in front of the split engine.
//!
//! Invalid configuration is rejected here so that `compute_split` can stay a
//! plain calculation. Over-allocation is not invalid: it is reported as an
//! [`Advisory`] and the split is still computed.

use super::money::Money;
use super::rule::{PayoutRule, RuleType};
use crate::error::{Result, SplitError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;
use std::fmt;

const MAX_PERCENTAGE: Decimal = dec!(100);

pub fn validate_rule(rule: &PayoutRule) -> Result<()> {
    if rule.id.trim().is_empty() {
        return Err(SplitError::ValidationError(
            "Rule id must not be empty".to_string(),
        ));
    }
    if rule.value < Decimal::ZERO {
        return Err(SplitError::ValidationError(format!(
            "Rule '{}' has a negative value ({})",
            rule.id, rule.value
        )));
    }
    if rule.r#type == RuleType::Percentage && rule.value > MAX_PERCENTAGE {
        return Err(SplitError::ValidationError(format!(
            "Rule '{}' has a percentage above 100 ({})",
            rule.id, rule.value
        )));
    }
    Ok(())
}

/// Validates every rule and rejects duplicate ids.
///
/// Duplicate recipient ids are allowed; each rule is its own line item.
pub fn validate_rules(rules: &[PayoutRule]) -> Result<()> {
    let mut seen = HashSet::with_capacity(rules.len());
    for rule in rules {
        validate_rule(rule)?;
        if !seen.insert(rule.id.as_str()) {
            return Err(SplitError::ValidationError(format!(
                "Duplicate rule id '{}'",
                rule.id
            )));
        }
    }
    checked_total(rules, RuleType::FlatRate)?;
    checked_total(rules, RuleType::Percentage)?;
    Ok(())
}

/// Validates `rules` for a split of `deposit`, rejecting configurations whose
/// running balance or payout total would leave the `Decimal` range.
pub fn validate_split(deposit: Decimal, rules: &[PayoutRule]) -> Result<()> {
    validate_rules(rules)?;
    if deposit <= Decimal::ZERO {
        return Ok(());
    }

    let out_of_range = || {
        SplitError::ValidationError(format!(
            "Split of {deposit} exceeds the representable amount range"
        ))
    };
    let flats = checked_total(rules, RuleType::FlatRate)?;
    let percents = checked_total(rules, RuleType::Percentage)?;

    let remaining = deposit.checked_sub(flats).ok_or_else(out_of_range)?;
    let net_pot = remaining.max(Decimal::ZERO);
    let shares = (percents / MAX_PERCENTAGE)
        .checked_mul(net_pot)
        .ok_or_else(out_of_range)?;
    remaining.checked_sub(shares).ok_or_else(out_of_range)?;
    flats.checked_add(shares).ok_or_else(out_of_range)?;
    Ok(())
}

fn checked_total(rules: &[PayoutRule], kind: RuleType) -> Result<Decimal> {
    rules
        .iter()
        .filter(|r| r.r#type == kind)
        .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.value))
        .ok_or_else(|| {
            SplitError::ValidationError(format!(
                "{kind} values add up past the representable amount range"
            ))
        })
}

/// A non-fatal warning about a split configuration.
#[derive(Debug, PartialEq, Clone)]
pub enum Advisory {
    /// Flat rates alone add up to more than the deposit.
    FlatRatesExceedDeposit { committed: Money, deposit: Money },
    /// Percentage rules add up to more than 100%.
    PercentagesExceedHundred { total: Decimal },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FlatRatesExceedDeposit { committed, deposit } => write!(
                f,
                "flat-rate payouts ({committed}) exceed the deposit ({deposit}); percentage payouts resolve to zero"
            ),
            Self::PercentagesExceedHundred { total } => write!(
                f,
                "percentage payouts total {}%, more than 100% of the net pot",
                total.normalize()
            ),
        }
    }
}

/// Collects advisories for a deposit and rule set. A non-positive deposit
/// produces an empty split, so flat-rate overruns are only reported for
/// positive deposits.
pub fn advisories(deposit: Decimal, rules: &[PayoutRule]) -> Vec<Advisory> {
    let mut found = Vec::new();

    // Totals saturate so an out-of-range set still reports its overrun.
    let committed: Money = rules
        .iter()
        .filter(|r| r.r#type == RuleType::FlatRate)
        .map(|r| Money::new(r.value))
        .sum();
    if deposit > Decimal::ZERO && committed.value() > deposit {
        found.push(Advisory::FlatRatesExceedDeposit {
            committed,
            deposit: Money::new(deposit),
        });
    }

    let total = rules
        .iter()
        .filter(|r| r.r#type == RuleType::Percentage)
        .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.value));
    if total > MAX_PERCENTAGE {
        found.push(Advisory::PercentagesExceedHundred { total });
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, r#type: RuleType, value: Decimal) -> PayoutRule {
        PayoutRule {
            id: id.to_string(),
            recipient_id: "m1".to_string(),
            recipient_name: "Alex".to_string(),
            r#type,
            value,
            role_label: String::new(),
        }
    }

    #[test]
    fn test_validate_rule_bounds() {
        assert!(validate_rule(&rule("a", RuleType::Percentage, dec!(0))).is_ok());
        assert!(validate_rule(&rule("a", RuleType::Percentage, dec!(100))).is_ok());
        assert!(validate_rule(&rule("a", RuleType::FlatRate, dec!(5000))).is_ok());
        assert!(matches!(
            validate_rule(&rule("a", RuleType::Percentage, dec!(100.01))),
            Err(SplitError::ValidationError(_))
        ));
        assert!(matches!(
            validate_rule(&rule("a", RuleType::FlatRate, dec!(-1))),
            Err(SplitError::ValidationError(_))
        ));
        assert!(matches!(
            validate_rule(&rule(" ", RuleType::FlatRate, dec!(1))),
            Err(SplitError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_rules_duplicate_ids() {
        let rules = vec![
            rule("a", RuleType::FlatRate, dec!(1)),
            rule("a", RuleType::FlatRate, dec!(2)),
        ];
        assert!(matches!(
            validate_rules(&rules),
            Err(SplitError::ValidationError(msg)) if msg.contains("Duplicate")
        ));
    }

    #[test]
    fn test_validate_rules_allows_duplicate_recipients() {
        let rules = vec![
            rule("a", RuleType::FlatRate, dec!(1)),
            rule("b", RuleType::Percentage, dec!(2)),
        ];
        assert!(validate_rules(&rules).is_ok());
    }

    #[test]
    fn test_advisories_flat_overrun() {
        let rules = vec![
            rule("a", RuleType::FlatRate, dec!(80)),
            rule("b", RuleType::FlatRate, dec!(40)),
        ];
        assert_eq!(
            advisories(dec!(100), &rules),
            vec![Advisory::FlatRatesExceedDeposit {
                committed: Money::new(dec!(120)),
                deposit: Money::new(dec!(100)),
            }]
        );
        assert!(advisories(dec!(0), &rules).is_empty());
    }

    #[test]
    fn test_advisories_percentage_overrun() {
        let rules = vec![
            rule("a", RuleType::Percentage, dec!(70)),
            rule("b", RuleType::Percentage, dec!(60)),
        ];
        let found = advisories(dec!(100), &rules);
        assert_eq!(
            found,
            vec![Advisory::PercentagesExceedHundred { total: dec!(130) }]
        );
        assert!(found[0].to_string().contains("130%"));
    }

    #[test]
    fn test_flat_total_out_of_range_is_rejected() {
        let rules = vec![
            rule("a", RuleType::FlatRate, dec!(50000000000000000000000000000)),
            rule("b", RuleType::FlatRate, dec!(50000000000000000000000000000)),
        ];
        assert!(matches!(
            validate_rules(&rules),
            Err(SplitError::ValidationError(msg)) if msg.contains("representable")
        ));
        assert!(validate_split(dec!(1), &rules).is_err());
    }

    #[test]
    fn test_split_out_of_range_is_rejected() {
        let rules = vec![
            rule("a", RuleType::Percentage, dec!(100)),
            rule("b", RuleType::Percentage, dec!(100)),
            rule("c", RuleType::Percentage, dec!(100)),
        ];
        assert!(validate_rules(&rules).is_ok());
        assert!(validate_split(dec!(100), &rules).is_ok());
        assert!(matches!(
            validate_split(Decimal::MAX, &rules),
            Err(SplitError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_split_accepts_large_in_range_values() {
        let rules = vec![
            rule("a", RuleType::FlatRate, Decimal::MAX),
            rule("b", RuleType::Percentage, dec!(50)),
        ];
        assert!(validate_split(dec!(1), &rules).is_ok());
        assert!(validate_split(Decimal::MAX, &rules).is_ok());
        assert!(validate_split(dec!(-1), &rules).is_ok());
    }

    #[test]
    fn test_advisories_do_not_overflow() {
        let rules = vec![
            rule("a", RuleType::FlatRate, Decimal::MAX),
            rule("b", RuleType::FlatRate, Decimal::MAX),
        ];
        assert_eq!(
            advisories(dec!(1), &rules),
            vec![Advisory::FlatRatesExceedDeposit {
                committed: Money::new(Decimal::MAX),
                deposit: Money::new(dec!(1)),
            }]
        );
    }

    #[test]
    fn test_no_advisories_for_balanced_rules() {
        let rules = vec![
            rule("a", RuleType::FlatRate, dec!(20)),
            rule("b", RuleType::Percentage, dec!(50)),
            rule("c", RuleType::Percentage, dec!(50)),
        ];
        assert!(advisories(dec!(100), &rules).is_empty());
    }
}
