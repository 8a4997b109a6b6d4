use super::money::Money;
use super::rule::{PayoutRule, RuleType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Label of the synthetic line holding whatever the rules leave unallocated.
pub const VAULT_LABEL: &str = "Band Vault (Retained)";

const HUNDRED: Decimal = dec!(100);

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum AllocationKind {
    FlatRate,
    Percentage,
    Vault,
}

/// A single named line of a split.
#[derive(Debug, PartialEq, Clone)]
pub struct Allocation {
    pub label: String,
    pub amount: Money,
    pub kind: AllocationKind,
}

/// Ordered allocations for one deposit: flat rates, then percentages, then the
/// optional vault line.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct SplitResult {
    allocations: Vec<Allocation>,
}

impl SplitResult {
    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    /// Sum of every recipient line, excluding the vault.
    pub fn total_distributed(&self) -> Money {
        self.allocations
            .iter()
            .filter(|a| a.kind != AllocationKind::Vault)
            .map(|a| a.amount)
            .sum()
    }

    /// Amount credited to the vault, or zero when nothing is retained.
    pub fn retained(&self) -> Money {
        self.allocations
            .iter()
            .find(|a| a.kind == AllocationKind::Vault)
            .map(|a| a.amount)
            .unwrap_or(Money::ZERO)
    }
}

/// Computes the split of `deposit` across `rules`.
///
/// Flat rates come off the top at face value, in declared order, even when they
/// overrun the deposit. Each percentage rule then takes its share of the net pot
/// (what is left after flat rates, floored at zero). Percentages are independent
/// fractions of that same pot, so they may sum past 100%. A positive remainder
/// goes to the vault.
///
/// A non-positive deposit yields an empty result. Rule sets that pass
/// [`validate_split`](super::validation::validate_split) never leave the
/// `Decimal` range; anything else saturates rather than panicking.
pub fn compute_split(deposit: Decimal, rules: &[PayoutRule]) -> SplitResult {
    compute_split_with_vault_label(deposit, rules, VAULT_LABEL)
}

/// Same as [`compute_split`] with a custom label on the vault line.
pub fn compute_split_with_vault_label(
    deposit: Decimal,
    rules: &[PayoutRule],
    vault_label: &str,
) -> SplitResult {
    let mut allocations = Vec::with_capacity(rules.len() + 1);
    if deposit <= Decimal::ZERO {
        return SplitResult { allocations };
    }

    let mut remaining = Money::new(deposit);

    for rule in rules.iter().filter(|r| r.r#type == RuleType::FlatRate) {
        let amount = Money::new(rule.value);
        remaining = remaining.saturating_sub(amount);
        allocations.push(Allocation {
            label: rule.recipient_name.clone(),
            amount,
            kind: AllocationKind::FlatRate,
        });
    }

    let net_pot = remaining.floor_zero();

    for rule in rules.iter().filter(|r| r.r#type == RuleType::Percentage) {
        let amount = Money::new((rule.value / HUNDRED).saturating_mul(net_pot.value()));
        remaining = remaining.saturating_sub(amount);
        allocations.push(Allocation {
            label: format!("{} ({}%)", rule.recipient_name, rule.value.normalize()),
            amount,
            kind: AllocationKind::Percentage,
        });
    }

    if remaining.is_positive() {
        allocations.push(Allocation {
            label: vault_label.to_string(),
            amount: remaining,
            kind: AllocationKind::Vault,
        });
    }

    SplitResult { allocations }
}
