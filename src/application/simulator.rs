use crate::domain::ports::RuleStoreBox;
use crate::domain::rule::{Member, PayoutRule, RulePatch, default_rules};
use crate::domain::split::{SplitResult, VAULT_LABEL, compute_split_with_vault_label};
use crate::domain::validation::{Advisory, advisories, validate_rules, validate_split};
use crate::error::Result;
use rust_decimal::Decimal;

/// A computed preview for one hypothetical deposit.
#[derive(Debug, PartialEq, Clone)]
pub struct SplitPlan {
    pub deposit: Decimal,
    pub result: SplitResult,
    pub advisories: Vec<Advisory>,
}

/// The "what-if" entry point for payout splits.
///
/// `SplitSimulator` owns the rule store, keeps every committed rule set valid,
/// and recomputes a fresh [`SplitPlan`] on each call to [`SplitSimulator::preview`].
/// No money moves; a plan is discarded as soon as the caller is done with it.
pub struct SplitSimulator {
    rule_store: RuleStoreBox,
    vault_label: String,
}

impl SplitSimulator {
    /// Creates a new `SplitSimulator` backed by `rule_store`.
    pub fn new(rule_store: RuleStoreBox) -> Self {
        Self {
            rule_store,
            vault_label: VAULT_LABEL.to_string(),
        }
    }

    /// Renames the vault line in every subsequent preview.
    pub fn with_vault_label(mut self, vault_label: impl Into<String>) -> Self {
        self.vault_label = vault_label.into();
        self
    }

    /// Replaces the rule set with one zero-value percentage rule per member.
    pub async fn seed_roster(&self, members: &[Member]) -> Result<Vec<PayoutRule>> {
        let rules = default_rules(members);
        self.load_rules(rules.clone()).await?;
        tracing::info!(members = members.len(), "seeded default payout rules");
        Ok(rules)
    }

    /// Validates `rules` and makes them the current rule set.
    pub async fn load_rules(&self, rules: Vec<PayoutRule>) -> Result<()> {
        validate_rules(&rules)?;
        tracing::debug!(rules = rules.len(), "loaded payout rules");
        self.rule_store.replace_all(rules).await
    }

    /// Applies `patch` to one rule. The edit is only committed when the whole
    /// patched set still validates; the check runs inside the store's write lock.
    pub async fn update_rule(&self, rule_id: &str, patch: RulePatch) -> Result<PayoutRule> {
        let updated = self
            .rule_store
            .update(rule_id, patch, &validate_rules)
            .await?;
        tracing::info!(rule = rule_id, kind = %updated.r#type, value = %updated.value, "updated payout rule");
        Ok(updated)
    }

    /// Ordered snapshot of the current rules.
    pub async fn rules(&self) -> Result<Vec<PayoutRule>> {
        self.rule_store.all_rules().await
    }

    /// Computes the split of `deposit` against the current rules.
    ///
    /// Over-allocation is reported through [`SplitPlan::advisories`], never as an error.
    pub async fn preview(&self, deposit: Decimal) -> Result<SplitPlan> {
        let rules = self.rule_store.all_rules().await?;
        validate_split(deposit, &rules)?;

        let result = compute_split_with_vault_label(deposit, &rules, &self.vault_label);
        let advisories = advisories(deposit, &rules);

        tracing::debug!(
            %deposit,
            lines = result.len(),
            retained = %result.retained(),
            advisories = advisories.len(),
            "computed split preview"
        );
        for advisory in &advisories {
            tracing::debug!(%advisory, "split advisory");
        }

        Ok(SplitPlan {
            deposit,
            result,
            advisories,
        })
    }
}
