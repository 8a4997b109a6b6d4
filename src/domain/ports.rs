use super::rule::{PayoutRule, RulePatch};
use crate::error::Result;
use async_trait::async_trait;

/// Holds the ordered rule set a split is computed from.
///
/// The split engine never talks to a store; callers take a snapshot with
/// [`RuleStore::all_rules`] and hand it over.
#[async_trait]
pub trait RuleStore: Send + Sync {
    async fn replace_all(&self, rules: Vec<PayoutRule>) -> Result<()>;
    async fn get(&self, rule_id: &str) -> Result<Option<PayoutRule>>;
    async fn all_rules(&self) -> Result<Vec<PayoutRule>>;
    /// Applies `patch` to the rule with `rule_id` and returns the updated rule.
    ///
    /// `check` sees the whole patched set while the store is locked; the set is
    /// only committed when it returns `Ok`.
    async fn update(
        &self,
        rule_id: &str,
        patch: RulePatch,
        check: RuleSetCheck<'_>,
    ) -> Result<PayoutRule>;
}

/// Validation applied to a candidate rule set before a store commits it.
pub type RuleSetCheck<'a> = &'a (dyn Fn(&[PayoutRule]) -> Result<()> + Send + Sync);

pub type RuleStoreBox = Box<dyn RuleStore>;
pub type RuleStoreFactory = Box<dyn Fn() -> RuleStoreBox + Send + Sync>;
