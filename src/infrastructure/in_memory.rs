use crate::domain::ports::{RuleSetCheck, RuleStore};
use crate::domain::rule::{PayoutRule, RulePatch, update_rule};
use crate::error::{Result, SplitError};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for payout rules.
///
/// Uses `Arc<RwLock<Vec<PayoutRule>>>` so declared order is kept and concurrent
/// previews always read a whole snapshot. Nothing outlives the process.
#[derive(Default, Clone)]
pub struct InMemoryRuleStore {
    rules: Arc<RwLock<Vec<PayoutRule>>>,
}

impl InMemoryRuleStore {
    /// Creates a new, empty in-memory rule store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with `rules`.
    pub fn with_rules(rules: Vec<PayoutRule>) -> Self {
        Self {
            rules: Arc::new(RwLock::new(rules)),
        }
    }
}

#[async_trait]
impl RuleStore for InMemoryRuleStore {
    async fn replace_all(&self, rules: Vec<PayoutRule>) -> Result<()> {
        let mut current = self.rules.write().await;
        *current = rules;
        Ok(())
    }

    async fn get(&self, rule_id: &str) -> Result<Option<PayoutRule>> {
        let rules = self.rules.read().await;
        Ok(rules.iter().find(|r| r.id == rule_id).cloned())
    }

    async fn all_rules(&self) -> Result<Vec<PayoutRule>> {
        let rules = self.rules.read().await;
        Ok(rules.clone())
    }

    async fn update(
        &self,
        rule_id: &str,
        patch: RulePatch,
        check: RuleSetCheck<'_>,
    ) -> Result<PayoutRule> {
        let mut rules = self.rules.write().await;
        let updated = update_rule(&rules, rule_id, &patch)?;
        check(&updated)?;
        let rule = updated
            .iter()
            .find(|r| r.id == rule_id)
            .cloned()
            .ok_or_else(|| SplitError::RuleNotFound(rule_id.to_string()))?;
        *rules = updated;
        Ok(rule)
    }
}
