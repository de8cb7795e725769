//! Chain matching and INCLUDE/EXCLUDE polarity for a whole rule.

use super::chain::evaluate_all;
use crate::domain::{rule_type, Context, Rule};

impl Rule {
    /// Whether the condition chain matches `context`. An empty chain always matches.
    pub fn matches(&self, context: &Context) -> bool {
        evaluate_all(&self.conditions, context)
    }

    pub fn should_include(&self, context: &Context) -> bool {
        self.polarity_holds(rule_type::INCLUDE, context)
    }

    pub fn should_exclude(&self, context: &Context) -> bool {
        self.polarity_holds(rule_type::EXCLUDE, context)
    }

    fn polarity_holds(&self, polarity: &str, context: &Context) -> bool {
        if self.conditions.is_empty() {
            return self.rule_type == polarity;
        }
        self.matches(context) && self.rule_type == polarity
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{
        rule_type, status, Combinator, Condition, Context, Operator, Rule, MARKET_GLOBAL,
    };

    #[test]
    fn test_empty_conditions_follow_polarity() {
        let ctx = Context::new().with("anything", 1);
        let include = Rule::new(1, "inc", rule_type::INCLUDE, MARKET_GLOBAL);
        let exclude = Rule::new(2, "exc", rule_type::EXCLUDE, MARKET_GLOBAL);
        let other = Rule::new(3, "calc", "CALCULATION", MARKET_GLOBAL);

        assert!(include.should_include(&ctx));
        assert!(!include.should_exclude(&ctx));
        assert!(exclude.should_exclude(&ctx));
        assert!(!exclude.should_include(&ctx));
        assert!(!other.should_include(&ctx));
        assert!(!other.should_exclude(&ctx));
    }

    #[test]
    fn test_polarity_requires_chain_match() {
        let rule = Rule::new(1, "htb-exclusion", rule_type::EXCLUDE, "US")
            .with_status(status::ACTIVE)
            .with_condition(Condition::new("temperature", Operator::Equals, "HTB"));
        assert!(rule.should_exclude(&Context::new().with("temperature", "HTB")));
        assert!(!rule.should_exclude(&Context::new().with("temperature", "GC")));
        assert!(!rule.should_include(&Context::new().with("temperature", "HTB")));
    }

    #[test]
    fn test_matches_folds_the_whole_chain() {
        let rule = Rule::new(1, "r", "CALCULATION", MARKET_GLOBAL)
            .with_condition(
                Condition::new("market", Operator::Equals, "US").with_combinator(Combinator::Or),
            )
            .with_condition(Condition::new("market", Operator::Equals, "JP"));
        assert!(rule.matches(&Context::new().with("market", "JP")));
        assert!(!rule.matches(&Context::new().with("market", "TW")));
        assert!(Rule::new(2, "empty", "CALCULATION", MARKET_GLOBAL).matches(&Context::new()));
    }
}
