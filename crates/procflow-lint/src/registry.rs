//! The rule registry.
//!
//! The registry maps rule names to a factory and a configured level. It holds
//! no rule instances: the linter builds fresh ones for every run.

use indexmap::IndexMap;

use crate::{
    error::{LintError, RuleLevel, Severity},
    rules::{
        ConditionalFlows, DisallowNodeType, EndEventRequired, EventSubProcessTypedStartEvent,
        FakeJoin, LabelRequired, NoDisconnected, NoDuplicateSequenceFlows, NoGatewayJoinFork,
        NoImplicitSplit, Rule, SingleBlankStartEvent, SingleEventDefinition, StartEventRequired,
        SubProcessBlankStartEvent, SuperfluousGateway,
    },
};

/// Creates a fresh rule instance.
pub type RuleFactory = fn() -> Box<dyn Rule>;

#[derive(Debug, Clone, Copy)]
struct Registration {
    factory: RuleFactory,
    level: RuleLevel,
}

/// Ordered mapping from rule name to factory and level.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: IndexMap<&'static str, Registration>,
}

impl RuleRegistry {
    /// Create a registry without any rules.
    pub fn empty() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }

    /// Create a registry with all built-in rules at their default levels.
    pub fn recommended() -> Self {
        let mut registry = Self::empty();
        let defaults: [(RuleFactory, Severity); 16] = [
            (boxed::<ConditionalFlows>, Severity::Error),
            (boxed::<EndEventRequired>, Severity::Error),
            (boxed::<EventSubProcessTypedStartEvent>, Severity::Error),
            (boxed::<FakeJoin>, Severity::Warn),
            (boxed::<LabelRequired>, Severity::Error),
            (no_complex_gateway, Severity::Error),
            (boxed::<NoDisconnected>, Severity::Error),
            (boxed::<NoDuplicateSequenceFlows>, Severity::Error),
            (boxed::<NoGatewayJoinFork>, Severity::Error),
            (boxed::<NoImplicitSplit>, Severity::Error),
            (no_inclusive_gateway, Severity::Error),
            (boxed::<SingleBlankStartEvent>, Severity::Error),
            (boxed::<SingleEventDefinition>, Severity::Error),
            (boxed::<StartEventRequired>, Severity::Error),
            (boxed::<SubProcessBlankStartEvent>, Severity::Error),
            (boxed::<SuperfluousGateway>, Severity::Warning),
        ];

        for (factory, severity) in defaults {
            registry.register(factory, RuleLevel::On(severity));
        }
        registry
    }

    /// Register a rule, replacing any rule of the same name.
    pub fn register(&mut self, factory: RuleFactory, level: RuleLevel) -> &mut Self {
        let name = factory().name();
        self.rules.insert(name, Registration { factory, level });
        self
    }

    /// Change the level of a registered rule.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::UnknownRule`] if no rule has that name.
    pub fn set_level(&mut self, name: &str, level: RuleLevel) -> Result<(), LintError> {
        let registration = self
            .rules
            .get_mut(name)
            .ok_or_else(|| LintError::UnknownRule(name.to_owned()))?;
        registration.level = level;
        Ok(())
    }

    /// The configured level of `name`.
    pub fn level(&self, name: &str) -> Option<RuleLevel> {
        self.rules.get(name).map(|registration| registration.level)
    }

    /// Iterate over the registered rule names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Fresh instances of every enabled rule with its severity.
    pub(crate) fn instantiate(&self) -> Vec<(Box<dyn Rule>, Severity)> {
        self.rules
            .values()
            .filter_map(|registration| {
                let severity = registration.level.severity()?;
                Some(((registration.factory)(), severity))
            })
            .collect()
    }
}

fn boxed<R: Rule + Default + 'static>() -> Box<dyn Rule> {
    Box::new(R::default())
}

fn no_complex_gateway() -> Box<dyn Rule> {
    Box::new(DisallowNodeType::complex_gateway())
}

fn no_inclusive_gateway() -> Box<dyn Rule> {
    Box::new(DisallowNodeType::inclusive_gateway())
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::recommended()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommended_levels() {
        let registry = RuleRegistry::recommended();

        assert_eq!(registry.len(), 16);
        assert_eq!(
            registry.level("fake-join"),
            Some(RuleLevel::On(Severity::Warn))
        );
        assert_eq!(
            registry.level("superfluous-gateway"),
            Some(RuleLevel::On(Severity::Warning))
        );
        assert_eq!(
            registry.level("no-duplicate-sequence-flows"),
            Some(RuleLevel::On(Severity::Error))
        );
        assert_eq!(registry.level("no-such-rule"), None);
    }

    #[test]
    fn test_names_are_unique_and_ordered() {
        let registry = RuleRegistry::recommended();
        let names: Vec<&str> = registry.names().collect();

        assert_eq!(names.first(), Some(&"conditional-flows"));
        assert_eq!(names.last(), Some(&"superfluous-gateway"));
        assert!(names.contains(&"no-complex-gateway"));
        assert!(names.contains(&"no-inclusive-gateway"));
    }

    #[test]
    fn test_set_level() {
        let mut registry = RuleRegistry::recommended();

        registry.set_level("label-required", RuleLevel::Off).unwrap();
        assert_eq!(registry.instantiate().len(), 15);

        let err = registry
            .set_level("lable-required", RuleLevel::Off)
            .unwrap_err();
        assert_eq!(err, LintError::UnknownRule("lable-required".to_owned()));
    }
}
