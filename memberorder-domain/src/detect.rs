use crate::classify::{identifier, identifier_text, sort_keys, target_order};
use crate::policy::{Exemption, ExemptionPolicy};
use crate::ports::{EmbeddedFacts, FactProvider};
use memberorder_types::container::Container;
use memberorder_types::syntax::Token;
use tracing::debug;

/// The first member found out of order in a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Index of the offending member in the original sequence.
    pub member_index: usize,
    /// Identifier token of the offending member; where the diagnostic is reported.
    pub location: Token,
    pub subject_name: String,
}

impl Violation {
    pub fn message(&self) -> String {
        format!("member '{}' is out of order", self.subject_name)
    }
}

/// Index of the first member whose target position is before its predecessor's.
///
/// Only adjacent inversions against the fully sorted order count, so the report is stable: the
/// same container always yields the same member.
pub fn first_violation(container: &Container) -> Option<usize> {
    let keys = sort_keys(container);
    let order = target_order(&keys);

    let mut target = vec![0usize; order.len()];
    for (position, &original) in order.iter().enumerate() {
        target[original] = position;
    }

    (1..target.len()).find(|&i| target[i] < target[i - 1])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    Exempt(Exemption),
    Ordered,
    Violation(Violation),
}

impl Analysis {
    pub fn violation(self) -> Option<Violation> {
        match self {
            Analysis::Violation(v) => Some(v),
            _ => None,
        }
    }
}

/// Exemption policy plus fact provider; analyzes containers one at a time.
///
/// Holds no mutable state, so one analyzer can be shared across threads.
pub struct Analyzer {
    policy: ExemptionPolicy,
    facts: Box<dyn FactProvider>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(ExemptionPolicy::default())
    }
}

impl Analyzer {
    pub fn new(policy: ExemptionPolicy) -> Self {
        Self {
            policy,
            facts: Box::new(EmbeddedFacts),
        }
    }

    pub fn with_facts(policy: ExemptionPolicy, facts: Box<dyn FactProvider>) -> Self {
        Self { policy, facts }
    }

    pub fn policy(&self) -> &ExemptionPolicy {
        &self.policy
    }

    pub fn exemption(&self, container: &Container) -> Option<Exemption> {
        self.policy.exemption(container, self.facts.as_ref())
    }

    pub fn analyze_container(&self, container: &Container) -> Analysis {
        if let Some(exemption) = self.exemption(container) {
            debug!(container = %container.name, %exemption, "container exempt");
            return Analysis::Exempt(exemption);
        }

        let Some(index) = first_violation(container) else {
            return Analysis::Ordered;
        };

        let member = &container.members[index];
        let violation = Violation {
            member_index: index,
            location: identifier(member).cloned().unwrap_or_else(|| Token::new("")),
            subject_name: identifier_text(member).to_string(),
        };
        debug!(
            container = %container.name,
            subject = %violation.subject_name,
            index,
            "member out of order"
        );
        Analysis::Violation(violation)
    }

    pub fn analyze(&self, container: &Container) -> Option<Violation> {
        self.analyze_container(container).violation()
    }
}
