//! Outcome expectations for litmus tests.

/// How an observed outcome is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Expect {
    /// Legal and unremarkable.
    Acceptable,
    /// Legal, but a weak-memory artifact worth reporting.
    AcceptableInteresting,
    /// Must never happen; a correctness bug.
    Forbidden,
}

impl std::fmt::Display for Expect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Expect::Acceptable => "ACCEPTABLE",
            Expect::AcceptableInteresting => "INTERESTING",
            Expect::Forbidden => "FORBIDDEN",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
struct Rule {
    ids: Vec<String>,
    expect: Expect,
    desc: &'static str,
}

/// Ordered outcome rules with a fallback for ids no rule names.
///
/// ```
/// use kaos_sequence_test_support::{Expect, OutcomeTable};
///
/// let table = OutcomeTable::new()
///     .outcome(&["1"], Expect::Forbidden, "One update lost.")
///     .outcome(&["2"], Expect::Acceptable, "Both updates.");
///
/// assert_eq!(table.classify("2").0, Expect::Acceptable);
/// assert_eq!(table.classify("3").0, Expect::Forbidden);
/// ```
#[derive(Debug, Clone)]
pub struct OutcomeTable {
    rules: Vec<Rule>,
    fallback: Expect,
    fallback_desc: &'static str,
}

impl OutcomeTable {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            fallback: Expect::Forbidden,
            fallback_desc: "Other cases are forbidden.",
        }
    }

    pub fn outcome(mut self, ids: &[&str], expect: Expect, desc: &'static str) -> Self {
        self.rules.push(Rule {
            ids: ids.iter().map(|id| id.to_string()).collect(),
            expect,
            desc,
        });
        self
    }

    /// Expectation for ids not listed by any rule.
    pub fn otherwise(mut self, expect: Expect, desc: &'static str) -> Self {
        self.fallback = expect;
        self.fallback_desc = desc;
        self
    }

    /// First matching rule wins.
    pub fn classify(&self, id: &str) -> (Expect, &'static str) {
        self.rules
            .iter()
            .find(|rule| rule.ids.iter().any(|candidate| candidate == id))
            .map(|rule| (rule.expect, rule.desc))
            .unwrap_or((self.fallback, self.fallback_desc))
    }
}

impl Default for OutcomeTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dekker() -> OutcomeTable {
        OutcomeTable::new()
            .outcome(&["0, 1", "1, 0", "1, 1"], Expect::Acceptable, "Trivial under sequential consistency")
            .outcome(&["0, 0"], Expect::AcceptableInteresting, "Violates sequential consistency")
    }

    #[test]
    fn test_classify_listed_ids() {
        let table = dekker();
        assert_eq!(table.classify("1, 0").0, Expect::Acceptable);
        assert_eq!(table.classify("0, 0").0, Expect::AcceptableInteresting);
    }

    #[test]
    fn test_classify_falls_back() {
        let (expect, desc) = dekker().classify("2, 2");
        assert_eq!(expect, Expect::Forbidden);
        assert_eq!(desc, "Other cases are forbidden.");

        let lenient = OutcomeTable::new().otherwise(Expect::Acceptable, "Anything goes.");
        assert_eq!(lenient.classify("7").0, Expect::Acceptable);
    }

    #[test]
    fn test_first_rule_wins() {
        let table = OutcomeTable::new()
            .outcome(&["0"], Expect::Acceptable, "first")
            .outcome(&["0"], Expect::Forbidden, "second");
        assert_eq!(table.classify("0"), (Expect::Acceptable, "first"));
    }
}
