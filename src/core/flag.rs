//! Environment switch model

use std::env;

/// A named boolean switch sourced from the environment.
///
/// A flag is considered set only when its variable holds the literal
/// value `"yes"`; anything else, including an unset variable, means unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// `CLIPPY` - run the lint pipeline
    Clippy,
    /// `DOCS` - build and publish documentation
    Docs,
    /// `RUSTFMT` - run the format check pipeline
    Rustfmt,
    /// `INTEGRATION_TESTS` - run the integration-test pipeline
    IntegrationTests,
    /// `GNUPLOT` - within the integration pipeline, also run ignored tests
    Gnuplot,
}

impl Flag {
    /// All recognized flags.
    pub const ALL: [Flag; 5] = [
        Flag::Clippy,
        Flag::Docs,
        Flag::Rustfmt,
        Flag::IntegrationTests,
        Flag::Gnuplot,
    ];

    /// The environment variable backing this flag.
    pub fn var(self) -> &'static str {
        match self {
            Flag::Clippy => "CLIPPY",
            Flag::Docs => "DOCS",
            Flag::Rustfmt => "RUSTFMT",
            Flag::IntegrationTests => "INTEGRATION_TESTS",
            Flag::Gnuplot => "GNUPLOT",
        }
    }
}

/// Snapshot of all flags, taken once per run.
///
/// Flags are never re-read after the snapshot; selection and planning
/// both work from the same values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagSet {
    clippy: bool,
    docs: bool,
    rustfmt: bool,
    integration_tests: bool,
    gnuplot: bool,
}

impl FlagSet {
    /// An empty set (no flag enabled).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read every flag from the current process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read every flag through a lookup function.
    ///
    /// Absent or malformed values are treated as unset, never rejected.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut flags = Self::empty();
        for flag in Flag::ALL {
            if lookup(flag.var()).as_deref() == Some("yes") {
                flags = flags.with(flag);
            }
        }
        flags
    }

    /// Return a copy with `flag` enabled.
    pub fn with(mut self, flag: Flag) -> Self {
        match flag {
            Flag::Clippy => self.clippy = true,
            Flag::Docs => self.docs = true,
            Flag::Rustfmt => self.rustfmt = true,
            Flag::IntegrationTests => self.integration_tests = true,
            Flag::Gnuplot => self.gnuplot = true,
        }
        self
    }

    /// Whether `flag` is enabled in this snapshot.
    pub fn is_set(&self, flag: Flag) -> bool {
        match flag {
            Flag::Clippy => self.clippy,
            Flag::Docs => self.docs,
            Flag::Rustfmt => self.rustfmt,
            Flag::IntegrationTests => self.integration_tests,
            Flag::Gnuplot => self.gnuplot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_yes_enables_flag() {
        let flags = FlagSet::from_lookup(lookup_from(&[("CLIPPY", "yes")]));
        assert!(flags.is_set(Flag::Clippy));
        assert!(!flags.is_set(Flag::Docs));
    }

    #[test]
    fn test_absent_means_unset() {
        let flags = FlagSet::from_lookup(lookup_from(&[]));
        for flag in Flag::ALL {
            assert!(!flags.is_set(flag));
        }
    }

    #[test]
    fn test_only_literal_yes_counts() {
        for value in ["YES", "Yes", "true", "1", "", " yes"] {
            let flags = FlagSet::from_lookup(lookup_from(&[("RUSTFMT", value)]));
            assert!(
                !flags.is_set(Flag::Rustfmt),
                "value {:?} should not enable the flag",
                value
            );
        }
    }

    #[test]
    fn test_multiple_flags() {
        let flags = FlagSet::from_lookup(lookup_from(&[
            ("DOCS", "yes"),
            ("GNUPLOT", "yes"),
            ("RUSTFMT", "no"),
        ]));
        assert!(flags.is_set(Flag::Docs));
        assert!(flags.is_set(Flag::Gnuplot));
        assert!(!flags.is_set(Flag::Rustfmt));
    }

    #[test]
    fn test_with_builder() {
        let flags = FlagSet::empty()
            .with(Flag::IntegrationTests)
            .with(Flag::Gnuplot);
        assert!(flags.is_set(Flag::IntegrationTests));
        assert!(flags.is_set(Flag::Gnuplot));
        assert!(!flags.is_set(Flag::Clippy));
    }
}
