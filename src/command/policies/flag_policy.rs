use crate::core::types::Flag;
use crate::errors::Error;
use std::str::FromStr;

#[derive(Debug)]
pub enum FlagDecision {
    /// Stop execution and just print usage()
    ShortCircuitUsage,
    /// Continue command execution
    Continue,
    /// Turn into an error
    Error(Error),
}

/// One check over a command's raw arguments, run before the command itself.
pub trait FlagRule {
    fn check(&self, args: &[String]) -> FlagDecision;
}

pub struct HelpAtIdx(pub usize);
impl FlagRule for HelpAtIdx {
    fn check(&self, args: &[String]) -> FlagDecision {
        match args.get(self.0).map(|a| Flag::from_str(a)) {
            Some(Ok(Flag::Help)) => FlagDecision::ShortCircuitUsage,
            _ => FlagDecision::Continue,
        }
    }
}

/// Positional argument count within `min..=max`; `--flags` are not counted.
pub struct ArgCount {
    pub min: usize,
    pub max: Option<usize>,
    pub usage: String,
}

impl FlagRule for ArgCount {
    fn check(&self, args: &[String]) -> FlagDecision {
        let count = args.iter().filter(|a| !a.starts_with("--")).count();
        let too_many = self.max.is_some_and(|max| count > max);
        if count < self.min {
            FlagDecision::Error(Error::Parse(format!("Missing argument(s).\n{}", self.usage)))
        } else if too_many {
            FlagDecision::Error(Error::Parse(format!("Too many arguments.\n{}", self.usage)))
        } else {
            FlagDecision::Continue
        }
    }
}

pub struct FlagPolicy {
    rules: Vec<Box<dyn FlagRule>>,
}
impl FlagPolicy {
    pub fn new(rules: Vec<Box<dyn FlagRule>>) -> Self {
        Self { rules }
    }
    pub fn none() -> Self {
        Self { rules: vec![] }
    }

    /// Help first, then the positional argument count.
    pub fn help_and_arity(min: usize, max: Option<usize>, usage: String) -> Self {
        Self::new(vec![
            Box::new(HelpAtIdx(0)),
            Box::new(ArgCount { min, max, usage }),
        ])
    }

    pub fn evaluate(&self, args: &[String]) -> FlagDecision {
        // First matching short-circuit wins; otherwise Continue.
        for r in &self.rules {
            match r.check(args) {
                FlagDecision::Continue => continue,
                other => return other,
            }
        }
        FlagDecision::Continue
    }
}
