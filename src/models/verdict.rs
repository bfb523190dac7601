//! Verdict vocabulary shared by the execution service, the API, and the
//! database. One canonical set of strings end to end; the submissions
//! table enforces the same set with a CHECK constraint.

use serde::{Deserialize, Serialize};

/// Verdict for a single test case or an entire submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Evaluation not finished (graded submissions are born with this)
    Pending,
    /// Single test case passed
    Passed,
    /// Entire submission passed every test case
    Accepted,
    /// Output does not match expected
    #[serde(rename = "Wrong Answer")]
    WrongAnswer,
    /// Exceeded the problem's time limit
    #[serde(rename = "Time Limit Exceeded")]
    TimeLimitExceeded,
    /// Exceeded the problem's memory limit
    #[serde(rename = "Memory Limit Exceeded")]
    MemoryLimitExceeded,
    /// Program crashed or exited non-zero
    #[serde(rename = "Runtime Error")]
    RuntimeError,
    /// Source failed to compile
    #[serde(rename = "Compilation Error")]
    CompilationError,
    /// The run could not be completed (execution service failure)
    #[serde(rename = "Internal Error")]
    InternalError,
}

impl Verdict {
    /// Canonical string form, identical on the wire and in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Pending => "Pending",
            Verdict::Passed => "Passed",
            Verdict::Accepted => "Accepted",
            Verdict::WrongAnswer => "Wrong Answer",
            Verdict::TimeLimitExceeded => "Time Limit Exceeded",
            Verdict::MemoryLimitExceeded => "Memory Limit Exceeded",
            Verdict::RuntimeError => "Runtime Error",
            Verdict::CompilationError => "Compilation Error",
            Verdict::InternalError => "Internal Error",
        }
    }

    /// Parse the canonical string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Verdict::Pending),
            "Passed" => Some(Verdict::Passed),
            "Accepted" => Some(Verdict::Accepted),
            "Wrong Answer" => Some(Verdict::WrongAnswer),
            "Time Limit Exceeded" => Some(Verdict::TimeLimitExceeded),
            "Memory Limit Exceeded" => Some(Verdict::MemoryLimitExceeded),
            "Runtime Error" => Some(Verdict::RuntimeError),
            "Compilation Error" => Some(Verdict::CompilationError),
            "Internal Error" => Some(Verdict::InternalError),
            _ => None,
        }
    }

    /// Check if the verdict halts a run (anything but a pass)
    pub fn is_failure(&self) -> bool {
        !matches!(self, Verdict::Passed | Verdict::Accepted | Verdict::Pending)
    }

    /// Check if the verdict is terminal
    pub fn is_final(&self) -> bool {
        !matches!(self, Verdict::Pending)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse classification of an execution service failure, surfaced to
/// clients in error details so they can hint at the likely cause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// The call (or the program under it) exceeded a time budget
    Timeout,
    /// The service reported a compilation problem
    Compile,
    /// The service reported a runtime crash
    Runtime,
    /// Anything the service did not classify
    Unknown,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Compile => "compile",
            FailureKind::Runtime => "runtime",
            FailureKind::Unknown => "unknown",
        }
    }

    /// Derive a classification from a verdict string found in an error body
    pub fn from_verdict(verdict: Option<&Verdict>) -> Self {
        match verdict {
            Some(Verdict::TimeLimitExceeded) => FailureKind::Timeout,
            Some(Verdict::CompilationError) => FailureKind::Compile,
            Some(Verdict::RuntimeError) => FailureKind::Runtime,
            _ => FailureKind::Unknown,
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
