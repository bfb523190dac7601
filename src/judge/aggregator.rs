//! Verdict aggregation
//!
//! Folds per-case outcomes into a run-level result, short-circuiting at
//! the first failure. The fold is an owned step type so the halt shows
//! up in signatures instead of hiding in loop control flow.

use crate::handlers::submissions::response::SampleCaseResult;
use crate::models::{CaseResult, Verdict};

/// Classify one case by comparing outputs.
///
/// Both sides are trimmed of leading and trailing whitespace and nothing
/// else; interior whitespace differences stay significant.
pub fn compare_output(actual: &str, expected: &str) -> Verdict {
    if actual.trim() == expected.trim() {
        Verdict::Passed
    } else {
        Verdict::WrongAnswer
    }
}

/// One step of a short-circuiting fold
#[derive(Debug)]
pub enum FoldStep<A> {
    /// Keep absorbing outcomes
    Continue(A),
    /// A failure was absorbed; the run stops here
    Halted(A),
}

/// Accumulator for graded runs: per-case records plus running totals
#[derive(Debug)]
pub struct GradedAggregate {
    results: Vec<CaseResult>,
    total_time_ms: f64,
    peak_memory_kb: i64,
    verdict: Verdict,
}

impl GradedAggregate {
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            total_time_ms: 0.0,
            peak_memory_kb: 0,
            verdict: Verdict::Accepted,
        }
    }

    /// Absorb one case outcome. Time is summed and memory maxed over
    /// every executed case, the failing one included; a failure becomes
    /// the run verdict and halts the fold.
    pub fn absorb(mut self, result: CaseResult) -> FoldStep<Self> {
        self.total_time_ms += result.execution_time;
        self.peak_memory_kb = self.peak_memory_kb.max(result.memory_used);

        let halted = result.status.is_failure();
        if halted {
            self.verdict = result.status;
        }
        self.results.push(result);

        if halted {
            FoldStep::Halted(self)
        } else {
            FoldStep::Continue(self)
        }
    }

    /// Complete a run that ran to its natural end (all cases, or halted
    /// on a logical failure)
    pub fn finish(self) -> GradedSummary {
        GradedSummary {
            verdict: self.verdict,
            execution_time_ms: self.total_time_ms,
            memory_used_kb: self.peak_memory_kb,
            compile_message: String::new(),
            results: self.results,
        }
    }

    /// Complete a run cut short by a service failure: partial records
    /// are kept and the verdict becomes `Internal Error`
    pub fn abort(self, message: String) -> GradedSummary {
        GradedSummary {
            verdict: Verdict::InternalError,
            execution_time_ms: self.total_time_ms,
            memory_used_kb: self.peak_memory_kb,
            compile_message: message,
            results: self.results,
        }
    }
}

/// Terminal result of a graded run, as persisted and as answered
#[derive(Debug, Clone, PartialEq)]
pub struct GradedSummary {
    pub verdict: Verdict,
    pub execution_time_ms: f64,
    pub memory_used_kb: i64,
    pub compile_message: String,
    pub results: Vec<CaseResult>,
}

impl GradedSummary {
    pub fn passed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == Verdict::Passed)
            .count()
    }
}

/// Accumulator for sample runs; the records carry everything the caller
/// sees, so there are no totals to track
#[derive(Debug)]
pub struct SampleAggregate {
    verdicts: Vec<SampleCaseResult>,
}

impl SampleAggregate {
    pub fn new() -> Self {
        Self {
            verdicts: Vec::new(),
        }
    }

    pub fn absorb(mut self, result: SampleCaseResult) -> FoldStep<Self> {
        let halted = result.status.is_failure();
        self.verdicts.push(result);

        if halted {
            FoldStep::Halted(self)
        } else {
            FoldStep::Continue(self)
        }
    }

    pub fn passed_count(&self) -> usize {
        self.verdicts
            .iter()
            .filter(|r| r.status == Verdict::Passed)
            .count()
    }

    pub fn into_verdicts(self) -> Vec<SampleCaseResult> {
        self.verdicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn case(status: Verdict, time_ms: f64, memory_kb: i64) -> CaseResult {
        CaseResult {
            test_case_id: Uuid::new_v4(),
            is_hidden: false,
            status,
            execution_time: time_ms,
            memory_used: memory_kb,
            message: String::new(),
        }
    }

    fn sample_case(status: Verdict) -> SampleCaseResult {
        SampleCaseResult {
            test_case_id: Uuid::new_v4(),
            input: "1 2".to_string(),
            expected_output: "3".to_string(),
            actual_output: "3".to_string(),
            status,
            compile_message: String::new(),
        }
    }

    #[test]
    fn test_compare_output_trims_outer_whitespace_only() {
        assert_eq!(compare_output("5\n", "5"), Verdict::Passed);
        assert_eq!(compare_output("  5 ", "\t5\t"), Verdict::Passed);
        assert_eq!(compare_output("5", "05"), Verdict::WrongAnswer);
        assert_eq!(compare_output("1 2", "1  2"), Verdict::WrongAnswer);
        assert_eq!(compare_output("a\nb", "a\nb\n"), Verdict::Passed);
        assert_eq!(compare_output("", "   "), Verdict::Passed);
    }

    #[test]
    fn test_graded_fold_sums_time_and_maxes_memory() {
        let mut aggregate = GradedAggregate::new();
        for result in [
            case(Verdict::Passed, 10.0, 100),
            case(Verdict::Passed, 20.0, 300),
            case(Verdict::Passed, 30.0, 200),
        ] {
            aggregate = match aggregate.absorb(result) {
                FoldStep::Continue(next) => next,
                FoldStep::Halted(_) => panic!("pass must not halt the fold"),
            };
        }

        let summary = aggregate.finish();
        assert_eq!(summary.verdict, Verdict::Accepted);
        assert_eq!(summary.execution_time_ms, 60.0);
        assert_eq!(summary.memory_used_kb, 300);
        assert_eq!(summary.results.len(), 3);
        assert_eq!(summary.passed_count(), 3);
        assert_eq!(summary.compile_message, "");
    }

    #[test]
    fn test_graded_fold_halts_on_failure_and_keeps_its_cost() {
        let aggregate = GradedAggregate::new();
        let aggregate = match aggregate.absorb(case(Verdict::Passed, 10.0, 100)) {
            FoldStep::Continue(next) => next,
            FoldStep::Halted(_) => panic!("pass must not halt the fold"),
        };

        // The failing case's time and memory count toward the totals
        let aggregate = match aggregate.absorb(case(Verdict::TimeLimitExceeded, 2000.0, 50)) {
            FoldStep::Halted(next) => next,
            FoldStep::Continue(_) => panic!("failure must halt the fold"),
        };

        let summary = aggregate.finish();
        assert_eq!(summary.verdict, Verdict::TimeLimitExceeded);
        assert_eq!(summary.execution_time_ms, 2010.0);
        assert_eq!(summary.memory_used_kb, 100);
        assert_eq!(summary.results.len(), 2);
        assert_eq!(summary.passed_count(), 1);
    }

    #[test]
    fn test_abort_keeps_partial_records_under_internal_error() {
        let aggregate = GradedAggregate::new();
        let aggregate = match aggregate.absorb(case(Verdict::Passed, 15.0, 64)) {
            FoldStep::Continue(next) => next,
            FoldStep::Halted(_) => panic!("pass must not halt the fold"),
        };

        let summary = aggregate.abort("execution service returned 500".to_string());
        assert_eq!(summary.verdict, Verdict::InternalError);
        assert_eq!(summary.execution_time_ms, 15.0);
        assert_eq!(summary.results.len(), 1);
        assert_eq!(summary.compile_message, "execution service returned 500");
    }

    #[test]
    fn test_sample_fold_halts_on_failure() {
        let aggregate = SampleAggregate::new();
        let aggregate = match aggregate.absorb(sample_case(Verdict::Passed)) {
            FoldStep::Continue(next) => next,
            FoldStep::Halted(_) => panic!("pass must not halt the fold"),
        };
        let aggregate = match aggregate.absorb(sample_case(Verdict::WrongAnswer)) {
            FoldStep::Halted(next) => next,
            FoldStep::Continue(_) => panic!("failure must halt the fold"),
        };

        assert_eq!(aggregate.passed_count(), 1);
        let verdicts = aggregate.into_verdicts();
        assert_eq!(verdicts.len(), 2);
        assert_eq!(verdicts[1].status, Verdict::WrongAnswer);
    }
}
