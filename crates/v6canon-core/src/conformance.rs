//! Conformance table — reference addresses and their canonical forms
//!
//! Each case exercises one or more of the simplification rules:
//! 1. leading zeros of each group are suppressed
//! 2. two or more consecutive zero groups collapse to `::`
//! 3. the longest run is collapsed, the leftmost one on a tie

use serde::Serialize;

use crate::normalizer::simplify;

/// A reference address and the form it must simplify to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Case {
    pub address: &'static str,
    pub expected: &'static str,
    pub rules: &'static str,
}

/// The outcome of running one `Case`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub case: Case,
    /// Simplified form, or the error message if the address was rejected
    pub actual: String,
    pub passed: bool,
}

pub const CASES: &[Case] = &[
    Case {
        address: "1111:2222:3333:4444:5555:0ab9:0e0f:0010",
        expected: "1111:2222:3333:4444:5555:ab9:e0f:10",
        rules: "1",
    },
    // a single all-zero group becomes 0
    Case {
        address: "1111:2222:3333:4444:0000:0006:0070:0800",
        expected: "1111:2222:3333:4444:0:6:70:800",
        rules: "1",
    },
    Case {
        address: "1111:2222:0000:0000:0000:0000:7777:8888",
        expected: "1111:2222::7777:8888",
        rules: "1+2",
    },
    Case {
        address: "1111:2222:3330:0000:0000:0666:7777:8888",
        expected: "1111:2222:3330::666:7777:8888",
        rules: "1+2",
    },
    // runs of 1s are not zero runs
    Case {
        address: "1111:2222:0000:0001:0001:0001:0001:0001",
        expected: "1111:2222:0:1:1:1:1:1",
        rules: "1+2",
    },
    Case {
        address: "1111:2222:0000:0000:5555:0000:0000:0000",
        expected: "1111:2222:0:0:5555::",
        rules: "1+2+3",
    },
    Case {
        address: "1111:2222:0000:0000:5555:0000:0000:8888",
        expected: "1111:2222::5555:0:0:8888",
        rules: "1+2+3",
    },
    Case {
        address: "0000:0000:3333:4444:5555:6666:7777:8888",
        expected: "::3333:4444:5555:6666:7777:8888",
        rules: "1+2+3",
    },
];

/// Run every case in `CASES`, in order
pub fn run() -> Vec<Outcome> {
    CASES.iter().map(|case| check(*case)).collect()
}

/// Run a single case
pub fn check(case: Case) -> Outcome {
    let actual = match simplify(case.address) {
        Ok(simplified) => simplified,
        Err(e) => e.to_string(),
    };
    let passed = actual == case.expected;
    if !passed {
        tracing::warn!(address = case.address, expected = case.expected, actual = %actual, "conformance case failed");
    }
    Outcome {
        case,
        actual,
        passed,
    }
}
