// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Declarative acceptance suite for the client under test.
//!
//! Each [`Scenario`] pairs one argument vector with the exit-code predicate
//! the client must satisfy. The suite is a const table iterated generically
//! by the harness; adding or removing a drill is a one-row edit.

/// Server address used by the reachable-server drills.
pub const NTP_SERVER: &str = "ntp.accelance.net";

/// Pass condition on an observed exit code.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Expect {
    /// The client must exit zero.
    Success,
    /// The client must exit non-zero.
    Failure,
}

impl Expect {
    /// Evaluate the predicate against an observed exit code.
    pub fn matches(self, exit_code: i32) -> bool {
        match self {
            Self::Success => exit_code == 0,
            Self::Failure => exit_code != 0,
        }
    }
}

/// One drill: an argument vector, the expected exit-code predicate, and the
/// label shown in the console report.
#[derive(Clone, Copy, Debug)]
pub struct Scenario {
    /// Display label, padded to [`crate::report::LABEL_WIDTH`] columns.
    pub label: &'static str,
    /// Arguments handed to the client binary.
    pub args: &'static [&'static str],
    /// Pass condition on the exit code.
    pub expect: Expect,
}

/// The fixed acceptance suite.
///
/// Order is significant only for the sequence numbers in the console report.
/// "Update" asks the client to step the system clock and is expected to be
/// refused on CI runners, which lack the privilege.
pub const ACCEPTANCE_SUITE: &[Scenario] = &[
    Scenario {
        label: "Opt error",
        args: &["-0"],
        expect: Expect::Failure,
    },
    Scenario {
        label: "Help",
        args: &["-h"],
        expect: Expect::Success,
    },
    Scenario {
        label: "Version",
        args: &["-v"],
        expect: Expect::Success,
    },
    Scenario {
        label: "Address error 1",
        args: &[],
        expect: Expect::Failure,
    },
    Scenario {
        label: "Address error 2",
        args: &["-a", "98fgjk"],
        expect: Expect::Failure,
    },
    Scenario {
        label: "Port error 1",
        args: &["-a", NTP_SERVER, "-p", "0"],
        expect: Expect::Failure,
    },
    Scenario {
        label: "Port error 2",
        args: &["-a", NTP_SERVER, "-p", "65536"],
        expect: Expect::Failure,
    },
    Scenario {
        label: "Port error 3",
        args: &["-a", NTP_SERVER, "-p", "azerty"],
        expect: Expect::Failure,
    },
    Scenario {
        label: "Count error 1",
        args: &["-a", NTP_SERVER, "--count", "azer"],
        expect: Expect::Failure,
    },
    Scenario {
        label: "Count error 2",
        args: &["-a", NTP_SERVER, "--count", "azer", "--continue"],
        expect: Expect::Failure,
    },
    Scenario {
        label: "Single",
        args: &["-a", NTP_SERVER],
        expect: Expect::Success,
    },
    Scenario {
        label: "Count",
        args: &["-a", NTP_SERVER, "--count", "1"],
        expect: Expect::Success,
    },
    Scenario {
        label: "Update",
        args: &["-a", NTP_SERVER, "-u"],
        expect: Expect::Failure,
    },
];
