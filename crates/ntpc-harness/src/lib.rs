// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Black-box acceptance drills for the `ntpc` client binary.
//!
//! The harness spawns a pre-built client with a fixed table of argument
//! vectors and judges each run solely by its process exit code. It knows
//! nothing about NTP itself — the client is an opaque collaborator whose one
//! observable is the integer it exits with (0 = success, non-zero = failure).
//!
//! - [`scenario`] — the declarative acceptance suite.
//! - [`process`] — the spawn capability (blocking and bounded runners).
//! - [`report`] — the pass/fail tracker and console renderer.
//! - [`harness`] — the scenario runner and CLI driver.

pub mod harness;
pub mod process;
pub mod report;
pub mod scenario;
