// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! CLI entry point for the ntpc acceptance harness.

use std::process::ExitCode;

use anyhow::Result;
use ntpc_harness::harness::entrypoint;

fn main() -> Result<ExitCode> {
    entrypoint()
}
