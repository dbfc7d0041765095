// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pass/fail tracker and console renderer.
//!
//! [`Report`] owns the run counters and an injected output sink. Rendering
//! never touches a global writer, so tests hand in a buffer and read the
//! lines back; the binary hands in stdout.

use std::io::{self, Write};

use colored::Colorize;

/// Width scenario labels are padded to in console lines.
pub const LABEL_WIDTH: usize = 25;

// Label color: RGB of xterm 208, the orange the suite has always used.
const LABEL_RGB: (u8, u8, u8) = (255, 135, 0);

/// Scenario outcome accumulator.
///
/// Invariant: `total() == passed() + failed()` after every [`record`].
///
/// [`record`]: Report::record
pub struct Report<W: Write> {
    num: u32,
    passed: u32,
    failed: u32,
    sink: W,
}

impl<W: Write> Report<W> {
    /// An empty report rendering into `sink`.
    pub fn new(sink: W) -> Self {
        Self {
            num: 0,
            passed: 0,
            failed: 0,
            sink,
        }
    }

    /// Record one scenario outcome and render its console line.
    ///
    /// The line carries a zero-padded sequence number, the label padded to
    /// [`LABEL_WIDTH`] columns, and an `OK`/`FAILED` tag.
    pub fn record(&mut self, passed: bool, label: &str) -> io::Result<()> {
        self.num += 1;
        let tag = if passed {
            self.passed += 1;
            "OK".green()
        } else {
            self.failed += 1;
            "FAILED".red()
        };
        let (r, g, b) = LABEL_RGB;
        writeln!(
            self.sink,
            "Test {} {} {tag}",
            format!("{:02}", self.num).bold(),
            format!("{label:<width$}", width = LABEL_WIDTH).truecolor(r, g, b),
        )
    }

    /// Render the two-line summary footer.
    pub fn summary(&mut self) -> io::Result<()> {
        writeln!(
            self.sink,
            "Total of tests {}",
            format!("{:02}", self.num).bold()
        )?;
        writeln!(
            self.sink,
            "- {} {}",
            "FAILED".red(),
            format!("{:2}", self.failed).bold()
        )
    }

    /// Scenarios recorded so far.
    pub fn total(&self) -> u32 {
        self.num
    }

    /// Scenarios whose expectation held.
    pub fn passed(&self) -> u32 {
        self.passed
    }

    /// Scenarios whose expectation did not hold.
    pub fn failed(&self) -> u32 {
        self.failed
    }
}
