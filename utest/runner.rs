// Copyright 2025 The Pigweed Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License. You may obtain a copy of
// the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied. See the
// License for the specific language governing permissions and limitations under
// the License.

use std::fmt;
use std::process::ExitCode;

use tracing::{debug, error, info};

use crate::registry::{self, Registry, TestCase};
use crate::{Config, Context, Reporter};

/// Pass/fail tally of evaluated checks.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    pub passed: u32,
    pub failed: u32,
}

impl Summary {
    pub(crate) fn increase_passed(&mut self) {
        self.passed += 1;
    }

    pub(crate) fn increase_failed(&mut self) {
        self.failed += 1;
    }

    pub fn total(&self) -> u32 {
        self.passed + self.failed
    }

    pub fn exit_status(&self) -> ExitStatus {
        match (self.total(), self.failed) {
            (0, _) => ExitStatus::NoChecks,
            (_, 0) => ExitStatus::AllPassed,
            (_, failed) => ExitStatus::Failed(failed),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exit_status() {
            ExitStatus::NoChecks => write!(f, "No checks were executed."),
            ExitStatus::AllPassed => write!(f, "Summary : All {} checks passed.", self.total()),
            ExitStatus::Failed(failed) => write!(
                f,
                "Summary : error: {} out of {} checks failed.",
                failed,
                self.total()
            ),
        }
    }
}

/// Outcome of a run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExitStatus {
    AllPassed,
    /// Number of failed checks.
    Failed(u32),
    /// Nothing was checked.  Shares status code 1 with a single failure.
    NoChecks,
}

impl ExitStatus {
    /// `0` when every check passed, the number of failed checks otherwise, and
    /// `1` when no check ran.
    pub fn code(&self) -> i32 {
        match *self {
            ExitStatus::AllPassed => 0,
            ExitStatus::Failed(failed) => i32::try_from(failed).unwrap_or(i32::MAX),
            ExitStatus::NoChecks => 1,
        }
    }

    /// [`ExitStatus::code`] narrowed to what a process can return.  Failure
    /// counts saturate at 255 and never wrap around to 0.
    pub fn process_code(&self) -> u8 {
        match *self {
            ExitStatus::AllPassed => 0,
            ExitStatus::Failed(failed) => u8::try_from(failed).unwrap_or(u8::MAX),
            ExitStatus::NoChecks => 1,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.process_code())
    }
}

/// A single test run: the test cases to execute and the context they execute
/// in.
pub struct Session {
    registry: Registry,
    context: Context,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self::with_registry(Registry::new(), config)
    }

    pub fn with_registry(registry: Registry, config: &Config) -> Self {
        Self {
            registry,
            context: Context::new(config, Reporter::stdout()),
        }
    }

    /// Session over every test case registered through `#[utest::test]`.
    pub fn from_registered(config: &Config) -> Self {
        Self::with_registry(registry::registered(), config)
    }

    pub fn with_reporter(mut self, reporter: Reporter) -> Self {
        self.context.reporter = reporter;
        self
    }

    pub fn register(&mut self, test: TestCase) {
        self.registry.register(test);
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Runs every enabled test case, and the disabled ones too when the
    /// session includes them.  A failed check ends its own test case only.
    pub fn run_tests(&mut self) {
        let Self { registry, context } = self;
        for test in registry.iter() {
            context.begin_test(test.name());
            if !test.enabled() && !context.include_disabled() {
                debug!("[{}] SKIPPED (disabled)", test.name());
                continue;
            }

            info!("[{}] running", test.name());
            match test.run(context) {
                Ok(()) => info!("[{}] PASSED", test.name()),
                Err(_) => error!("[{}] FAILED", test.name()),
            }
        }
    }

    pub fn summary(&self) -> Summary {
        self.context.results()
    }

    /// Runs the tests, writes the summary line and returns the outcome.
    pub fn run_all(&mut self) -> ExitStatus {
        self.run_tests();
        let summary = self.summary();
        self.context.reporter.report_summary(&summary);
        summary.exit_status()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("registry", &self.registry)
            .field("include_disabled", &self.context.include_disabled)
            .field("results", &self.context.results)
            .finish_non_exhaustive()
    }
}
