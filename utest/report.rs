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
use std::io::{self, Write};

use crate::CheckSite;
use crate::runner::Summary;

/// Everything known about a check at the time it is reported.
#[derive(Clone, Copy, Debug)]
pub struct CheckMetadata<'a> {
    pub test_name: &'a str,
    pub site: &'a CheckSite,
}

/// One failure record.  Displays as the headline followed by the expression
/// and value detail lines.
pub struct Failure<'a> {
    pub expected: &'a dyn fmt::Display,
    pub actual: &'a dyn fmt::Display,
    pub require_eq: bool,
    pub metadata: &'a CheckMetadata<'a>,
    pub annotation: Option<&'a str>,
}

impl fmt::Display for Failure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let site = self.metadata.site;
        write!(
            f,
            "{}({}) : error: Failure in *{}* : ",
            site.file, site.line, self.metadata.test_name
        )?;
        if let Some(annotation) = self.annotation {
            write!(f, "{annotation}: ")?;
        }
        let expectation = if self.require_eq {
            "Expected"
        } else {
            "Expected NOT"
        };
        writeln!(
            f,
            "{expectation} \"{}\" but was \"{}\"",
            self.expected, self.actual
        )?;
        writeln!(f, "    expression: {}", site.expression)?;
        write!(f, "    expected: {}, actual: {}", self.expected, self.actual)
    }
}

/// Diagnostic output sink.  Write errors are dropped; reporting never fails a
/// run.
pub struct Reporter {
    out: Box<dyn Write>,
}

impl Reporter {
    pub fn new(out: impl Write + 'static) -> Self {
        Self { out: Box::new(out) }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn report_failure(
        &mut self,
        expected: &dyn fmt::Display,
        actual: &dyn fmt::Display,
        require_eq: bool,
        metadata: &CheckMetadata<'_>,
        annotation: Option<&str>,
    ) {
        let failure = Failure {
            expected,
            actual,
            require_eq,
            metadata,
            annotation,
        };
        writeln!(self.out, "{failure}").ok();
        self.out.flush().ok();
    }

    pub fn report_summary(&mut self, summary: &Summary) {
        writeln!(self.out, "{summary}").ok();
        self.out.flush().ok();
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter").finish_non_exhaustive()
    }
}
