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

use crate::runner::Summary;
use crate::{Config, Reporter};

/// Per-session run state threaded into every test body and check.
pub struct Context {
    pub(crate) include_disabled: bool,
    pub(crate) current_test: String,
    pub(crate) pending_annotation: Option<String>,
    pub(crate) results: Summary,
    pub(crate) reporter: Reporter,
}

impl Context {
    pub fn new(config: &Config, reporter: Reporter) -> Self {
        Self {
            include_disabled: config.include_disabled,
            current_test: String::new(),
            pending_annotation: None,
            results: Summary::default(),
            reporter,
        }
    }

    /// Name of the test case currently running.  Empty before the first one
    /// starts.
    pub fn test_name(&self) -> &str {
        &self.current_test
    }

    pub fn include_disabled(&self) -> bool {
        self.include_disabled
    }

    /// Attaches a message to the next check evaluated.  The message is
    /// consumed by that check whether it passes or fails.
    pub fn annotate(&mut self, annotation: impl Into<String>) {
        self.pending_annotation = Some(annotation.into());
    }

    /// Pass/fail counts of every check evaluated so far.
    pub fn results(&self) -> Summary {
        self.results
    }

    pub(crate) fn begin_test(&mut self, name: &str) {
        self.current_test.clear();
        self.current_test.push_str(name);
        self.pending_annotation = None;
    }
}
