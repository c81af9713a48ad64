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
use std::sync::{Mutex, PoisonError};

use crate::{Context, Result};

/// The body of a test case.
pub trait TestBody {
    fn run(&self, cx: &mut Context) -> Result<()>;
}

impl<F> TestBody for F
where
    F: Fn(&mut Context) -> Result<()>,
{
    fn run(&self, cx: &mut Context) -> Result<()> {
        self(cx)
    }
}

pub struct TestCase {
    name: String,
    enabled: bool,
    body: Box<dyn TestBody>,
}

impl TestCase {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut Context) -> Result<()> + 'static,
    {
        Self::from_body(name, true, body)
    }

    /// A test case that only runs when disabled tests are included.
    pub fn disabled<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut Context) -> Result<()> + 'static,
    {
        Self::from_body(name, false, body)
    }

    pub fn from_body(name: impl Into<String>, enabled: bool, body: impl TestBody + 'static) -> Self {
        Self {
            name: name.into(),
            enabled,
            body: Box::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn run(&self, cx: &mut Context) -> Result<()> {
        self.body.run(cx)
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Append-only collection of test cases.  Iteration yields the most recently
/// registered test case first.
#[derive(Debug, Default)]
pub struct Registry {
    tests: Vec<TestCase>,
}

impl Registry {
    pub const fn new() -> Self {
        Self { tests: Vec::new() }
    }

    pub fn register(&mut self, test: TestCase) {
        self.tests.push(test);
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestCase> + '_ {
        self.tests.iter().rev()
    }

    /// Test case names in execution order.
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(TestCase::name).collect()
    }
}

pub type StaticTestFn = fn(&mut Context) -> Result<()>;

/// Descriptor emitted by `#[utest::test]` for a test declared at item level.
#[derive(Clone, Copy)]
pub struct StaticTest {
    name: &'static str,
    enabled: bool,
    test_fn: StaticTestFn,
}

impl StaticTest {
    pub const fn new(name: &'static str, enabled: bool, test_fn: StaticTestFn) -> Self {
        Self {
            name,
            enabled,
            test_fn,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }
}

impl fmt::Debug for StaticTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTest")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl From<&StaticTest> for TestCase {
    fn from(test: &StaticTest) -> Self {
        TestCase::from_body(test.name, test.enabled, test.test_fn)
    }
}

static STATIC_TESTS: Mutex<Vec<&'static StaticTest>> = Mutex::new(Vec::new());

// All accesses to the static test list go through this function.  A panic
// while the lock was held leaves the list itself intact, so poisoning is
// ignored.
fn access_static_tests<F, R>(callback: F) -> R
where
    F: FnOnce(&mut Vec<&'static StaticTest>) -> R,
{
    let mut tests = STATIC_TESTS.lock().unwrap_or_else(PoisonError::into_inner);
    callback(&mut tests)
}

/// Called from the startup constructor generated by `#[utest::test]`.
pub fn register_static(test: &'static StaticTest) {
    access_static_tests(|tests| tests.push(test));
}

/// Snapshot of every statically registered test case, in registration order.
pub(crate) fn registered() -> Registry {
    access_static_tests(|tests| {
        let mut registry = Registry::new();
        for test in tests.iter() {
            registry.register(TestCase::from(*test));
        }
        registry
    })
}
