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

//! Sample suite: a fixture comparing a C string with an owned string, a case
//! that fails on purpose, and a disabled case.
//!
//! `utest_demo` runs the enabled cases and exits with status 1.
//! `utest_demo --include-disabled` runs all three.

use std::ffi::CString;
use std::process::ExitCode;

use utest::{Context, check_eq, check_null, check_str_eq, check_true, test};

struct Strings {
    raw: CString,
    owned: String,
}

impl Default for Strings {
    fn default() -> Self {
        Self {
            raw: c"abc".to_owned(),
            owned: "abc".to_string(),
        }
    }
}

impl Strings {
    fn verify_lengths(&self, cx: &mut Context) -> utest::Result<()> {
        check_eq!(cx, self.raw.as_bytes().len(), self.owned.len());
        Ok(())
    }
}

#[test(fixture = Strings)]
fn string_assertions(cx: &mut Context, strings: &mut Strings) -> utest::Result<()> {
    check_str_eq!(cx, strings.raw.as_c_str(), strings.owned.as_str());
    strings.verify_lengths(cx)?;
    Ok(())
}

#[test]
fn sample_failure(cx: &mut Context) -> utest::Result<()> {
    check_eq!(cx, 1, 2, "one is not two");
    check_true!(cx, false);
    Ok(())
}

#[test(disabled)]
fn unfinished(cx: &mut Context) -> utest::Result<()> {
    let missing: Option<&str> = None;
    check_null!(cx, missing);
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    utest::main()
}
