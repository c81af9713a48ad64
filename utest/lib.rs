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

//! # utest
//!
//! A small unit-test engine.  Test cases register themselves at program
//! startup through [`test`], a [`Session`] walks the resulting [`Registry`]
//! and every check evaluated inside a test body updates the pass/fail tally
//! held by the session's [`Context`].
//!
//! A failed check is reported and then returned as [`Abort`], which the
//! check macros propagate with `?`.  The remaining checks of that test case
//! are skipped and the runner moves on to the next test case.
//!
//! ```no_run
//! use utest::{check_eq, test, Context};
//!
//! #[test]
//! fn addition(cx: &mut Context) -> utest::Result<()> {
//!     check_eq!(cx, 4, 2 + 2);
//!     Ok(())
//! }
//!
//! fn main() -> anyhow::Result<std::process::ExitCode> {
//!     utest::main()
//! }
//! ```

use std::ffi::OsString;
use std::fmt;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;

mod check;
mod config;
mod context;
pub mod logging;
mod registry;
mod report;
mod runner;

pub use check::{
    CheckSite, IntoNullableStr, NullableStr, Nullable, Truthy, check_equal, check_false,
    check_null, check_str_equal, check_true,
};
pub use config::Config;
pub use context::Context;
pub use registry::{Registry, StaticTest, StaticTestFn, TestBody, TestCase, register_static};
pub use report::{CheckMetadata, Failure, Reporter};
pub use runner::{ExitStatus, Session, Summary};
pub use utest_macro::test;

/// Returned by a failed check.  The failure has already been counted and
/// reported by the time a caller sees this value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Abort;

impl fmt::Display for Abort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("check failed, test case aborted")
    }
}

impl std::error::Error for Abort {}

pub type Result<T> = core::result::Result<T, Abort>;

/// Builds a session over every statically registered test case from a set of
/// command line arguments.  The first argument is the program name.
pub fn init<I, T>(args: I) -> anyhow::Result<Session>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let config = Config::try_parse_from(args).context("Failed to parse test arguments")?;
    Ok(Session::from_registered(&config))
}

/// Entry point for test binaries: parses the process arguments, runs every
/// registered test case and converts the outcome into a process exit code.
pub fn main() -> anyhow::Result<ExitCode> {
    logging::init()?;
    let mut session = init(std::env::args_os())?;
    Ok(session.run_all().into())
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check_site {
    ($expression:expr) => {
        $crate::CheckSite::new(file!(), line!(), $expression)
    };
}

#[macro_export]
macro_rules! check_true {
    ($cx:expr, $value:expr $(,)?) => {{
        $crate::check_true(
            $cx,
            &$value,
            $crate::__check_site!(concat!("check_true!(", stringify!($value), ")")),
        )?
    }};
    ($cx:expr, $value:expr, $($annotation:tt)+) => {{
        let __cx: &mut $crate::Context = $cx;
        __cx.annotate(format!($($annotation)+));
        $crate::check_true!(__cx, $value)
    }};
}

#[macro_export]
macro_rules! check_false {
    ($cx:expr, $value:expr $(,)?) => {{
        $crate::check_false(
            $cx,
            &$value,
            $crate::__check_site!(concat!("check_false!(", stringify!($value), ")")),
        )?
    }};
    ($cx:expr, $value:expr, $($annotation:tt)+) => {{
        let __cx: &mut $crate::Context = $cx;
        __cx.annotate(format!($($annotation)+));
        $crate::check_false!(__cx, $value)
    }};
}

#[macro_export]
macro_rules! check_eq {
    ($cx:expr, $expected:expr, $actual:expr $(,)?) => {{
        $crate::check_equal(
            $cx,
            &$expected,
            &$actual,
            true,
            $crate::__check_site!(concat!(
                "check_eq!(",
                stringify!($expected),
                ", ",
                stringify!($actual),
                ")"
            )),
        )?
    }};
    ($cx:expr, $expected:expr, $actual:expr, $($annotation:tt)+) => {{
        let __cx: &mut $crate::Context = $cx;
        __cx.annotate(format!($($annotation)+));
        $crate::check_eq!(__cx, $expected, $actual)
    }};
}

#[macro_export]
macro_rules! check_ne {
    ($cx:expr, $expected:expr, $actual:expr $(,)?) => {{
        $crate::check_equal(
            $cx,
            &$expected,
            &$actual,
            false,
            $crate::__check_site!(concat!(
                "check_ne!(",
                stringify!($expected),
                ", ",
                stringify!($actual),
                ")"
            )),
        )?
    }};
    ($cx:expr, $expected:expr, $actual:expr, $($annotation:tt)+) => {{
        let __cx: &mut $crate::Context = $cx;
        __cx.annotate(format!($($annotation)+));
        $crate::check_ne!(__cx, $expected, $actual)
    }};
}

/// NULL-safe string equality.  Both sides may be anything implementing
/// [`IntoNullableStr`]; a NULL string only equals another NULL string.
#[macro_export]
macro_rules! check_str_eq {
    ($cx:expr, $expected:expr, $actual:expr $(,)?) => {{
        $crate::check_str_equal(
            $cx,
            $expected,
            $actual,
            true,
            $crate::__check_site!(concat!(
                "check_str_eq!(",
                stringify!($expected),
                ", ",
                stringify!($actual),
                ")"
            )),
        )?
    }};
    ($cx:expr, $expected:expr, $actual:expr, $($annotation:tt)+) => {{
        let __cx: &mut $crate::Context = $cx;
        __cx.annotate(format!($($annotation)+));
        $crate::check_str_eq!(__cx, $expected, $actual)
    }};
}

#[macro_export]
macro_rules! check_str_ne {
    ($cx:expr, $expected:expr, $actual:expr $(,)?) => {{
        $crate::check_str_equal(
            $cx,
            $expected,
            $actual,
            false,
            $crate::__check_site!(concat!(
                "check_str_ne!(",
                stringify!($expected),
                ", ",
                stringify!($actual),
                ")"
            )),
        )?
    }};
    ($cx:expr, $expected:expr, $actual:expr, $($annotation:tt)+) => {{
        let __cx: &mut $crate::Context = $cx;
        __cx.annotate(format!($($annotation)+));
        $crate::check_str_ne!(__cx, $expected, $actual)
    }};
}

#[macro_export]
macro_rules! check_null {
    ($cx:expr, $value:expr $(,)?) => {{
        $crate::check_null(
            $cx,
            &$value,
            $crate::__check_site!(concat!("check_null!(", stringify!($value), ")")),
        )?
    }};
    ($cx:expr, $value:expr, $($annotation:tt)+) => {{
        let __cx: &mut $crate::Context = $cx;
        __cx.annotate(format!($($annotation)+));
        $crate::check_null!(__cx, $value)
    }};
}
