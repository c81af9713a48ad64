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

use std::cell::RefCell;
use std::ffi::CString;
use std::io::{self, Write};
use std::rc::Rc;

use pretty_assertions::assert_eq;
use utest::{
    Config, Context, NullableStr, Registry, Reporter, Session, Summary, TestCase, check_eq,
    check_false, check_ne, check_null, check_str_eq, check_str_ne, check_true,
};

#[derive(Clone, Default)]
struct Capture(Rc<RefCell<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `body` as the only test case and returns the tally and the first
/// failure headline, if any.
fn run_single<F>(body: F) -> (Summary, Option<String>)
where
    F: Fn(&mut Context) -> utest::Result<()> + 'static,
{
    let capture = Capture::default();
    let mut registry = Registry::new();
    registry.register(TestCase::new("case", body));
    let mut session = Session::with_registry(registry, &Config::default())
        .with_reporter(Reporter::new(capture.clone()));
    session.run_tests();

    let text = String::from_utf8_lossy(&capture.0.borrow()).into_owned();
    let headline = text
        .lines()
        .next()
        .map(|line| line.split_once(" : ").map_or(line, |(_, rest)| rest).to_string());
    (session.summary(), headline)
}

const PASS: Summary = Summary {
    passed: 1,
    failed: 0,
};
const FAIL: Summary = Summary {
    passed: 0,
    failed: 1,
};

#[test]
fn null_strings_are_equal() {
    let (summary, _) = run_single(|cx| {
        check_str_eq!(cx, NullableStr::NULL, None::<&str>);
        Ok(())
    });
    assert_eq!(summary, PASS);
}

#[test]
fn null_strings_are_not_unequal() {
    let (summary, headline) = run_single(|cx| {
        check_str_ne!(cx, NullableStr::NULL, NullableStr::NULL);
        Ok(())
    });
    assert_eq!(summary, FAIL);
    assert_eq!(
        headline.as_deref(),
        Some("error: Failure in *case* : Expected NOT \"NULL\" but was \"NULL\"")
    );
}

#[test]
fn null_expected_against_present_actual() {
    let (summary, headline) = run_single(|cx| {
        check_str_eq!(cx, None::<&str>, "abc");
        Ok(())
    });
    assert_eq!(summary, FAIL);
    assert_eq!(
        headline.as_deref(),
        Some("error: Failure in *case* : Expected \"NULL\" but was \"abc\"")
    );

    let (summary, _) = run_single(|cx| {
        check_str_ne!(cx, None::<&str>, "abc");
        Ok(())
    });
    assert_eq!(summary, PASS);
}

#[test]
fn present_expected_against_null_actual() {
    let (summary, headline) = run_single(|cx| {
        check_str_eq!(cx, "abc", NullableStr::NULL);
        Ok(())
    });
    assert_eq!(summary, FAIL);
    assert_eq!(
        headline.as_deref(),
        Some("error: Failure in *case* : Expected \"abc\" but was \"NULL\"")
    );

    let (summary, _) = run_single(|cx| {
        check_str_ne!(cx, "abc", NullableStr::NULL);
        Ok(())
    });
    assert_eq!(summary, PASS);
}

#[test]
fn present_strings_compare_bytes() {
    let (summary, _) = run_single(|cx| {
        let owned = String::from("abc");
        check_str_eq!(cx, c"abc", &owned);
        Ok(())
    });
    assert_eq!(summary, PASS);

    let (summary, _) = run_single(|cx| {
        check_str_eq!(cx, "abc", "abd");
        Ok(())
    });
    assert_eq!(summary, FAIL);

    let (summary, _) = run_single(|cx| {
        check_str_ne!(cx, "abc", "abd");
        Ok(())
    });
    assert_eq!(summary, PASS);

    let (summary, _) = run_single(|cx| {
        check_str_ne!(cx, "abc", c"abc");
        Ok(())
    });
    assert_eq!(summary, FAIL);
}

#[test]
fn raw_c_string_pointers() {
    let (summary, _) = run_single(|cx| {
        let owned = CString::new("utest").unwrap();
        let present = unsafe { NullableStr::from_ptr(owned.as_ptr()) };
        let null = unsafe { NullableStr::from_ptr(std::ptr::null()) };
        check_str_eq!(cx, present, "utest");
        check_str_ne!(cx, present, null);
        check_str_eq!(cx, null, None::<&str>);
        Ok(())
    });
    assert_eq!(summary, Summary { passed: 3, failed: 0 });
}

#[test]
fn check_null_on_pointers_and_options() {
    let (summary, _) = run_single(|cx| {
        check_null!(cx, std::ptr::null::<u8>());
        check_null!(cx, std::ptr::null_mut::<u8>());
        check_null!(cx, None::<u32>);
        Ok(())
    });
    assert_eq!(summary, Summary { passed: 3, failed: 0 });

    let (summary, headline) = run_single(|cx| {
        check_null!(cx, Some(5));
        Ok(())
    });
    assert_eq!(summary, FAIL);
    assert_eq!(
        headline.as_deref(),
        Some("error: Failure in *case* : Expected \"NULL\" but was \"Some(5)\"")
    );
}

#[test]
fn check_true_and_false_report_literals() {
    let (summary, headline) = run_single(|cx| {
        check_true!(cx, Vec::<u8>::new());
        Ok(())
    });
    assert_eq!(summary, FAIL);
    assert_eq!(
        headline.as_deref(),
        Some("error: Failure in *case* : Expected \"true\" but was \"false\"")
    );

    let (summary, headline) = run_single(|cx| {
        check_false!(cx, "not empty");
        Ok(())
    });
    assert_eq!(summary, FAIL);
    assert_eq!(
        headline.as_deref(),
        Some("error: Failure in *case* : Expected \"false\" but was \"true\"")
    );

    let (summary, _) = run_single(|cx| {
        check_true!(cx, -1i32);
        check_false!(cx, 0.0f64);
        check_false!(cx, None::<()>);
        check_true!(cx, &[1, 2][..]);
        Ok(())
    });
    assert_eq!(summary, Summary { passed: 4, failed: 0 });
}

#[test]
fn not_equal_is_worded_as_expected_not() {
    let (summary, headline) = run_single(|cx| {
        check_ne!(cx, 3, 1 + 2);
        Ok(())
    });
    assert_eq!(summary, FAIL);
    assert_eq!(
        headline.as_deref(),
        Some("error: Failure in *case* : Expected NOT \"3\" but was \"3\"")
    );

    let (summary, _) = run_single(|cx| {
        check_ne!(cx, "left", "right");
        Ok(())
    });
    assert_eq!(summary, PASS);
}

#[test]
fn equality_across_type_pairs() {
    let (summary, _) = run_single(|cx| {
        let owned = String::from("abc");
        check_eq!(cx, "abc", owned);
        check_eq!(cx, owned, "abc");
        check_eq!(cx, 'a', 'a');
        check_eq!(cx, 2.5f32, 2.5f32);
        Ok(())
    });
    assert_eq!(summary, Summary { passed: 4, failed: 0 });
}
