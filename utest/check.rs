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

//! Check evaluation.
//!
//! Every check either records a pass or records, reports and returns a
//! failure.  Callers are expected to propagate the returned [`Abort`] with `?`
//! so that no further checks of the failing test case are evaluated.

use std::ffi::{CStr, CString};
use std::fmt;

use libc::c_char;
use tracing::trace;

use crate::report::CheckMetadata;
use crate::{Abort, Context, Result};

/// Where a check was written, captured by the check macros.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CheckSite {
    pub file: &'static str,
    pub line: u32,
    pub expression: &'static str,
}

impl CheckSite {
    pub const fn new(file: &'static str, line: u32, expression: &'static str) -> Self {
        Self {
            file,
            line,
            expression,
        }
    }
}

fn trace_check(cx: &Context, site: &CheckSite) {
    trace!(
        test = cx.current_test.as_str(),
        file = site.file,
        line = site.line,
        expression = site.expression,
        "check"
    );
}

fn pass(cx: &mut Context, site: &CheckSite) -> Result<()> {
    trace_check(cx, site);
    // An annotation only ever applies to the check that follows it.
    cx.pending_annotation = None;
    cx.results.increase_passed();
    Ok(())
}

fn fail(
    cx: &mut Context,
    expected: &dyn fmt::Display,
    actual: &dyn fmt::Display,
    require_eq: bool,
    site: &CheckSite,
) -> Result<()> {
    trace_check(cx, site);
    let annotation = cx.pending_annotation.take();
    let metadata = CheckMetadata {
        test_name: &cx.current_test,
        site,
    };
    cx.reporter
        .report_failure(expected, actual, require_eq, &metadata, annotation.as_deref());
    cx.results.increase_failed();
    Err(Abort)
}

/// Value truthiness as understood by [`check_true`] and [`check_false`].
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! impl_truthy_nonzero {
    ($($ty:ty),*) => {
        $(
            impl Truthy for $ty {
                fn is_truthy(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

impl_truthy_nonzero!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0
    }
}

impl Truthy for char {
    fn is_truthy(&self) -> bool {
        *self != '\0'
    }
}

impl<T> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.is_some()
    }
}

impl<T: ?Sized> Truthy for *const T {
    fn is_truthy(&self) -> bool {
        !(*self).is_null()
    }
}

impl<T: ?Sized> Truthy for *mut T {
    fn is_truthy(&self) -> bool {
        !(*self).is_null()
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Truthy for [T] {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthy + ?Sized> Truthy for &mut T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

/// Passes when `value` is truthy.
pub fn check_true<T: Truthy + ?Sized>(cx: &mut Context, value: &T, site: CheckSite) -> Result<()> {
    if value.is_truthy() {
        pass(cx, &site)
    } else {
        fail(cx, &"true", &"false", true, &site)
    }
}

/// Passes when `value` is falsy.
pub fn check_false<T: Truthy + ?Sized>(
    cx: &mut Context,
    value: &T,
    site: CheckSite,
) -> Result<()> {
    if value.is_truthy() {
        fail(cx, &"false", &"true", true, &site)
    } else {
        pass(cx, &site)
    }
}

/// Compares `expected` and `actual` through their `PartialEq` impl for the
/// pair.  With `require_eq` false the check passes only when they differ.
pub fn check_equal<E, A>(
    cx: &mut Context,
    expected: &E,
    actual: &A,
    require_eq: bool,
    site: CheckSite,
) -> Result<()>
where
    E: PartialEq<A> + fmt::Display + ?Sized,
    A: fmt::Display + ?Sized,
{
    if expected.eq(actual) == require_eq {
        pass(cx, &site)
    } else {
        fail(cx, &expected, &actual, require_eq, &site)
    }
}

/// A string that may be NULL.  Two NULL strings are equal to each other and to
/// nothing else; two present strings are equal when their bytes are.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NullableStr<'a>(Option<&'a [u8]>);

impl<'a> NullableStr<'a> {
    pub const NULL: NullableStr<'static> = NullableStr(None);

    pub const fn new(bytes: Option<&'a [u8]>) -> Self {
        Self(bytes)
    }

    /// Reads a nul-terminated C string.  A null pointer yields
    /// [`NullableStr::NULL`].
    ///
    /// # Safety
    ///
    /// - `ptr` must be null or point to a valid nul-terminated string.
    /// - The string must not be mutated or freed for the lifetime `'a`.
    pub unsafe fn from_ptr(ptr: *const c_char) -> Self {
        if ptr.is_null() {
            Self(None)
        } else {
            // Safety: non-null and nul-terminated per this function's contract.
            Self(Some(unsafe { CStr::from_ptr(ptr) }.to_bytes()))
        }
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        self.0
    }
}

impl fmt::Display for NullableStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("NULL"),
            Some(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
        }
    }
}

/// Conversion into the operand type of [`check_str_equal`].
pub trait IntoNullableStr<'a> {
    fn into_nullable_str(self) -> NullableStr<'a>;
}

impl<'a> IntoNullableStr<'a> for NullableStr<'a> {
    fn into_nullable_str(self) -> NullableStr<'a> {
        self
    }
}

impl<'a> IntoNullableStr<'a> for &'a str {
    fn into_nullable_str(self) -> NullableStr<'a> {
        NullableStr(Some(self.as_bytes()))
    }
}

impl<'a> IntoNullableStr<'a> for &'a String {
    fn into_nullable_str(self) -> NullableStr<'a> {
        NullableStr(Some(self.as_bytes()))
    }
}

impl<'a> IntoNullableStr<'a> for &'a CStr {
    fn into_nullable_str(self) -> NullableStr<'a> {
        NullableStr(Some(self.to_bytes()))
    }
}

impl<'a> IntoNullableStr<'a> for &'a CString {
    fn into_nullable_str(self) -> NullableStr<'a> {
        NullableStr(Some(self.to_bytes()))
    }
}

impl<'a> IntoNullableStr<'a> for &'a [u8] {
    fn into_nullable_str(self) -> NullableStr<'a> {
        NullableStr(Some(self))
    }
}

impl<'a, T: IntoNullableStr<'a>> IntoNullableStr<'a> for Option<T> {
    fn into_nullable_str(self) -> NullableStr<'a> {
        self.map_or(NullableStr(None), IntoNullableStr::into_nullable_str)
    }
}

/// NULL-safe string comparison.
///
/// | expected | actual   | `require_eq` | `!require_eq`   |
/// |----------|----------|--------------|-----------------|
/// | NULL     | NULL     | pass         | fail            |
/// | NULL     | present  | fail         | pass            |
/// | present  | NULL     | fail         | pass            |
/// | present  | present  | bytes equal  | bytes differ    |
pub fn check_str_equal<'a, 'b, E, A>(
    cx: &mut Context,
    expected: E,
    actual: A,
    require_eq: bool,
    site: CheckSite,
) -> Result<()>
where
    E: IntoNullableStr<'a>,
    A: IntoNullableStr<'b>,
{
    let expected = expected.into_nullable_str();
    let actual = actual.into_nullable_str();
    if (expected.as_bytes() == actual.as_bytes()) == require_eq {
        pass(cx, &site)
    } else {
        fail(cx, &expected, &actual, require_eq, &site)
    }
}

/// Anything that has a NULL state.
pub trait Nullable {
    fn is_null(&self) -> bool;

    /// Rendering used in the failure report when the value is not NULL.
    fn describe(&self) -> String;
}

impl<T: ?Sized> Nullable for *const T {
    fn is_null(&self) -> bool {
        <*const T>::is_null(*self)
    }

    fn describe(&self) -> String {
        format!("{:p}", *self)
    }
}

impl<T: ?Sized> Nullable for *mut T {
    fn is_null(&self) -> bool {
        <*mut T>::is_null(*self)
    }

    fn describe(&self) -> String {
        format!("{:p}", *self)
    }
}

impl<T: fmt::Debug> Nullable for Option<T> {
    fn is_null(&self) -> bool {
        self.is_none()
    }

    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

impl Nullable for NullableStr<'_> {
    fn is_null(&self) -> bool {
        NullableStr::is_null(self)
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

/// Passes when `value` is NULL.
pub fn check_null<N: Nullable + ?Sized>(cx: &mut Context, value: &N, site: CheckSite) -> Result<()> {
    if value.is_null() {
        pass(cx, &site)
    } else {
        fail(cx, &"NULL", &value.describe(), true, &site)
    }
}
