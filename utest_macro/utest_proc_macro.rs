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

//! `#[utest::test]`: registers a function as a utest case at program startup.
//!
//! ```ignore
//! #[utest::test]
//! fn parses_header(cx: &mut utest::Context) -> utest::Result<()> { .. }
//!
//! #[utest::test(disabled)]
//! fn flaky_on_ci(cx: &mut utest::Context) -> utest::Result<()> { .. }
//!
//! // `Strings` implements `Default`; the case is named "Strings/compares".
//! #[utest::test(fixture = Strings)]
//! fn compares(cx: &mut utest::Context, strings: &mut Strings) -> utest::Result<()> { .. }
//! ```

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{ItemFn, Path, parse_macro_input};

#[derive(Default)]
struct TestArgs {
    disabled: bool,
    fixture: Option<Path>,
}

#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut args = TestArgs::default();
    let args_parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("disabled") {
            args.disabled = true;
            Ok(())
        } else if meta.path.is_ident("fixture") {
            args.fixture = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("expected `disabled` or `fixture = Type`"))
        }
    });
    parse_macro_input!(attr with args_parser);

    let item: ItemFn = parse_macro_input!(item as ItemFn);
    let fn_ident = item.sig.ident.clone();
    let fn_name = item.sig.ident.to_string();
    let enabled = !args.disabled;

    let ctor_fn_ident = format_ident!("__utest_ctor_fn_{}__", fn_name);
    let ctor_ident = format_ident!("__UTEST_CTOR_{}__", fn_name.to_uppercase());
    let desc_ident = format_ident!("__UTEST_DESC_{}__", fn_name.to_uppercase());

    let (test_name, body_fn, body_ident) = match &args.fixture {
        None => (fn_name, quote! {}, fn_ident.clone()),
        Some(fixture) => {
            let fixture_name = quote!(#fixture).to_string().replace(' ', "");
            let body_ident = format_ident!("__utest_fixture_body_{}__", fn_name);
            let body_fn = quote! {
                #[doc(hidden)]
                fn #body_ident(cx: &mut ::utest::Context) -> ::utest::Result<()> {
                    let mut fixture = <#fixture as ::core::default::Default>::default();
                    #fn_ident(cx, &mut fixture)
                }
            };
            (format!("{fixture_name}/{fn_name}"), body_fn, body_ident)
        }
    };

    quote! {
        #item

        #body_fn

        #[doc(hidden)]
        static #desc_ident: ::utest::StaticTest =
            ::utest::StaticTest::new(#test_name, #enabled, #body_ident);

        #[doc(hidden)]
        extern "C" fn #ctor_fn_ident() -> usize {
            ::utest::register_static(&#desc_ident);
            0
        }

        #[doc(hidden)]
        #[used]
        #[cfg_attr(target_os = "linux", unsafe(link_section = ".init_array"))]
        #[cfg_attr(target_os = "none", unsafe(link_section = ".init_array"))]
        #[cfg_attr(target_vendor = "apple", unsafe(link_section = "__DATA,__mod_init_func"))]
        #[cfg_attr(windows, unsafe(link_section = ".CRT$XCU"))]
        static #ctor_ident: extern "C" fn() -> usize = #ctor_fn_ident;
    }
    .into()
}
