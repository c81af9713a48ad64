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

//! Log output for test runs.
//!
//! Per-test progress goes through `tracing` to stderr, leaving stdout to the
//! failure reports and the summary line.  Set `UTEST_LOG` (an `EnvFilter`
//! directive such as `trace` or `utest=debug`) to change verbosity; `trace`
//! logs every check evaluated.

use std::sync::Once;

use anyhow::Result;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "UTEST_LOG";

const DEFAULT_FILTER: &str = "info";

static GLOBAL_INIT: Once = Once::new();

/// Installs the global subscriber.  Only the first call has any effect, and
/// a subscriber the host program already installed is left in place.
pub fn init() -> Result<()> {
    let mut result = Ok(());
    GLOBAL_INIT.call_once(|| result = install());
    result
}

fn install() -> Result<()> {
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(DEFAULT_FILTER)?,
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if let Err(e) = installed {
        debug!("Keeping existing log subscriber: {e}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init().unwrap();
        init().unwrap();
    }

    #[test]
    fn install_keeps_foreign_subscriber() {
        // Fails harmlessly if another test in this binary installed one first.
        let _ = tracing::subscriber::set_global_default(
            tracing::subscriber::NoSubscriber::default(),
        );
        assert!(tracing::dispatcher::has_been_set());
        install().unwrap();
        init().unwrap();
    }
}
