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

use clap::Parser;

/// Test runner options.
#[derive(Clone, Debug, Default, Parser)]
#[command(about = "Runs every registered test case and reports failed checks")]
pub struct Config {
    /// Also run test cases declared as disabled.
    #[arg(long)]
    pub include_disabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Config::command().debug_assert();
    }

    #[test]
    fn disabled_tests_are_excluded_by_default() {
        let config = Config::try_parse_from(["runner"]).unwrap();
        assert!(!config.include_disabled);
    }

    #[test]
    fn include_disabled_flag() {
        let config = Config::try_parse_from(["runner", "--include-disabled"]).unwrap();
        assert!(config.include_disabled);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Config::try_parse_from(["runner", "--shard", "2"]).is_err());
    }
}
