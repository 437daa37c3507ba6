// Dweve lhstat - Lighthouse Report Statistics
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shell completion generation

use crate::error::CliError;
use clap::Command;
use clap_complete::{generate, Generator};
use std::io;

/// Write the completion script for `cmd` to stdout.
pub fn generate_completion_for_command<G: Generator>(
    generator: G,
    cmd: &mut Command,
) -> Result<(), CliError> {
    let name = cmd.get_name().to_string();
    generate(generator, cmd, name, &mut io::stdout());
    Ok(())
}

/// Installation instructions for a shell (case-insensitive).
///
/// ```
/// use lhstat_cli::commands::print_installation_instructions;
///
/// assert!(print_installation_instructions("zsh").contains("_lhstat"));
/// assert_eq!(print_installation_instructions("tcsh"), "Unsupported shell");
/// ```
pub fn print_installation_instructions(shell: &str) -> String {
    match shell.to_lowercase().as_str() {
        "bash" => {
            r#"# Bash: load for the current session
eval "$(lhstat completion bash)"

# or install for every session
lhstat completion bash > ~/.local/share/bash-completion/completions/lhstat
"#
        }
        "zsh" => {
            r#"# Zsh: load for the current session
eval "$(lhstat completion zsh)"

# or install into a directory on $fpath
lhstat completion zsh > ~/.zsh/completions/_lhstat
"#
        }
        "fish" => {
            r#"# Fish: picked up by new sessions
lhstat completion fish > ~/.config/fish/completions/lhstat.fish
"#
        }
        "powershell" | "pwsh" => {
            r#"# PowerShell: add this line to the file named by $PROFILE
lhstat completion powershell | Out-String | Invoke-Expression
"#
        }
        "elvish" => {
            r#"# Elvish: add this line to ~/.elvish/rc.elv
eval (lhstat completion elvish)
"#
        }
        _ => "Unsupported shell",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions_mention_shell() {
        for shell in ["bash", "zsh", "fish", "elvish"] {
            assert!(print_installation_instructions(shell).contains(shell));
        }
        assert!(print_installation_instructions("pwsh").contains("PowerShell"));
    }

    #[test]
    fn test_instructions_case_insensitive() {
        assert_eq!(
            print_installation_instructions("BASH"),
            print_installation_instructions("bash")
        );
    }
}
