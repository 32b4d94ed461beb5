//! CLI subcommands.

mod check;
mod list_rules;

use clap::Subcommand;

pub use check::CheckArgs;
pub use list_rules::ListRulesArgs;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze JavaScript/TypeScript files for convertible loops
    Check(CheckArgs),
    /// List the rules known to this build
    ListRules(ListRulesArgs),
}
