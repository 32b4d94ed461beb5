//! List-rules command - prints the rules known to this build.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use loupe_core::rules::RuleRegistry;

#[derive(Args, Debug)]
pub struct ListRulesArgs {}

impl ListRulesArgs {
    pub fn run(&self) -> Result<()> {
        let registry = RuleRegistry::with_default_rules();

        for rule in registry.rules() {
            let metadata = rule.metadata();
            println!(
                "{} {}\n    {}",
                metadata.id.bold(),
                metadata.name.cyan(),
                metadata.description
            );
        }
        println!("\n{} rule(s) available", registry.len());

        Ok(())
    }
}
