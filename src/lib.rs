//! Rare Candy library exports for testing

use clap::ValueEnum;

pub mod catalog;
pub mod cli;
pub mod core;

#[cfg(test)]
pub mod test_support;

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
