// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown terminal game.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;
use log::info;

use showdown_core::{Config, ExchangePolicy};

pub mod terminal;

#[derive(Debug, Parser)]
struct Cli {
    /// Seed for dealing cards, random if not set.
    #[clap(long, short)]
    seed: Option<u64>,
    /// Reject exchanges with cards a player doesn't hold.
    #[clap(long)]
    strict: bool,
    /// The maximum number of cards a player can exchange.
    #[clap(long, short, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=5))]
    max_exchange: u8,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = Config {
        exchange_policy: if cli.strict {
            ExchangePolicy::Strict
        } else {
            ExchangePolicy::SkipUnmatched
        },
        max_exchange: usize::from(cli.max_exchange),
        seed: cli.seed,
    };

    info!("Starting game with {config:?}");
    terminal::run(config)
}
