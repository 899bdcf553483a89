// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Terminal I/O.
use anyhow::{Result, anyhow, bail};
use crossterm::{
    queue,
    style::{self, Stylize},
};
use std::{
    io::{self, BufRead, Write},
    sync::mpsc::{self, Receiver},
};

use showdown_core::{Card, Command, Config, Event, Standing, Table};

const HELP: &str = "\
Commands:
  add NAME               add a player
  remove NAME            remove a player
  draw on|off            play draw or stud
  deal                   deal five cards to each player
  exchange NAME [CARDS]  exchange cards, e.g. exchange alice A♠ 10H
  reveal                 show the winners
  restart                start over with the same players
  players                show players and hands
  help                   show this help
  quit                   exit the game";

/// A parsed input line.
#[derive(Debug, PartialEq)]
enum Input {
    Command(Command),
    Players,
    Help,
    Quit,
}

/// Runs the terminal loop until quit or end of input.
pub fn run(config: Config) -> Result<()> {
    let (events_tx, events_rx) = mpsc::channel();
    let mut table = Table::new(config, events_tx);

    let mut stdout = io::stdout();
    writeln!(stdout, "{HELP}")?;
    prompt(&mut stdout)?;

    for line in io::stdin().lock().lines() {
        match parse_line(&line?) {
            Ok(Some(Input::Command(cmd))) => {
                table.handle(cmd);
                print_events(&mut stdout, &events_rx)?;
            }
            Ok(Some(Input::Players)) => print_players(&mut stdout, &table)?,
            Ok(Some(Input::Help)) => writeln!(stdout, "{HELP}")?,
            Ok(Some(Input::Quit)) => break,
            Ok(None) => {}
            Err(e) => print_error(&mut stdout, &e.to_string())?,
        }

        prompt(&mut stdout)?;
    }

    Ok(())
}

fn parse_line(line: &str) -> Result<Option<Input>> {
    let mut words = line.split_whitespace();
    let Some(cmd) = words.next() else {
        return Ok(None);
    };

    let arg = words.next();
    let name = |cmd: &str| {
        arg.map(str::to_string)
            .ok_or_else(|| anyhow!("Usage: {cmd} NAME"))
    };

    let input = match cmd.to_lowercase().as_str() {
        "add" => Input::Command(Command::AddPlayer(name("add")?)),
        "remove" => Input::Command(Command::RemovePlayer(name("remove")?)),
        "draw" => match arg {
            Some("on") => Input::Command(Command::SetVariant(true)),
            Some("off") => Input::Command(Command::SetVariant(false)),
            _ => bail!("Usage: draw on|off"),
        },
        "deal" => Input::Command(Command::Deal),
        "exchange" => {
            let player = name("exchange")?;
            Input::Command(Command::Exchange {
                player,
                tokens: words.map(str::to_string).collect(),
            })
        }
        "reveal" => Input::Command(Command::RevealWinners),
        "restart" => Input::Command(Command::Restart),
        "players" => Input::Players,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        _ => bail!("Unknown command '{cmd}', type help for a list of commands"),
    };

    Ok(Some(input))
}

fn print_events(w: &mut impl Write, events_rx: &Receiver<Event>) -> Result<()> {
    for event in events_rx.try_iter() {
        match event {
            Event::PlayerAdded(name) => writeln!(w, "{name} joined")?,
            Event::PlayerRemoved(name) => writeln!(w, "{name} left")?,
            Event::VariantChanged { draw } => {
                writeln!(w, "Playing {}", if draw { "draw" } else { "stud" })?
            }
            Event::StateChanged(state) => {
                let text = format!("[{state}]");
                queue!(w, style::PrintStyledContent(text.as_str().dark_grey()))?;
                writeln!(w)?;
            }
            Event::HandRevealed {
                player,
                rank,
                cards,
            } => writeln!(w, "{player:<10.10} {:<16} {rank}", cards_text(&cards))?,
            Event::CardsExchanged {
                player,
                rank,
                cards,
                skipped,
            } => {
                writeln!(w, "{player:<10.10} {:<16} {rank}", cards_text(&cards))?;
                if !skipped.is_empty() {
                    print_error(w, &format!("Skipped {}", skipped.join(" ")))?;
                }
            }
            Event::WinnersDeclared { winners, losers } => {
                for standing in &winners {
                    let text = standing_text("WINNER", standing);
                    queue!(w, style::PrintStyledContent(text.as_str().dark_green()))?;
                    writeln!(w)?;
                }

                for standing in &losers {
                    writeln!(w, "{}", standing_text("", standing))?;
                }
            }
            Event::Error(msg) => print_error(w, &msg)?,
        }
    }

    w.flush()?;
    Ok(())
}

fn print_players(w: &mut impl Write, table: &Table) -> Result<()> {
    let session = table.session();
    writeln!(
        w,
        "{} game [{}], {} cards in the deck",
        if session.is_draw() { "Draw" } else { "Stud" },
        session.state(),
        session.deck_remaining()
    )?;

    for name in session.player_names() {
        match session.hand(&name)? {
            Some(hand) => writeln!(
                w,
                "{name:<10.10} {:<16} {}",
                cards_text(&hand.sorted_cards()),
                hand.rank()
            )?,
            None => writeln!(w, "{name:<10.10}")?,
        }
    }

    Ok(())
}

fn print_error(w: &mut impl Write, msg: &str) -> Result<()> {
    queue!(w, style::PrintStyledContent(msg.red()))?;
    writeln!(w)?;
    Ok(())
}

fn prompt(w: &mut impl Write) -> Result<()> {
    write!(w, "> ")?;
    w.flush()?;
    Ok(())
}

fn cards_text(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn standing_text(label: &str, standing: &Standing) -> String {
    format!(
        "{label:<6} {:<10.10} {:<16} {}",
        standing.name,
        cards_text(&standing.cards),
        standing.rank()
    )
}
