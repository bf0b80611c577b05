//! Hotseat: chess for two players at one terminal.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]
#![warn(clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use clap::{App, Arg, SubCommand, crate_version};
use simplelog::{WriteLogger, LevelFilter, Config};
use chess::GameState;
use chess::game::Game;
use chess::variations;
use hotseat::config::{self, ConfigError};
use hotseat::session::Session;

fn main() -> Result<(), Error> {
    let matches =
        App::new("Hotseat")
            .version(crate_version!())
            .author("Mike Leany")
            .about("Chess for two players sharing one terminal.")
            .arg(Arg::with_name("config")
                .long("config")
                .short("c")
                .global(true)
                .value_name("CONFIG_FILE")
                .takes_value(true)
                .help("Reads settings from the given file instead of ~/.hotseat/config.yaml"))
            .arg(Arg::with_name("log")
                .long("log")
                .short("l")
                .global(true)
                .help("Turns on logging"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .global(true)
                .value_name("LOG_FILE")
                .takes_value(true)
                .help("Sets the log file if logging is turned on [default: hotseat.log]"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .takes_value(true)
                .possible_values(&["off", "error", "warn", "info", "debug", "trace"])
                .help("Sets the log level if logging is turned on [default: info]"))
            .arg(Arg::with_name("fen")
                .long("fen")
                .value_name("FEN_STRING")
                .takes_value(true)
                .help("Starts the game from a position in Forsyth-Edwards Notation (FEN)"))
            .subcommand(SubCommand::with_name("counts")
                .about("Counts the number of variations from a given starting position \
                        to a specified\ndepth. Defaults to the standard starting position.")
                .arg(Arg::with_name("depth")
                    .long("depth")
                    .short("d")
                    .value_name("DEPTH")
                    .takes_value(true)
                    .required(true)
                    .help("Depth to search the position"))
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .default_value("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
                    .hide_default_value(true)
                    .multiple(true)
                    .help("Position to search in Forsyth-Edwards Notation (FEN)")))
            .get_matches();

    let mut settings = config::Config::load(matches.value_of_os("config").map(Path::new))?;
    if matches.is_present("log") {
        settings.log.enabled = true;
    }
    if let Some(log_file) = matches.value_of_os("log-file") {
        settings.log.file = PathBuf::from(log_file);
    }
    if let Some(log_level) = matches.value_of("log-level") {
        settings.log.level = log_level.to_owned();
    }

    let log_level = settings.log.level_filter()?;
    let log_file = &settings.log.file;
    let _logger = if settings.log.enabled {
        WriteLogger::init(
            log_level,
            Config::default(),
            File::create(log_file).map_err(|err| {
                Error(format!("{}: {}", log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, Config::default(), std::io::sink())
    };

    match matches.subcommand() {
        ("counts", Some(matches)) => {
            let depth = matches
                .value_of("depth")
                .expect("INFALLIBLE")
                .parse()
                .map_err(|_| {Error("depth must be numeric".to_owned())})?;

            println!();
            for fen in matches.values_of("fen").expect("INFALLIBLE") {
                let state: GameState = fen.parse().map_err(|err| {Error(format!("{}: {}", fen, err))})?;
                println!("{}", fen);
                let count = variations::print(&state, depth);
                println!("Depth {} total:\t{:12}\n", depth, count);
            }
        },
        _ => {
            let game = match matches.value_of("fen") {
                Some(fen) => {
                    let state: GameState = fen.parse().map_err(|err| {Error(format!("{}: {}", fen, err))})?;
                    Game::starting_at(state)
                },
                None => Game::new(),
            };

            let stdin = io::stdin();
            let stdout = io::stdout();
            Session::new(game, settings, stdin.lock(), stdout.lock()).run()?;
        },
    }

    Ok(())
}

struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Error { }

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error(err.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error(err.to_string())
    }
}
