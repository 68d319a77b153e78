// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::io;
use std::process;

use chess_rules::console::Session;
use chess_rules::save;
use chess_rules::{Game, GameStatus};
use clap::{App, Arg, ArgMatches, SubCommand};

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("play")
                .about("Play a game at the console")
                .arg(
                    Arg::with_name("load")
                        .help("Save file to continue from")
                        .value_name("FILE")
                        .short("l")
                        .long("load")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("replay")
                .about("Replay a save file and print the final position")
                .arg(
                    Arg::with_name("FILE")
                        .help("Save file to replay")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("json")
                        .help("Print the position as JSON")
                        .long("json"),
                ),
        )
        .subcommand(
            SubCommand::with_name("status")
                .about("Report check and checkmate for a board position")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("json")
                        .help("Print the position as JSON")
                        .long("json"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("replay", Some(matches)) => run_replay(matches),
        ("status", Some(matches)) => run_status(matches),
        ("play", Some(matches)) => run_play(matches),
        _ => run_play(&ArgMatches::default()),
    }
}

fn run_play(matches: &ArgMatches) {
    let mut game = Game::new();
    if let Some(path) = matches.value_of("load") {
        if let Err(err) = save::load_from_file(&mut game, path) {
            eprintln!("can't load {}: {}", path, err);
        }
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(game);
    if let Err(err) = session.run(stdin.lock(), stdout.lock()) {
        eprintln!("console error: {}", err);
        process::exit(1);
    }
}

fn run_replay(matches: &ArgMatches) {
    let path = matches.value_of("FILE").unwrap();
    let mut game = Game::new();
    if let Err(err) = save::load_from_file(&mut game, path) {
        eprintln!("can't load {}: {}", path, err);
        process::exit(1);
    }

    print_game(&mut game, matches.is_present("json"));
}

fn run_status(matches: &ArgMatches) {
    let fen = matches.value_of("FEN").unwrap();
    let mut game = match Game::from_fen(fen) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("invalid fen: {}", err);
            process::exit(1);
        }
    };

    print_game(&mut game, matches.is_present("json"));
}

fn print_game(game: &mut Game, json: bool) {
    let status = game.evaluate();
    if json {
        match serde_json::to_string_pretty(&game.snapshot()) {
            Ok(text) => println!("{}", text),
            Err(err) => {
                eprintln!("could not serialize position: {}", err);
                process::exit(1);
            }
        }

        return;
    }

    print!("{}", game.board());
    println!("fen: {}", game.board().as_fen());
    match status {
        GameStatus::Checkmate { winner } => println!("checkmate, {} wins", winner.name()),
        GameStatus::Check(color) => println!("{} is in check", color.name()),
        GameStatus::Ongoing => println!("{} to move", game.side_to_move().name()),
    }
}
