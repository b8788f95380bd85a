use game::{Board, Color};
use search::{TimeControl, DEFAULT_CACHE_SIZE, MAX_CACHE_SIZE, MIN_CACHE_SIZE};

use crate::engine::Engine;

/// Executes one line of the Universal Chess Interface protocol.
///
/// See [UCI](https://www.chessprogramming.org/UCI) for more information.
pub fn execute(engine: &mut Engine, command: String) {
    let tokens = command.split_whitespace().collect::<Vec<_>>();

    match tokens.as_slice() {
        ["uci"] => uci(),
        ["isready"] => println!("readyok"),

        ["stop"] => engine.stop(),
        ["ucinewgame"] => engine.reset(),

        ["setoption", tokens @ ..] => set_option(engine, tokens),
        ["position", tokens @ ..] => position(engine, tokens),
        ["go", tokens @ ..] => go(engine, tokens),

        ["quit"] => std::process::exit(0),

        // Non-UCI commands
        ["perft", depth] => perft(engine, depth),
        ["eval"] => engine.evaluate(),

        [] => (),
        _ => eprintln!("Unknown command: '{}'", command.trim_end()),
    }
}

fn uci() {
    println!("id name Cinder {}", env!("CARGO_PKG_VERSION"));
    println!("option name Hash type spin default {DEFAULT_CACHE_SIZE} min {MIN_CACHE_SIZE} max {MAX_CACHE_SIZE}");
    println!("option name ClearHash type button");
    println!("option name Book type string default book.bin");
    println!("uciok");
}

fn set_option(engine: &mut Engine, tokens: &[&str]) {
    match tokens {
        ["name", "Hash", "value", value] => match value.parse() {
            Ok(size) => engine.set_cache_size(size),
            Err(_) => eprintln!("Hash size should be a number"),
        },
        ["name", "Book", "value", path] => engine.load_book(path),
        ["name", "ClearHash"] => engine.clear_cache(),
        _ => eprintln!("Unknown option: '{}'", tokens.join(" ")),
    }
}

fn position(engine: &mut Engine, mut tokens: &[&str]) {
    loop {
        match tokens {
            ["startpos", rest @ ..] => {
                engine.board = Board::starting_position();
                tokens = rest;
            }
            ["fen", rest @ ..] if rest.len() >= 6 => {
                match Board::new(&rest[..6].join(" ")) {
                    Ok(board) => engine.board = board,
                    // A malformed position is rejected without touching the board
                    Err(error) => return eprintln!("Invalid position: {:?}", error),
                }
                tokens = &rest[6..];
            }
            ["moves", rest @ ..] => {
                for uci_move in rest {
                    engine.make_uci_move(uci_move);
                }
                break;
            }
            _ => break,
        }
    }
}

fn perft(engine: &mut Engine, depth: &str) {
    match depth.parse() {
        Ok(depth) => engine.perft(depth),
        Err(_) => eprintln!("Depth should be a number"),
    }
}

fn go(engine: &mut Engine, tokens: &[&str]) {
    let time_control = parse_time_control(engine.board.turn, tokens);
    engine.search(time_control);
}

fn parse_time_control(color: Color, tokens: &[&str]) -> TimeControl {
    if let ["infinite"] = tokens {
        return TimeControl::Infinite;
    }

    let mut main = 0;
    let mut inc = 0;
    let mut moves = None;

    for chunk in tokens.chunks(2) {
        if let [name, value] = *chunk {
            let Ok(value) = value.parse() else { continue };

            match name {
                "depth" => return TimeControl::FixedDepth(value as i32),
                "movetime" => return TimeControl::FixedTime(value),

                "wtime" if Color::White == color => main = value,
                "btime" if Color::Black == color => main = value,

                "winc" if Color::White == color => inc = value,
                "binc" if Color::Black == color => inc = value,

                "movestogo" => moves = Some(value),

                _ => continue,
            }
        }
    }

    if main == 0 && inc == 0 {
        return TimeControl::Infinite;
    }

    match moves {
        Some(moves) => TimeControl::Tournament(main, inc, moves),
        None => TimeControl::Incremental(main, inc),
    }
}
