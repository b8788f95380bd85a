mod book;
mod engine;
mod perft;
mod uci;

use engine::Engine;

fn main() {
    let mut engine = Engine::new();

    loop {
        let mut buffer = String::new();
        if std::io::stdin().read_line(&mut buffer).unwrap_or(0) == 0 {
            break;
        }

        uci::execute(&mut engine, buffer);
    }
}
