use std::{env, fs::File, io::Write, path::Path};

mod attacks;
mod magics;
mod maps;
mod zobrist;

macro_rules! write_map {
    ($f:ident, $name:tt, $items:expr) => {
        let items = $items;
        writeln!($f, "pub static {}: [u64; {}] = [", $name, items.len()).unwrap();
        for item in items {
            write!($f, "{},", item).unwrap();
        }
        writeln!($f, "];").unwrap();
    };
}

fn main() {
    let dir = env::var("OUT_DIR").unwrap();

    write_lookup(&mut create(&dir, "lookup.rs"));
    write_zobrist(&mut create(&dir, "zobrist.rs"));
}

fn create(dir: &str, name: &str) -> File {
    File::create(Path::new(dir).join(name)).unwrap()
}

fn write_lookup(f: &mut File) {
    write_map!(f, "KING_MAP", maps::generate_king_map());
    write_map!(f, "KNIGHT_MAP", maps::generate_knight_map());
    write_map!(f, "PAWN_MAP", maps::generate_pawn_map());

    write_map!(f, "BETWEEN", maps::generate_between_map());
    write_map!(f, "RAYS", maps::generate_rays_map());

    write_map!(f, "FILES", maps::generate_file_masks());
    write_map!(f, "ADJACENT_FILES", maps::generate_adjacent_file_masks());
    write_map!(f, "PASSED_PAWN_MASKS", maps::generate_passed_pawn_masks());

    let (rook_magics, rook_size) = magics::rook_magics();
    let (bishop_magics, bishop_size) = magics::bishop_magics();

    write_map!(f, "ROOK_MAP", maps::generate_rook_map(&rook_magics, rook_size));
    write_map!(f, "BISHOP_MAP", maps::generate_bishop_map(&bishop_magics, bishop_size));

    write_magics(f, "ROOK_MAGICS", &rook_magics);
    write_magics(f, "BISHOP_MAGICS", &bishop_magics);

    writeln!(
        f,
        "pub struct MagicEntry {{ pub mask: u64, pub magic: u64, pub shift: u32, pub offset: u32 }}"
    )
    .unwrap();
}

fn write_magics(f: &mut File, name: &str, entries: &[magics::MagicEntry]) {
    writeln!(f, "pub static {}: [MagicEntry; {}] = [", name, entries.len()).unwrap();
    for entry in entries {
        write!(f, "{},", entry).unwrap();
    }
    writeln!(f, "];").unwrap();
}

/// Partitions the fixed Polyglot random numbers into the key tables used for hashing.
///
/// The Polyglot piece order interleaves colors as `2 * piece + (1 for white)`,
/// followed by four castling keys, eight en passant file keys and the turn key.
fn write_zobrist(f: &mut File) {
    writeln!(f, "pub static PIECE_KEYS: [[[u64; 64]; 6]; 2] = [").unwrap();
    for color in 0..2 {
        writeln!(f, "[").unwrap();
        for piece in 0..6 {
            let kind = 2 * piece + (1 - color);
            write!(f, "[").unwrap();
            for square in 0..64 {
                write!(f, "{},", zobrist::RANDOM[64 * kind + square]).unwrap();
            }
            writeln!(f, "],").unwrap();
        }
        writeln!(f, "],").unwrap();
    }
    writeln!(f, "];").unwrap();

    write_map!(f, "CASTLING_KEYS", &zobrist::RANDOM[768..772]);
    write_map!(f, "EN_PASSANT_KEYS", &zobrist::RANDOM[772..780]);

    writeln!(f, "pub static SIDE_KEY: u64 = {};", zobrist::RANDOM[780]).unwrap();
}
