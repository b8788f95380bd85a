use std::io;
use std::path::Path;

use rand::Rng;

use game::Square;

/// A single 16-byte record of a Polyglot `.bin` opening book. The learn field
/// is not used and dropped at load time.
struct BookEntry {
    key: u64,
    mv: u16,
    weight: u16,
}

/// A Polyglot opening book held in memory, sorted by position key.
///
/// The only contract with the rest of the engine is that the board's Zobrist
/// key matches the Polyglot hashing definition, which it does by construction.
pub struct OpeningBook {
    entries: Vec<BookEntry>,
}

impl OpeningBook {
    /// Reads a Polyglot book from disk; the records are big-endian.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let bytes = std::fs::read(path)?;

        let mut entries = Vec::with_capacity(bytes.len() / 16);
        for chunk in bytes.chunks_exact(16) {
            entries.push(BookEntry {
                key: u64::from_be_bytes(chunk[0..8].try_into().unwrap()),
                mv: u16::from_be_bytes(chunk[8..10].try_into().unwrap()),
                weight: u16::from_be_bytes(chunk[10..12].try_into().unwrap()),
            });
        }

        // Books are sorted on disk, but only after the byte swap is this
        // guaranteed to hold on every platform
        entries.sort_by_key(|entry| entry.key);

        Ok(Self { entries })
    }

    /// Returns a random move for the position key, weighted by the book's move
    /// weights, or `None` if the position is not in the book.
    pub fn pick_move(&self, key: u64) -> Option<String> {
        let start = self.entries.partition_point(|entry| entry.key < key);
        let matches: Vec<&BookEntry> = self.entries[start..]
            .iter()
            .take_while(|entry| entry.key == key)
            .collect();

        if matches.is_empty() {
            return None;
        }

        let total: u32 = matches.iter().map(|entry| entry.weight as u32).sum();
        let mut remaining = match total {
            0 => 0,
            _ => rand::thread_rng().gen_range(0..total),
        };

        for entry in &matches {
            let weight = entry.weight as u32;
            if remaining < weight {
                return Some(decode_move(entry.mv));
            }
            remaining -= weight;
        }

        Some(decode_move(matches[0].mv))
    }
}

/// Converts the Polyglot move encoding to UCI long algebraic notation.
///
/// Polyglot stores castling as king-takes-rook; those four moves are translated
/// to the king's two-step form the move generator produces. Should the pattern
/// ever describe a genuine rook-square move instead, the translated move simply
/// finds no legal match and the book probe is discarded by the caller.
fn decode_move(mv: u16) -> String {
    let from = Square(((mv >> 6) & 63) as u8);
    let to = Square((mv & 63) as u8);
    let promotion = (mv >> 12) & 7;

    match (from, to) {
        (Square::E1, Square::H1) => return "e1g1".to_string(),
        (Square::E1, Square::A1) => return "e1c1".to_string(),
        (Square::E8, Square::H8) => return "e8g8".to_string(),
        (Square::E8, Square::A8) => return "e8c8".to_string(),
        _ => (),
    }

    let mut uci_move = format!("{}{}", from, to);
    if promotion != 0 {
        uci_move.push(['n', 'b', 'r', 'q'][promotion as usize - 1]);
    }

    uci_move
}

#[cfg(test)]
mod tests {
    use super::decode_move;

    #[test]
    fn decodes_regular_moves() {
        // e2 = 12, e4 = 28
        assert_eq!(decode_move(12 << 6 | 28), "e2e4");
    }

    #[test]
    fn decodes_promotions() {
        // a7 = 48, a8 = 56, queen = 4
        assert_eq!(decode_move(4 << 12 | 48 << 6 | 56), "a7a8q");
    }

    #[test]
    fn translates_castling() {
        // e1 = 4, h1 = 7
        assert_eq!(decode_move(4 << 6 | 7), "e1g1");
        // e8 = 60, a8 = 56
        assert_eq!(decode_move(60 << 6 | 56), "e8c8");
    }
}
