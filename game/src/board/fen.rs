use crate::core::{CastlingKind, Color, Piece, Square};

use super::Board;

#[derive(Debug)]
pub enum ParseFenError {
    InvalidEnPassant { text: String },
    InvalidNumberOfSections { length: usize },
    InvalidClock { text: String },
    UnexpectedTurnColor { color: String },
    UnexpectedPiece { piece: char },
    UnexpectedCastling { char: char },
    UnexpectedKingCount { color: Color },
}

/// Implements interaction with the Forsyth–Edwards notation which is a standard way for describing
/// a particular board position of a chess game.
///
/// See [Forsyth–Edwards notation](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation) for more information.
pub(super) struct Fen;

impl Fen {
    /// Returns the board corresponding to the specified Forsyth–Edwards notation.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given notation is not valid.
    pub fn parse(fen: &str) -> Result<Board, ParseFenError> {
        InnerFen::default().parse(fen)
    }
}

#[derive(Default)]
struct InnerFen {
    board: Board,
}

impl InnerFen {
    const SEPARATOR: char = '/';

    fn parse(mut self, fen: &str) -> Result<Board, ParseFenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 {
            return Err(ParseFenError::InvalidNumberOfSections {
                length: parts.len(),
            });
        }

        self.set_pieces(parts[0])?;
        self.set_turn(parts[1])?;
        self.set_castling(parts[2])?;
        self.set_en_passant(parts[3])?;
        self.set_clocks(parts[4], parts[5])?;

        for color in [Color::White, Color::Black] {
            if self.board.of(Piece::King, color).count() != 1 {
                return Err(ParseFenError::UnexpectedKingCount { color });
            }
        }

        self.board.hash = self.board.generate_hash_key();
        self.board.threats = self.board.compute_threats();

        Ok(self.board)
    }

    fn set_pieces(&mut self, text: &str) -> Result<(), ParseFenError> {
        let mut rank = 7;
        let mut file = 0;

        for c in text.chars() {
            if c == Self::SEPARATOR {
                rank -= 1;
                file = 0;
            } else if let Some(skip) = c.to_digit(10) {
                file += skip;
            } else {
                let piece = self.parse_piece(c)?;
                let color = self.parse_color(c);
                let square = Square::from_axes(rank, file);

                self.board.add_piece(piece, color, square);

                file += 1;
            }
        }

        Ok(())
    }

    fn parse_piece(&self, c: char) -> Result<Piece, ParseFenError> {
        match c {
            'P' | 'p' => Ok(Piece::Pawn),
            'N' | 'n' => Ok(Piece::Knight),
            'B' | 'b' => Ok(Piece::Bishop),
            'R' | 'r' => Ok(Piece::Rook),
            'Q' | 'q' => Ok(Piece::Queen),
            'K' | 'k' => Ok(Piece::King),
            _ => Err(ParseFenError::UnexpectedPiece { piece: c }),
        }
    }

    fn parse_color(&self, c: char) -> Color {
        match c.is_uppercase() {
            true => Color::White,
            false => Color::Black,
        }
    }

    fn set_turn(&mut self, text: &str) -> Result<(), ParseFenError> {
        self.board.turn = match text {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _ => Err(ParseFenError::UnexpectedTurnColor {
                color: text.to_string(),
            }),
        }?;

        Ok(())
    }

    fn set_castling(&mut self, text: &str) -> Result<(), ParseFenError> {
        let castling = &mut self.board.state.castling;
        for c in text.chars() {
            match c {
                'K' => castling.allow(CastlingKind::WhiteShort),
                'Q' => castling.allow(CastlingKind::WhiteLong),
                'k' => castling.allow(CastlingKind::BlackShort),
                'q' => castling.allow(CastlingKind::BlackLong),
                '-' => {}
                _ => return Err(ParseFenError::UnexpectedCastling { char: c }),
            };
        }

        Ok(())
    }

    fn set_en_passant(&mut self, text: &str) -> Result<(), ParseFenError> {
        self.board.state.en_passant = match text {
            "-" => None,
            _ => Some(
                Square::try_from(text).map_err(|_| ParseFenError::InvalidEnPassant {
                    text: text.to_string(),
                })?,
            ),
        };

        Ok(())
    }

    fn set_clocks(&mut self, halfmove: &str, fullmove: &str) -> Result<(), ParseFenError> {
        self.board.state.halfmove_clock = halfmove.parse().map_err(|_| ParseFenError::InvalidClock {
            text: halfmove.to_string(),
        })?;

        self.board.fullmove_number = fullmove.parse().map_err(|_| ParseFenError::InvalidClock {
            text: fullmove.to_string(),
        })?;

        Ok(())
    }
}

impl Board {
    /// Serializes the board back into the Forsyth–Edwards notation.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                let square = Square::from_axes(rank, file);
                match self.get_piece(square) {
                    None => empty += 1,
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }

                        let c = match piece {
                            Piece::Pawn => 'p',
                            Piece::Knight => 'n',
                            Piece::Bishop => 'b',
                            Piece::Rook => 'r',
                            Piece::Queen => 'q',
                            Piece::King => 'k',
                        };

                        match self.colors[Color::White].contains(square) {
                            true => fen.push(c.to_ascii_uppercase()),
                            false => fen.push(c),
                        }
                    }
                }
            }

            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push(InnerFen::SEPARATOR);
            }
        }

        let en_passant = match self.state.en_passant {
            Some(square) => square.to_string(),
            None => "-".to_string(),
        };

        let turn = match self.turn {
            Color::White => 'w',
            Color::Black => 'b',
        };

        format!(
            "{} {} {} {} {} {}",
            fen, turn, self.state.castling, en_passant, self.state.halfmove_clock, self.fullmove_number
        )
    }
}
