use crate::core::{Bitboard, CastlingKind, Color, MoveKind, MoveList, Piece, Square};
use crate::lookup::*;

use super::Board;

pub(super) struct Generator;

impl Generator {
    /// Generates pseudo-legal moves for the current state of the board. In double
    /// check only king moves are produced; in single check non-king moves are
    /// restricted to the check-resolving squares. Pin violations are left to the
    /// legality check of `make_move`.
    pub fn generate_moves(board: &Board) -> MoveList {
        InnerGenerator::new(board, false).generate()
    }

    /// Generates captures only, including en passant and capture promotions.
    pub fn generate_capture_moves(board: &Board) -> MoveList {
        InnerGenerator::new(board, true).generate()
    }
}

struct InnerGenerator<'a> {
    board: &'a Board,
    turn: Color,
    all: Bitboard,
    us: Bitboard,
    them: Bitboard,
    check_mask: Bitboard,
    captures_only: bool,
    list: MoveList,
}

impl<'a> InnerGenerator<'a> {
    fn new(board: &'a Board, captures_only: bool) -> Self {
        Self {
            board,
            turn: board.turn,
            us: board.us(),
            them: board.them(),
            all: board.us() | board.them(),
            check_mask: board.threats.check_mask,
            captures_only,
            list: MoveList::new(),
        }
    }

    fn generate(mut self) -> MoveList {
        // Only the king can move out of a double check
        if self.board.threats.double_check {
            self.collect_king_moves();
            return self.list;
        }

        let occupancies = self.all;

        self.collect_for(Piece::Knight, knight_attacks);
        self.collect_for(Piece::Rook, |square| rook_attacks(square, occupancies));
        self.collect_for(Piece::Bishop, |square| bishop_attacks(square, occupancies));
        self.collect_for(Piece::Queen, |square| queen_attacks(square, occupancies));

        self.collect_pawn_moves();
        self.collect_king_moves();

        if !self.captures_only && !self.board.is_in_check() {
            self.collect_castling();
        }

        self.list
    }

    fn collect_for<T: Fn(Square) -> Bitboard>(&mut self, piece: Piece, gen: T) {
        let mut bb = self.board.our(piece);
        while let Some(start) = bb.pop() {
            let targets = gen(start) & !self.us & self.check_mask;

            self.add_captures(start, targets & self.them);
            if !self.captures_only {
                self.add_quiets(start, targets & !self.them);
            }
        }
    }

    fn collect_pawn_moves(&mut self) {
        let bb = self.board.our(Piece::Pawn);

        let (starting_rank, promotion_rank) = match self.turn {
            Color::White => (Bitboard::RANK_2, Bitboard::RANK_7),
            Color::Black => (Bitboard::RANK_7, Bitboard::RANK_2),
        };

        self.collect_promotions(promotion_rank & bb);
        self.collect_en_passant_moves(bb);
        self.collect_regular_pawn_moves(!promotion_rank & bb);

        if !self.captures_only {
            self.collect_double_pushes(starting_rank & bb);
        }
    }

    #[inline(always)]
    fn collect_regular_pawn_moves(&mut self, mut bb: Bitboard) {
        let offset = self.turn.offset();
        while let Some(start) = bb.pop() {
            // Captures
            let targets = pawn_attacks(start, self.turn) & self.them & self.check_mask;
            self.add_captures(start, targets);

            // One square pawn push
            if !self.captures_only {
                let target = start.shift(offset);
                if !self.all.contains(target) && self.check_mask.contains(target) {
                    self.list.add(start, target, MoveKind::Quiet);
                }
            }
        }
    }

    #[inline(always)]
    fn collect_promotions(&mut self, mut bb: Bitboard) {
        let offset = self.turn.offset();
        while let Some(start) = bb.pop() {
            // Promotion with a capture
            let mut targets = pawn_attacks(start, self.turn) & self.them & self.check_mask;
            while let Some(target) = targets.pop() {
                self.add_promotion_captures(start, target);
            }

            // Push promotion
            if !self.captures_only {
                let target = start.shift(offset);
                if !self.all.contains(target) && self.check_mask.contains(target) {
                    self.add_promotions(start, target);
                }
            }
        }
    }

    #[inline(always)]
    fn collect_double_pushes(&mut self, mut bb: Bitboard) {
        let offset = self.turn.offset();
        while let Some(start) = bb.pop() {
            let one_up = start.shift(offset);
            let two_up = one_up.shift(offset);

            if !self.all.contains(one_up)
                && !self.all.contains(two_up)
                && self.check_mask.contains(two_up)
            {
                self.list.add(start, two_up, MoveKind::DoublePush);
            }
        }
    }

    #[inline(always)]
    fn collect_en_passant_moves(&mut self, bb: Bitboard) {
        let Some(en_passant) = self.board.state.en_passant else { return };

        // The capture can resolve a check by removing the checking pawn, which the
        // check mask cannot express, so en passant is not intersected with it;
        // legality is settled by make_move
        let mut starts = pawn_attacks(en_passant, self.turn.opposite()) & bb;
        while let Some(start) = starts.pop() {
            self.list.add(start, en_passant, MoveKind::EnPassant);
        }
    }

    /// Collects king moves, pre-filtering destinations attacked by the opponent.
    /// The attack test removes the king from the occupancies, since a king
    /// stepping along a slider's ray would otherwise block it from view.
    fn collect_king_moves(&mut self) {
        let start = self.board.king(self.turn);
        let occupancies = self.all ^ start.to_bb();

        let mut targets = king_attacks(start) & !self.us;
        while let Some(target) = targets.pop() {
            if self.board.is_square_attacked_with(target, self.turn.opposite(), occupancies) {
                continue;
            }

            match self.them.contains(target) {
                true => self.list.add(start, target, MoveKind::Capture),
                false if !self.captures_only => self.list.add(start, target, MoveKind::Quiet),
                _ => (),
            }
        }
    }

    fn collect_castling(&mut self) {
        let (short, long, king_square) = match self.turn {
            Color::White => (CastlingKind::WhiteShort, CastlingKind::WhiteLong, Square::E1),
            Color::Black => (CastlingKind::BlackShort, CastlingKind::BlackLong, Square::E8),
        };

        let castling = self.board.state.castling;
        let them = self.turn.opposite();

        let f_file = king_square.shift(1);
        let g_file = king_square.shift(2);
        if castling.is_allowed(short)
            && (self.all & (f_file.to_bb() | g_file.to_bb())).is_empty()
            && !self.board.is_square_attacked(f_file, them)
            && !self.board.is_square_attacked(g_file, them)
        {
            self.list.add(king_square, g_file, MoveKind::Castling);
        }

        let d_file = king_square.shift(-1);
        let c_file = king_square.shift(-2);
        let b_file = king_square.shift(-3);
        if castling.is_allowed(long)
            && (self.all & (d_file.to_bb() | c_file.to_bb() | b_file.to_bb())).is_empty()
            && !self.board.is_square_attacked(d_file, them)
            && !self.board.is_square_attacked(c_file, them)
        {
            self.list.add(king_square, c_file, MoveKind::Castling);
        }
    }

    #[inline(always)]
    fn add_captures(&mut self, start: Square, mut targets: Bitboard) {
        while let Some(target) = targets.pop() {
            self.list.add(start, target, MoveKind::Capture)
        }
    }

    #[inline(always)]
    fn add_quiets(&mut self, start: Square, mut targets: Bitboard) {
        while let Some(target) = targets.pop() {
            self.list.add(start, target, MoveKind::Quiet)
        }
    }

    #[inline(always)]
    fn add_promotions(&mut self, start: Square, target: Square) {
        self.list.add(start, target, MoveKind::PromotionN);
        self.list.add(start, target, MoveKind::PromotionB);
        self.list.add(start, target, MoveKind::PromotionR);
        self.list.add(start, target, MoveKind::PromotionQ);
    }

    #[inline(always)]
    fn add_promotion_captures(&mut self, start: Square, target: Square) {
        self.list.add(start, target, MoveKind::PromotionCaptureN);
        self.list.add(start, target, MoveKind::PromotionCaptureB);
        self.list.add(start, target, MoveKind::PromotionCaptureR);
        self.list.add(start, target, MoveKind::PromotionCaptureQ);
    }
}
