use std::fmt;

use tracing::debug;

use crate::error::{ChessError, ChessResult};
use crate::movegen::legal_moves;
use crate::types::*;

/// 8x8 grid indexed `[row][col]`, row 0 being Black's back rank.
pub type Board = [[Option<Piece>; 8]; 8];

/// The parts of a [`GameState`] that `apply` followed by `undo` must restore exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionSnapshot {
    pub board: Board,
    pub side_to_move: Color,
    pub king_squares: [Square; 2],
    pub en_passant: Option<Square>,
    pub castling: CastlingRights,
}

/// Game-over markers. Mate and stalemate are written by [`legal_moves`];
/// repetition by [`GameState::apply`]. None of them outlive an undo.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TerminalFlags {
    pub white_mated: bool,
    pub black_mated: bool,
    pub stalemate: bool,
    pub repetition: bool,
}

#[derive(Clone, Copy, Debug)]
struct Undo {
    en_passant: Option<Square>,
    recorded_board: bool,
    /// The board after this move had been seen before.
    repeated: bool,
    /// This move raised the game-level repetition flag.
    set_repetition: bool,
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) king_squares: [Square; 2],
    pub(crate) en_passant: Option<Square>,
    castling_history: Vec<CastlingRights>,
    move_log: Vec<Move>,
    undo_log: Vec<Undo>,
    seen_boards: Vec<Board>,
    castled: [bool; 2],
    pub(crate) in_check: bool,
    pub(crate) flags: TerminalFlags,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard starting position, White to move.
    pub fn new() -> Self {
        let mut board: Board = [[None; 8]; 8];
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (col, &kind) in back.iter().enumerate() {
            board[0][col] = Some(Piece::new(Color::Black, kind));
            board[1][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            board[6][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
            board[7][col] = Some(Piece::new(Color::White, kind));
        }
        GameState {
            board,
            side_to_move: Color::White,
            king_squares: [Square::new(7, 4), Square::new(0, 4)],
            en_passant: None,
            castling_history: vec![CastlingRights::ALL],
            move_log: Vec::new(),
            undo_log: Vec::new(),
            seen_boards: Vec::new(),
            castled: [false, false],
            in_check: false,
            flags: TerminalFlags::default(),
        }
    }

    fn with_board(
        board: Board,
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<Square>,
    ) -> Result<Self, String> {
        let mut kings = [None, None];
        for (row, rank) in board.iter().enumerate() {
            for (col, pc) in rank.iter().enumerate() {
                if let Some(pc) = pc {
                    if pc.kind == PieceKind::King {
                        let slot = &mut kings[pc.color.idx()];
                        if slot.is_some() {
                            return Err(format!("more than one {:?} king", pc.color));
                        }
                        *slot = Some(Square::new(row as u8, col as u8));
                    }
                }
            }
        }
        let (Some(white_king), Some(black_king)) = (kings[0], kings[1]) else {
            return Err("both kings must be on the board".to_string());
        };

        Ok(GameState {
            board,
            side_to_move,
            king_squares: [white_king, black_king],
            en_passant,
            castling_history: vec![castling],
            move_log: Vec::new(),
            undo_log: Vec::new(),
            seen_boards: Vec::new(),
            castled: [false, false],
            in_check: false,
            flags: TerminalFlags::default(),
        })
    }

    /// Forsyth-Edwards Notation parser used by tests and fixtures.
    /// Halfmove and fullmove counters are accepted and ignored.
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let invalid = |reason: String| ChessError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };

        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(invalid("expected at least 4 fields".to_string()));
        }

        let mut board: Board = [[None; 8]; 8];
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(invalid(format!("expected 8 ranks, found {}", ranks.len())));
        }

        // FEN lists rank 8 first, which is row 0 here.
        for (row, rank_str) in ranks.iter().enumerate() {
            let mut col = 0usize;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    col += d as usize;
                } else {
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = match ch.to_ascii_lowercase() {
                        'p' => PieceKind::Pawn,
                        'n' => PieceKind::Knight,
                        'b' => PieceKind::Bishop,
                        'r' => PieceKind::Rook,
                        'q' => PieceKind::Queen,
                        'k' => PieceKind::King,
                        _ => return Err(invalid(format!("bad piece char {ch:?}"))),
                    };
                    if col >= 8 {
                        return Err(invalid(format!("too many files in rank {}", 8 - row)));
                    }
                    board[row][col] = Some(Piece::new(color, kind));
                    col += 1;
                }
            }
            if col != 8 {
                return Err(invalid(format!("rank {} does not have 8 files", 8 - row)));
            }
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(invalid(format!("bad side to move {other:?}"))),
        };

        let mut castling = CastlingRights::NONE;
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => return Err(invalid(format!("bad castling char {c:?}"))),
                }
            }
        }

        let en_passant = if parts[3] == "-" {
            None
        } else {
            Some(
                parts[3]
                    .parse::<Square>()
                    .map_err(|_| invalid(format!("bad en-passant square {:?}", parts[3])))?,
            )
        };

        Self::with_board(board, side_to_move, castling, en_passant).map_err(invalid)
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.row as usize][sq.col as usize]
    }
    pub(crate) fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.board[sq.row as usize][sq.col as usize] = pc;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn king_square(&self, c: Color) -> Square {
        self.king_squares[c.idx()]
    }
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }
    pub fn castling_rights(&self) -> CastlingRights {
        // The history always holds the initial entry.
        self.castling_history
            .last()
            .copied()
            .unwrap_or(CastlingRights::NONE)
    }
    pub fn castling_history_len(&self) -> usize {
        self.castling_history.len()
    }
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }
    /// Identifiers of every applied move, oldest first.
    pub fn move_ids(&self) -> Vec<u16> {
        self.move_log.iter().map(Move::id).collect()
    }
    pub fn has_castled(&self, c: Color) -> bool {
        self.castled[c.idx()]
    }

    /// Whether the side to move was in check at the last legal-move query.
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    /// Recompute the check marker for the current board and side to move.
    pub fn refresh_in_check(&mut self) {
        self.in_check = crate::attacks::analyze(self).in_check;
    }

    pub fn terminal_flags(&self) -> TerminalFlags {
        self.flags
    }
    pub fn white_mated(&self) -> bool {
        self.flags.white_mated
    }
    pub fn black_mated(&self) -> bool {
        self.flags.black_mated
    }
    pub fn is_checkmate(&self) -> bool {
        self.flags.white_mated || self.flags.black_mated
    }
    pub fn is_stalemate(&self) -> bool {
        self.flags.stalemate
    }
    /// Whether a repetition has occurred anywhere in the game so far.
    pub fn is_repetition(&self) -> bool {
        self.flags.repetition
    }
    /// Whether the most recent move repeated an earlier position. Unlike
    /// [`GameState::is_repetition`] this says nothing about older moves.
    pub fn repetition_at_last_move(&self) -> bool {
        self.undo_log.last().is_some_and(|u| u.repeated)
    }
    pub fn is_drawn(&self) -> bool {
        self.flags.stalemate || self.flags.repetition
    }
    pub fn is_terminal(&self) -> bool {
        self.is_checkmate() || self.is_drawn()
    }

    /// Drop mate and stalemate markers. Repetition stays until the move
    /// that caused it is undone.
    pub fn clear_terminal_flags(&mut self) {
        self.flags.white_mated = false;
        self.flags.black_mated = false;
        self.flags.stalemate = false;
    }

    pub fn snapshot(&self) -> PositionSnapshot {
        PositionSnapshot {
            board: self.board,
            side_to_move: self.side_to_move,
            king_squares: self.king_squares,
            en_passant: self.en_passant,
            castling: self.castling_rights(),
        }
    }

    /// Run `f` with the other side to move, then put the side, the check
    /// marker and the terminal flags back as they were.
    pub fn with_side_flipped<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let in_check = self.in_check;
        let flags = self.flags;
        self.side_to_move = self.side_to_move.other();
        let out = f(self);
        self.side_to_move = self.side_to_move.other();
        self.in_check = in_check;
        self.flags = flags;
        out
    }

    /// Play `mv`, which must come from the current legal move list.
    pub fn apply(&mut self, mv: Move) {
        let color = mv.piece.color;
        let mut undo = Undo {
            en_passant: self.en_passant,
            recorded_board: false,
            repeated: false,
            set_repetition: false,
        };

        self.set_piece(mv.from, None);
        self.set_piece(mv.to, Some(mv.piece));

        if mv.piece.kind == PieceKind::King {
            self.king_squares[color.idx()] = mv.to;
        }

        if mv.is_promotion {
            self.set_piece(mv.to, Some(Piece::new(color, PieceKind::Queen)));
        }

        if mv.is_en_passant {
            self.set_piece(Square::new(mv.from.row, mv.to.col), None);
        }

        let double_step = mv.piece.kind == PieceKind::Pawn && mv.from.row.abs_diff(mv.to.row) == 2;
        self.en_passant = if double_step {
            Some(Square::new((mv.from.row + mv.to.row) / 2, mv.from.col))
        } else {
            None
        };

        if mv.is_castle {
            let (rook_from, rook_to) = castle_rook_squares(&mv);
            let rook = self.piece_at(rook_from);
            self.set_piece(rook_from, None);
            self.set_piece(rook_to, rook);
            self.castled[color.idx()] = true;
        }

        let rights = self.castling_rights().after(&mv);
        self.castling_history.push(rights);

        // Boards are only remembered after a move that was already played once.
        if self.move_log.contains(&mv) {
            undo.repeated = self.seen_boards.contains(&self.board);
            if undo.repeated && !self.flags.repetition {
                debug!(%mv, ply = self.move_log.len() + 1, "draw by repetition");
                self.flags.repetition = true;
                undo.set_repetition = true;
            }
            self.seen_boards.push(self.board);
            undo.recorded_board = true;
        }

        self.side_to_move = self.side_to_move.other();
        self.move_log.push(mv);
        self.undo_log.push(undo);
    }

    /// Take back the last applied move. Does nothing at the start of the game.
    pub fn undo(&mut self) {
        let (Some(mv), Some(undo)) = (self.move_log.pop(), self.undo_log.pop()) else {
            return;
        };
        let color = mv.piece.color;

        self.side_to_move = color;
        self.set_piece(mv.from, Some(mv.piece));
        if mv.is_en_passant {
            self.set_piece(mv.to, None);
            self.set_piece(Square::new(mv.from.row, mv.to.col), mv.captured);
        } else {
            self.set_piece(mv.to, mv.captured);
        }

        if mv.piece.kind == PieceKind::King {
            self.king_squares[color.idx()] = mv.from;
        }

        self.en_passant = undo.en_passant;
        self.castling_history.pop();

        if mv.is_castle {
            let (rook_from, rook_to) = castle_rook_squares(&mv);
            let rook = self.piece_at(rook_to);
            self.set_piece(rook_to, None);
            self.set_piece(rook_from, rook);
            self.castled[color.idx()] = false;
        }

        if undo.recorded_board {
            self.seen_boards.pop();
        }
        if undo.set_repetition {
            self.flags.repetition = false;
        }
        self.clear_terminal_flags();
    }

    /// Validate a caller-supplied origin/destination pair against the legal
    /// moves and play it. The state is untouched on error.
    pub fn play(&mut self, from: Square, to: Square) -> ChessResult<Move> {
        let id = Move::id_of(from, to);
        match legal_moves(self).into_iter().find(|m| m.id() == id) {
            Some(mv) => {
                self.apply(mv);
                debug!(%mv, "move accepted");
                Ok(mv)
            }
            None => {
                debug!(%from, %to, "move rejected");
                Err(ChessError::InvalidMoveRequest { from, to })
            }
        }
    }

    /// [`GameState::play`] for two-square notation such as `e2e4`.
    pub fn play_notation(&mut self, notation: &str) -> ChessResult<Move> {
        let (from, to) = parse_squares(notation)?;
        self.play(from, to)
    }
}

/// Rook origin and destination for a castling king move.
fn castle_rook_squares(mv: &Move) -> (Square, Square) {
    let row = mv.to.row;
    if mv.to.col > mv.from.col {
        (Square::new(row, 7), Square::new(row, mv.to.col - 1))
    } else {
        (Square::new(row, 0), Square::new(row, mv.to.col + 1))
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, rank) in self.board.iter().enumerate() {
            write!(f, "{} ", 8 - row)?;
            for pc in rank {
                match pc {
                    Some(pc) => write!(f, " {}", pc.code())?,
                    None => write!(f, " --")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for file in 'a'..='h' {
            write!(f, " {file} ")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
