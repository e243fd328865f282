use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::ChessError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
    /// Row delta of a forward pawn step. White advances towards row 0.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
    pub fn home_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
    pub fn pawn_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }
    pub fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn idx(self) -> usize {
        self as usize
    }

    fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Move-ordering weight of the moving piece.
    fn order_weight(self) -> i32 {
        match self {
            PieceKind::Pawn => 7,
            PieceKind::Knight | PieceKind::Bishop => 5,
            PieceKind::Queen | PieceKind::King => 6,
            PieceKind::Rook => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Two-symbol code such as `wp` or `bK`.
    pub fn code(self) -> String {
        let c = match self.color {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!("{c}{}", self.kind.symbol())
    }
}

/// A board coordinate. Row 0 is Black's back rank (rank 8), column 0 is the a-file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8, "square out of range: ({row}, {col})");
        Self { row, col }
    }

    /// The square `(dr, dc)` away, or `None` when that falls off the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let r = self.row as i8 + dr;
        let c = self.col as i8 + dc;
        if (0..8).contains(&r) && (0..8).contains(&c) {
            Some(Square::new(r as u8, c as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = (b'8' - self.row) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b = s.as_bytes();
        if b.len() != 2 {
            return Err(ChessError::InvalidSquare(s.to_string()));
        }
        let f = b[0];
        let r = b[1];
        if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
            return Err(ChessError::InvalidSquare(s.to_string()));
        }
        Ok(Square::new(b'8' - r, f - b'a'))
    }
}

/// Castling availability at one point in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        wk: true,
        wq: true,
        bk: true,
        bq: true,
    };
    pub const NONE: CastlingRights = CastlingRights {
        wk: false,
        wq: false,
        bk: false,
        bq: false,
    };

    pub fn king_side(&self, c: Color) -> bool {
        match c {
            Color::White => self.wk,
            Color::Black => self.bk,
        }
    }

    pub fn queen_side(&self, c: Color) -> bool {
        match c {
            Color::White => self.wq,
            Color::Black => self.bq,
        }
    }

    /// Rights remaining after `mv` is played. Never grants a right back.
    pub fn after(mut self, mv: &Move) -> CastlingRights {
        let color = mv.piece.color;
        match mv.piece.kind {
            PieceKind::King => self.clear(color, true, true),
            PieceKind::Rook => self.clear_corner(color, mv.from),
            _ => {}
        }
        if let Some(cap) = mv.captured {
            if cap.kind == PieceKind::Rook && !mv.is_en_passant {
                self.clear_corner(cap.color, mv.to);
            }
        }
        self
    }

    fn clear_corner(&mut self, c: Color, sq: Square) {
        if sq.row != c.home_row() {
            return;
        }
        match sq.col {
            0 => self.clear(c, false, true),
            7 => self.clear(c, true, false),
            _ => {}
        }
    }

    fn clear(&mut self, c: Color, king_side: bool, queen_side: bool) {
        let (k, q) = match c {
            Color::White => (&mut self.wk, &mut self.wq),
            Color::Black => (&mut self.bk, &mut self.bq),
        };
        if king_side {
            *k = false;
        }
        if queen_side {
            *q = false;
        }
    }
}

/// One ply. Equality and hashing go through [`Move::id`] only, so two moves
/// with the same origin and destination are the same move.
#[derive(Clone, Copy, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    /// Piece removed by this move; for en passant the passed pawn.
    pub captured: Option<Piece>,
    pub is_en_passant: bool,
    pub is_castle: bool,
    /// Always promotes to a queen.
    pub is_promotion: bool,
    /// Cheap ordering score for search: moving-piece weight plus a capture bonus.
    pub order_value: i32,
}

impl Move {
    /// A plain move or capture of `piece`. The promotion flag is derived from the destination row.
    pub fn new(from: Square, to: Square, piece: Piece, captured: Option<Piece>) -> Self {
        let is_promotion = piece.kind == PieceKind::Pawn && to.row == piece.color.promotion_row();
        let order_value = piece.kind.order_weight() + if captured.is_some() { 4 } else { 0 };
        Self {
            from,
            to,
            piece,
            captured,
            is_en_passant: false,
            is_castle: false,
            is_promotion,
            order_value,
        }
    }

    pub fn en_passant(from: Square, to: Square, pawn: Piece) -> Self {
        let captured = Some(Piece::new(pawn.color.other(), PieceKind::Pawn));
        let mut mv = Move::new(from, to, pawn, captured);
        mv.is_en_passant = true;
        mv
    }

    pub fn castle(from: Square, to: Square, king: Piece) -> Self {
        let mut mv = Move::new(from, to, king, None);
        mv.is_castle = true;
        mv
    }

    /// `from.row*1000 + from.col*100 + to.row*10 + to.col`, e.g. e2e4 is 6444.
    pub fn id(&self) -> u16 {
        Self::id_of(self.from, self.to)
    }

    pub fn id_of(from: Square, to: Square) -> u16 {
        from.row as u16 * 1000 + from.col as u16 * 100 + to.row as u16 * 10 + to.col as u16
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Parse two-square notation such as `e2e4` into its origin and destination.
pub fn parse_squares(notation: &str) -> Result<(Square, Square), ChessError> {
    let notation = notation.trim();
    if notation.len() != 4 || !notation.is_ascii() {
        return Err(ChessError::InvalidNotation(notation.to_string()));
    }
    let from = notation[..2]
        .parse()
        .map_err(|_| ChessError::InvalidNotation(notation.to_string()))?;
    let to = notation[2..]
        .parse()
        .map_err(|_| ChessError::InvalidNotation(notation.to_string()))?;
    Ok((from, to))
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
