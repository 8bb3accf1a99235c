//! Pieces module - the fixed shape catalog
//!
//! Every shape is a set of `(dx, dy)` offsets relative to its anchor, normalized so the
//! bounding box starts at `(0, 0)`. Shapes never rotate; each orientation is its own
//! catalog entry.

use crate::types::Color;

/// Offset of a single block relative to the piece anchor
pub type CellOffset = (i8, i8);

/// Block count of the largest catalog shape
pub const MAX_PIECE_CELLS: usize = 9;

/// Every shape a hand can be dealt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Mono,
    DominoH,
    DominoV,
    TrominoH,
    TrominoV,
    CornerUpLeft,
    CornerUpRight,
    CornerDownLeft,
    CornerDownRight,
    TetrominoH,
    TetrominoV,
    Square2,
    LNorth,
    LEast,
    LSouth,
    LWest,
    JNorth,
    JEast,
    JSouth,
    JWest,
    TNorth,
    TEast,
    TSouth,
    TWest,
    SHorizontal,
    SVertical,
    ZHorizontal,
    ZVertical,
    PentominoH,
    PentominoV,
    Square3,
    BigCornerUpLeft,
    BigCornerUpRight,
    BigCornerDownLeft,
    BigCornerDownRight,
    Rect2x3,
    Rect3x2,
}

impl ShapeKind {
    pub const ALL: [Self; 37] = [
        Self::Mono,
        Self::DominoH,
        Self::DominoV,
        Self::TrominoH,
        Self::TrominoV,
        Self::CornerUpLeft,
        Self::CornerUpRight,
        Self::CornerDownLeft,
        Self::CornerDownRight,
        Self::TetrominoH,
        Self::TetrominoV,
        Self::Square2,
        Self::LNorth,
        Self::LEast,
        Self::LSouth,
        Self::LWest,
        Self::JNorth,
        Self::JEast,
        Self::JSouth,
        Self::JWest,
        Self::TNorth,
        Self::TEast,
        Self::TSouth,
        Self::TWest,
        Self::SHorizontal,
        Self::SVertical,
        Self::ZHorizontal,
        Self::ZVertical,
        Self::PentominoH,
        Self::PentominoV,
        Self::Square3,
        Self::BigCornerUpLeft,
        Self::BigCornerUpRight,
        Self::BigCornerDownLeft,
        Self::BigCornerDownRight,
        Self::Rect2x3,
        Self::Rect3x2,
    ];

    /// Block offsets for this shape
    pub fn cells(&self) -> &'static [CellOffset] {
        match self {
            Self::Mono => &[(0, 0)],
            Self::DominoH => &[(0, 0), (1, 0)],
            Self::DominoV => &[(0, 0), (0, 1)],
            Self::TrominoH => &[(0, 0), (1, 0), (2, 0)],
            Self::TrominoV => &[(0, 0), (0, 1), (0, 2)],
            Self::CornerUpLeft => &[(0, 0), (1, 0), (0, 1)],
            Self::CornerUpRight => &[(0, 0), (1, 0), (1, 1)],
            Self::CornerDownLeft => &[(0, 0), (0, 1), (1, 1)],
            Self::CornerDownRight => &[(1, 0), (0, 1), (1, 1)],
            Self::TetrominoH => &[(0, 0), (1, 0), (2, 0), (3, 0)],
            Self::TetrominoV => &[(0, 0), (0, 1), (0, 2), (0, 3)],
            Self::Square2 => &[(0, 0), (1, 0), (0, 1), (1, 1)],
            Self::LNorth => &[(2, 0), (0, 1), (1, 1), (2, 1)],
            Self::LEast => &[(0, 0), (0, 1), (0, 2), (1, 2)],
            Self::LSouth => &[(0, 0), (1, 0), (2, 0), (0, 1)],
            Self::LWest => &[(0, 0), (1, 0), (1, 1), (1, 2)],
            Self::JNorth => &[(0, 0), (0, 1), (1, 1), (2, 1)],
            Self::JEast => &[(0, 0), (1, 0), (0, 1), (0, 2)],
            Self::JSouth => &[(0, 0), (1, 0), (2, 0), (2, 1)],
            Self::JWest => &[(1, 0), (1, 1), (0, 2), (1, 2)],
            Self::TNorth => &[(1, 0), (0, 1), (1, 1), (2, 1)],
            Self::TEast => &[(0, 0), (0, 1), (1, 1), (0, 2)],
            Self::TSouth => &[(0, 0), (1, 0), (2, 0), (1, 1)],
            Self::TWest => &[(1, 0), (0, 1), (1, 1), (1, 2)],
            Self::SHorizontal => &[(1, 0), (2, 0), (0, 1), (1, 1)],
            Self::SVertical => &[(0, 0), (0, 1), (1, 1), (1, 2)],
            Self::ZHorizontal => &[(0, 0), (1, 0), (1, 1), (2, 1)],
            Self::ZVertical => &[(1, 0), (0, 1), (1, 1), (0, 2)],
            Self::PentominoH => &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)],
            Self::PentominoV => &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)],
            Self::Square3 => &[
                (0, 0),
                (1, 0),
                (2, 0),
                (0, 1),
                (1, 1),
                (2, 1),
                (0, 2),
                (1, 2),
                (2, 2),
            ],
            Self::BigCornerUpLeft => &[(0, 0), (1, 0), (2, 0), (0, 1), (0, 2)],
            Self::BigCornerUpRight => &[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)],
            Self::BigCornerDownLeft => &[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)],
            Self::BigCornerDownRight => &[(2, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
            Self::Rect2x3 => &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)],
            Self::Rect3x2 => &[(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)],
        }
    }

    /// Number of blocks in this shape
    pub fn block_count(&self) -> usize {
        self.cells().len()
    }

    /// Bounding box `(width, height)`
    pub fn extent(&self) -> (u8, u8) {
        let mut w = 0i8;
        let mut h = 0i8;
        for &(dx, dy) in self.cells() {
            w = w.max(dx + 1);
            h = h.max(dy + 1);
        }
        (w as u8, h as u8)
    }

    /// Stable snake_case name used by snapshots and the JSON adapter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mono => "mono",
            Self::DominoH => "domino_h",
            Self::DominoV => "domino_v",
            Self::TrominoH => "tromino_h",
            Self::TrominoV => "tromino_v",
            Self::CornerUpLeft => "corner_up_left",
            Self::CornerUpRight => "corner_up_right",
            Self::CornerDownLeft => "corner_down_left",
            Self::CornerDownRight => "corner_down_right",
            Self::TetrominoH => "tetromino_h",
            Self::TetrominoV => "tetromino_v",
            Self::Square2 => "square_2",
            Self::LNorth => "l_north",
            Self::LEast => "l_east",
            Self::LSouth => "l_south",
            Self::LWest => "l_west",
            Self::JNorth => "j_north",
            Self::JEast => "j_east",
            Self::JSouth => "j_south",
            Self::JWest => "j_west",
            Self::TNorth => "t_north",
            Self::TEast => "t_east",
            Self::TSouth => "t_south",
            Self::TWest => "t_west",
            Self::SHorizontal => "s_horizontal",
            Self::SVertical => "s_vertical",
            Self::ZHorizontal => "z_horizontal",
            Self::ZVertical => "z_vertical",
            Self::PentominoH => "pentomino_h",
            Self::PentominoV => "pentomino_v",
            Self::Square3 => "square_3",
            Self::BigCornerUpLeft => "big_corner_up_left",
            Self::BigCornerUpRight => "big_corner_up_right",
            Self::BigCornerDownLeft => "big_corner_down_left",
            Self::BigCornerDownRight => "big_corner_down_right",
            Self::Rect2x3 => "rect_2x3",
            Self::Rect3x2 => "rect_3x2",
        }
    }

    /// Parse a shape from its snake_case name
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == s)
    }
}

/// An immutable piece: a catalog shape plus the colour it was dealt with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: ShapeKind, color: Color) -> Self {
        Self { kind, color }
    }

    pub fn cells(&self) -> &'static [CellOffset] {
        self.kind.cells()
    }

    pub fn block_count(&self) -> usize {
        self.kind.block_count()
    }

    /// Absolute board coordinates this piece covers when anchored at `(x, y)`
    pub fn cells_at(&self, x: i8, y: i8) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.cells()
            .iter()
            .map(move |&(dx, dy)| (x as i16 + dx as i16, y as i16 + dy as i16))
    }
}
