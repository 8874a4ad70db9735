/// Engine's score units (pawns). Positive values favour White
pub type Value = f64;

/// Infinity for a Value, used as the initial alpha-beta window
pub const INFINITY: Value = f64::INFINITY;

/// Score of a mated position, signed by the side that was mated
pub const MATE_SCORE: Value = 9999.0;

/// Score of any stalemate, whichever side is stalemated
pub const STALEMATE_SCORE: Value = -200.0;

/// Score of the remaining drawn endings
pub const DRAW_SCORE: Value = 0.0;

/// Search depth used when none is requested
pub const DEFAULT_DEPTH: u32 = 3;
