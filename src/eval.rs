use crate::{defs::Value, position_stack::legal_move_count};
use shakmaty::{Chess, Color, Piece, Position, Role, Square};

/// Turns a position into a score, positive favouring White
pub trait PositionEvaluator {
    fn eval(&self, pos: &Chess) -> Value;
}

/// Weights of the evaluation terms
#[derive(Debug, Clone, PartialEq)]
pub struct EvalWeights {
    /// Material value per role, indexed by `role as usize - 1`
    /// The king's value is a sentinel, it is always on the board for both sides
    pub material: [Value; 6],
    /// Value of each legal move of difference between the sides
    pub mobility: Value,
    /// Squares whose occupation is rewarded
    pub center_squares: [Square; 4],
    /// Value of occupying one center square
    pub center: Value,
    /// Flat bonus when the side to move is in check
    pub check: Value,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            //         P    N    B    R    Q    K
            material: [1.0, 3.2, 3.3, 5.0, 9.0, 100.0],
            mobility: 0.1,
            center_squares: [Square::D4, Square::D5, Square::E4, Square::E5],
            center: 0.3,
            check: 0.5,
        }
    }
}

impl EvalWeights {
    pub fn role(&self, role: Role) -> Value {
        self.material[role as usize - 1]
    }
}

/// Handcrafted evaluation: material, mobility, center control and check
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    weights: EvalWeights,
}

impl Evaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Evaluator { weights }
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    pub fn material(&self, pos: &Chess) -> Value {
        let board = pos.board();
        let mut score = 0.0;

        for role in Role::ALL {
            let white = board.by_piece(Piece { color: Color::White, role }).count();
            let black = board.by_piece(Piece { color: Color::Black, role }).count();

            score += white as Value * self.weights.role(role);
            score -= black as Value * self.weights.role(role);
        }

        score
    }

    /// Difference in legal moves. White's moves only count when White is to
    /// move, Black's are counted as if Black were to move
    pub fn mobility(&self, pos: &Chess) -> Value {
        let white = match pos.turn() {
            Color::White => legal_move_count(pos, Color::White) as Value,
            Color::Black => 0.0,
        };
        let black = legal_move_count(pos, Color::Black) as Value;

        self.weights.mobility * (white - black)
    }

    pub fn center_control(&self, pos: &Chess) -> Value {
        self.weights
            .center_squares
            .iter()
            .map(|&square| match pos.board().piece_at(square) {
                Some(piece) if piece.color == Color::White => self.weights.center,
                Some(_) => -self.weights.center,
                None => 0.0,
            })
            .sum()
    }

    /// Applies to whichever side is in check
    pub fn check_bonus(&self, pos: &Chess) -> Value {
        if pos.is_check() {
            self.weights.check
        } else {
            0.0
        }
    }
}

impl PositionEvaluator for Evaluator {
    fn eval(&self, pos: &Chess) -> Value {
        self.material(pos) + self.mobility(pos) + self.center_control(pos) + self.check_bonus(pos)
    }
}
