pub mod defs;
pub mod eval;
pub mod limits;
pub mod position_stack;
pub mod search;
