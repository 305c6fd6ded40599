/// Draw-order layers and rank allocation
pub mod order;
/// Random and fixed partitioning of the board into rods
pub mod partition;
/// Piece identity, footprints and lock state
pub mod piece;
/// Difficulty tiers, size policies and puzzle blueprints
pub mod policy;
/// Re-randomisation of loose pieces
pub mod scatter;
/// Puzzle session and placement state machine
pub mod session;
/// Initial off-home placement of pieces
pub mod shuffle;
