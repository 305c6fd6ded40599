/// Scripted drag sequences that solve a session
pub mod autoplay;
/// Pointer events, viewport mapping and snapping
pub mod pointer;
