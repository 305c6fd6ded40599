/// Renderer-facing view of pieces and media sources
pub mod layout;
