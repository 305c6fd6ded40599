/// Non-blocking advisory hint requests
pub mod advisory;
