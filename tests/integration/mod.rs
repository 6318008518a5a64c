//! Integration tests for step registration and event emission

mod emitters;
mod event_log;
