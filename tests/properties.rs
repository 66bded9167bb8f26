//! Property-based tests

#[path = "properties/event_filter.rs"]
mod event_filter;
