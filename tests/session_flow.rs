#[path = "support/image_fixtures.rs"]
mod image_fixtures;

#[path = "session_flow/gemini_round_trip.rs"]
mod gemini_round_trip;
#[path = "session_flow/source_rejection.rs"]
mod source_rejection;
