/// Participant registration, role lookup and team questions.
pub mod directory_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Collaborative word ordering inside team rooms.
pub mod order_service;
/// Push-channel event encoding and fan-out.
pub mod push_events;
/// The team wheel shared by the REST and push adapters.
pub mod round_service;
/// Connection lifecycle and session reset.
pub mod session_service;
/// Per-team countdowns.
pub mod timer_service;
/// WebSocket connection and message handling service.
pub mod websocket_service;
