use super::DirectionsResponse;

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    RouteResponse {
        session_id: String,
        message_index: usize,
        response: DirectionsResponse,
    },
    RouteFailed {
        session_id: String,
        message_index: usize,
        error: String,
    },
}
