pub mod bridge_response;
pub mod bridge_route;
