pub mod nearby_request;
pub mod nearby_route;
