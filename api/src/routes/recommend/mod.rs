pub mod chat_route;
pub mod query_route;
pub mod recommend_request;
pub mod recommend_response;
