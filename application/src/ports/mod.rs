pub mod command_source;
pub mod completion_gateway;
pub mod conversation_store;
