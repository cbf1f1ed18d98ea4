pub mod escape;
pub mod source_request;
