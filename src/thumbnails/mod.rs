pub mod consts;
pub mod errors;
pub mod fetch;
pub mod handlers;
pub mod img;
pub mod requests;
