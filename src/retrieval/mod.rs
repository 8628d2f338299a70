//! The stages of one retrieval: plan the chunks, build each request, fetch it,
//! parse the body and merge it into the running result.

pub mod error;
pub mod fetcher;
pub mod merger;
pub mod pacer;
pub mod parser;
pub mod planner;
pub mod request;
