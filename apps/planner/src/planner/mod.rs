// Training plan generation: prompt building, the model round trip and CSV extraction.
// All model calls go through llm_client.

pub mod builder;
pub mod extractor;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod requester;
pub mod service;
