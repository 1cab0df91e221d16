// Cover letter generation: multipart intake, prompt composition, streaming
// handlers and the filename helper for downloads.
// All provider calls go through llm_client::CompletionProvider.

pub mod composer;
pub mod filename;
pub mod form;
pub mod handlers;
pub mod prompts;
