// Bio generation pipeline: prompt build → chat call → HTML formatting.
// All LLM calls go through llm_client — no direct Cohere calls here.

pub mod formatter;
pub mod generator;
pub mod handlers;
pub mod prompts;
