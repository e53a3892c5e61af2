// Career mentor chat: intent classification, stack catalog, canned answers and routing.
// All inference calls go through llm_client; the router only sees `TextGenerator`.

pub mod handlers;
pub mod intent;
pub mod keywords;
pub mod responses;
pub mod router;
pub mod stacks;
