//! These models represent the objects passed around by the agent
//!
//! There are a few related formats we need to interact with:
//! - chat UI messages, sent from the interface to the agent
//! - role/content messages, sent from the agent to the LLM
//! - the structured intent the LLM answers with
//!
//! Incoming formats are converted into the internal structs as soon as they
//! are received, so the rest of the agent never touches raw wire shapes.
pub mod intent;
pub mod message;
