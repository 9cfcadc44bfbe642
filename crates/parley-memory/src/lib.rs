//! Bounded conversation memory for Parley
//!
//! One `MemoryChain` per live session: appends messages, summarizes the
//! window once it crosses the configured threshold, and trims to the
//! message cap afterwards. Summarization always runs against the full
//! pre-trim window.

mod chain;
mod context;
mod summarizer;

pub use chain::{MemoryChain, MemoryChainConfig, DEFAULT_SUMMARY_PROMPT};
pub use context::MemoryContext;
pub use summarizer::{LLMSummarizer, PlaceholderSummarizer, Summarizer};
