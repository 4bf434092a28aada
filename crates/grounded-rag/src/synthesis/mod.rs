//! Deterministic evidence synthesis
//!
//! Turns retrieved passages into a single cited evidence document. Nothing
//! here calls a model: every sentence in the output is either copied from a
//! retrieved passage or one of the fixed, labelled templates below.

mod cleaning;
mod comparison;
mod evidence;

pub use cleaning::{clean_and_merge, clean_passage, MIN_PASSAGE_TOKENS, TOC_LEADER};
pub use comparison::{is_comparison_query, Aspect, COMPARISON_KEYWORDS};
pub use evidence::{cited_passage_ids, EvidenceSynthesizer};
