//! Keyword rules that assign a section label to a paragraph

use crate::types::DEFAULT_SECTION;

/// Ordered (section, keywords) rules; the first rule with a matching keyword wins
const SECTION_RULES: &[(&str, &[&str])] = &[
    (
        "Fully managed RAG options",
        &["fully managed", "knowledge bases for amazon bedrock", "amazon q"],
    ),
    (
        "Custom RAG architectures",
        &["custom retrieval augmented generation", "custom rag"],
    ),
    (
        "Retrievers",
        &[
            "amazon kendra", "opensearch", "aurora", "neptune",
            "memorydb", "documentdb", "pinecone", "mongodb", "weaviate",
        ],
    ),
    (
        "Generators",
        &["amazon bedrock", "sagemaker", "jumpstart", "foundation model", "llm"],
    ),
];

/// Classify a paragraph into a section, falling back to `"General"`
pub fn detect_section(text: &str) -> &'static str {
    let lower = text.to_lowercase();

    SECTION_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(section, _)| *section)
        .unwrap_or(DEFAULT_SECTION)
}
