//! Evidence document assembly

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::CorpusConfig;
use crate::types::{RetrievedPassage, DEFAULT_SECTION};

use super::cleaning::{clean_and_merge, clean_passage};
use super::comparison::{comparison_table, is_comparison_query};

static CITATION_FOOTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^_\(Source: (?P<section>.+), passages (?P<ids>.+)\)_$")
        .expect("citation footer pattern is valid")
});

/// Builds a cited evidence document from retrieved passages
#[derive(Debug, Clone, Default)]
pub struct EvidenceSynthesizer {
    corpus: CorpusConfig,
}

/// Passages of one section, in input order
struct SectionGroup<'a> {
    section: &'a str,
    passages: Vec<&'a RetrievedPassage>,
}

impl EvidenceSynthesizer {
    /// Create a synthesizer describing `corpus` in its notes
    pub fn new(corpus: CorpusConfig) -> Self {
        Self { corpus }
    }

    /// Assemble the evidence document for `query`
    ///
    /// Output blocks, joined by newlines: answer header, comparison table (only
    /// for comparison queries spanning two or more sections), one block per
    /// section with surviving text, and a coverage note.
    pub fn synthesize(&self, query: &str, retrieved: &[RetrievedPassage]) -> String {
        if retrieved.is_empty() {
            return format!(
                "{}\n\n**Coverage Note:** No relevant passages were retrieved (**0 retrieved passages**).",
                self.corpus.refusal
            );
        }

        let groups = group_by_section(retrieved);

        let mut blocks = Vec::with_capacity(groups.len() * 2 + 3);
        blocks.push(format!("## Answer: **{}**\n", query));

        if is_comparison_query(query) && groups.len() >= 2 {
            let sections: Vec<&str> = groups.iter().map(|g| g.section).collect();
            blocks.push(comparison_table(&sections));
        }

        for group in &groups {
            let passage_ids: Vec<&str> = group
                .passages
                .iter()
                .filter(|p| clean_passage(&p.text).is_some())
                .map(|p| p.passage_id.as_str())
                .collect();

            if passage_ids.is_empty() {
                tracing::debug!("Section '{}' has no usable text after cleaning", group.section);
                continue;
            }

            let prose = clean_and_merge(group.passages.iter().map(|p| p.text.as_str()));

            blocks.push(format!("### {}", group.section));
            blocks.push(format!(
                "{}\n_(Source: {}, passages {})_\n",
                prose,
                group.section,
                passage_ids.join(", ")
            ));
        }

        blocks.push(self.coverage_note(retrieved.len()));
        blocks.join("\n")
    }

    fn coverage_note(&self, passage_count: usize) -> String {
        format!(
            "---\n\
             **Coverage Note:** This answer is based on **{} retrieved passages** from the {}.\n\n\
             **Grounding Guarantee:** The response is strictly derived from the provided {}. \
             No external knowledge or assumptions were used.",
            passage_count, self.corpus.title, self.corpus.short_name
        )
    }
}

/// Group by each passage's own section label, in first-seen order
fn group_by_section(passages: &[RetrievedPassage]) -> Vec<SectionGroup<'_>> {
    let mut groups: Vec<SectionGroup<'_>> = Vec::new();

    for passage in passages {
        let section = if passage.section.is_empty() {
            DEFAULT_SECTION
        } else {
            passage.section.as_str()
        };

        match groups.iter_mut().find(|g| g.section == section) {
            Some(group) => group.passages.push(passage),
            None => groups.push(SectionGroup {
                section,
                passages: vec![passage],
            }),
        }
    }

    groups
}

/// Passage IDs cited in an evidence document's section footers, in order
pub fn cited_passage_ids(evidence: &str) -> Vec<String> {
    CITATION_FOOTER
        .captures_iter(evidence)
        .flat_map(|caps| {
            caps["ids"]
                .split(", ")
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}
