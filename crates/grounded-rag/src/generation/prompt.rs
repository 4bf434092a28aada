//! Prompt templates for grounded generation

/// Prompt builder for grounded answers
pub struct PromptBuilder;

impl PromptBuilder {
    /// System prompt restricting the model to the provided context
    ///
    /// `refusal` is the sentence the model must reply with verbatim when the
    /// context is insufficient.
    pub fn system_prompt(refusal: &str) -> String {
        format!(
            "You are a grounded RAG assistant.\n\
             You MUST answer ONLY using the provided context.\n\
             If the context does not contain sufficient information, reply EXACTLY with:\n\
             '{refusal}'\n\
             Do NOT add external knowledge. Do NOT speculate."
        )
    }

    /// User prompt carrying the question and the evidence document
    pub fn user_prompt(query: &str, context: &str) -> String {
        format!(
            r#"
QUESTION:
{query}

CONTEXT:
{context}

INSTRUCTIONS:
- Answer clearly and professionally
- Structure the response (headings / bullets) if helpful
- Cite section names when possible
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_quotes_refusal_verbatim() {
        let refusal = "This information is not available in the provided AWS RAG guide.";
        let prompt = PromptBuilder::system_prompt(refusal);
        assert!(prompt.contains(&format!("'{}'", refusal)));
        assert!(prompt.contains("ONLY using the provided context"));
    }

    #[test]
    fn test_user_prompt_embeds_context_unchanged() {
        let context = "## Answer: **q**\n\n### Retrievers\nAmazon Kendra is a search service.";
        let prompt = PromptBuilder::user_prompt("What retrievers exist?", context);
        assert!(prompt.contains("QUESTION:\nWhat retrievers exist?"));
        assert!(prompt.contains(context));
    }
}
