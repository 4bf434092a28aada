//! Comparison intent detection and the section-name heuristic table

/// Query substrings that signal a comparison question
pub const COMPARISON_KEYWORDS: &[&str] = &["compare", "difference", "vs", "versus", "trade-off"];

/// Whether the query asks for a comparison (case-insensitive substring match)
pub fn is_comparison_query(query: &str) -> bool {
    let lower = query.to_lowercase();
    COMPARISON_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Rows of the high-level comparison table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aspect {
    Management,
    Flexibility,
    OperationalOverhead,
    DeploymentSpeed,
}

impl Aspect {
    /// Table rows in display order
    pub const ALL: [Aspect; 4] = [
        Aspect::Management,
        Aspect::Flexibility,
        Aspect::OperationalOverhead,
        Aspect::DeploymentSpeed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Aspect::Management => "Management",
            Aspect::Flexibility => "Flexibility",
            Aspect::OperationalOverhead => "Operational Overhead",
            Aspect::DeploymentSpeed => "Deployment Speed",
        }
    }

    /// Cell value for a section column
    ///
    /// Keyed only on whether the section *name* mentions "managed"; passage
    /// text is never consulted.
    pub fn value_for(&self, section: &str) -> &'static str {
        let managed = section.to_lowercase().contains("managed");
        match (self, managed) {
            (Aspect::Management, true) => "AWS-managed services",
            (Aspect::Management, false) => "User-managed components",
            (Aspect::Flexibility, true) => "Limited customization",
            (Aspect::Flexibility, false) => "High flexibility",
            (Aspect::OperationalOverhead, true) => "Lower",
            (Aspect::OperationalOverhead, false) => "Higher",
            (Aspect::DeploymentSpeed, true) => "Faster",
            (Aspect::DeploymentSpeed, false) => "Slower",
        }
    }
}

/// Render the comparison table for `sections` (columns in the given order)
pub(crate) fn comparison_table(sections: &[&str]) -> String {
    let mut lines = Vec::with_capacity(Aspect::ALL.len() + 3);
    lines.push("### High-level Comparison\n".to_string());
    lines.push(format!("| Aspect | {} |", sections.join(" | ")));
    lines.push(format!("|------|{}|", vec!["---"; sections.len()].join("|")));

    for aspect in Aspect::ALL {
        let cells: Vec<&str> = sections.iter().map(|s| aspect.value_for(s)).collect();
        lines.push(format!("| {} | {} |", aspect.label(), cells.join(" | ")));
    }

    lines.join("\n") + "\n"
}
