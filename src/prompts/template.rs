// file: src/prompts/template.rs
// description: named placeholder substitution for prompt text
// reference: Internal code standards

/// Text with `{name}` placeholders.
///
/// Rendering is a single left-to-right pass: substituted values are never
/// re-scanned, so a question containing `{articles}` stays literal. Unknown
/// placeholders and unmatched braces are emitted unchanged.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn render(&self, values: &[(&str, &str)]) -> String {
        let mut output = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find('{') {
            output.push_str(&rest[..start]);
            let after = &rest[start + 1..];

            let Some(end) = after.find('}') else {
                output.push_str(&rest[start..]);
                rest = "";
                break;
            };

            let name = &after[..end];
            match values.iter().find(|(key, _)| *key == name) {
                Some((_, value)) => {
                    output.push_str(value);
                    rest = &after[end + 1..];
                }
                None => {
                    output.push('{');
                    rest = after;
                }
            }
        }

        output.push_str(rest);
        output
    }

    /// Placeholder names in order of first appearance.
    #[cfg(test)]
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                break;
            };

            let name = &after[..end];
            if is_identifier(name) && !names.contains(&name) {
                names.push(name);
            }
            rest = &after[end + 1..];
        }

        names
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_substitutes_values() {
        let template = PromptTemplate::new("Question: {question}\nKeywords:");
        let result = template.render(&[("question", "What causes gout?")]);
        assert_eq!(result, "Question: What causes gout?\nKeywords:");
    }

    #[test]
    fn test_render_is_single_pass() {
        let template = PromptTemplate::new("Q: {question}\nA: {articles}");
        let result = template.render(&[("question", "{articles}?"), ("articles", "none")]);
        assert_eq!(result, "Q: {articles}?\nA: none");
    }

    #[test]
    fn test_unknown_and_unmatched_braces_kept() {
        let template = PromptTemplate::new("{unknown} {question} {");
        let result = template.render(&[("question", "x")]);
        assert_eq!(result, "{unknown} x {");
    }

    #[test]
    fn test_placeholders() {
        let template = PromptTemplate::new("{question} {articles} {question} {not valid}");
        assert_eq!(template.placeholders(), vec!["question", "articles"]);
    }
}
