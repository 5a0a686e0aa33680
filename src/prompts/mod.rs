// src/prompts/mod.rs

//! The three prompts the orchestrator sends. Kept thin and data-only so the
//! rest of the crate never embeds natural-language text.

pub const SYSTEM: &str = "\
You are a nearly silent programming assistant that builds applications from \
a written specification. You answer only with the information requested, in \
exactly the format requested. You produce fully functional code and work \
through the application step by step. If you do not know an answer, you say \
you do not know.";

/// Asks for the file-structure plan as bare JSON.
pub fn plan_request(spec: &str, amendment: &str) -> String {
    let mut prompt = format!(
        r#"Design the file structure of the application described below. Output ONLY the
file structure, never any code.

Respond with a single JSON object mapping paths to contents: directory keys end
with a '/' and map to a nested object; file keys map to a one-line description
string. Always place everything inside one new top-level folder named after the
application. Do not add any explanation, acknowledgment, comment or markdown
styling. Say nothing but the JSON data.

Application specification:
{spec}"#
    );
    if !amendment.is_empty() {
        prompt.push_str("\n\nAdditional instructions from the operator:\n");
        prompt.push_str(amendment);
    }
    prompt
}

/// Asks for the literal contents of one planned file.
pub fn file_request(path: &str, description: &str, amendment: &str) -> String {
    let mut prompt = format!(
        r#"Using the specification provided earlier, write the contents of this file from
the structure you created:

{path}: {description}

Output only the literal file contents. No acknowledgment, no explanation, no
surrounding prose, and no ``` markdown delimiters."#
    );
    if !amendment.is_empty() {
        prompt.push_str("\n\nAdditional instructions from the operator:\n");
        prompt.push_str(amendment);
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amendment_is_appended_only_when_present() {
        let base = file_request("app/main.py", "entry point", "");
        assert!(!base.contains("Additional instructions"));

        let amended = file_request("app/main.py", "entry point", "use argparse");
        assert!(amended.starts_with(&base));
        assert!(amended.ends_with("use argparse"));
    }

    #[test]
    fn plan_request_embeds_the_spec() {
        let prompt = plan_request("a todo list CLI", "");
        assert!(prompt.contains("a todo list CLI"));
    }
}
