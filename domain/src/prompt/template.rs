//! Prompt templates for the chat and command flows

/// Placeholder token replaced with caller-supplied argument text.
const ARGUMENTS_PLACEHOLDER: &str = "$ARGUMENTS";

/// Templates for the built-in prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// Default system prompt for the chat endpoint
    pub fn chat_system() -> &'static str {
        "You are a helpful AI assistant. Answer the user's questions carefully and thoroughly."
    }

    /// User prompt that kicks off a slash-command run
    pub fn command_kickoff(command: &str, arguments: &str) -> String {
        if arguments.is_empty() {
            format!("Run command: /{}", command)
        } else {
            format!("Run command: /{} {}", command, arguments)
        }
    }

    /// How a command invocation is recorded in the session history
    pub fn command_history_entry(command: &str, arguments: &str) -> String {
        if arguments.is_empty() {
            format!("/{}", command)
        } else {
            format!("/{} {}", command, arguments)
        }
    }
}

/// A named instructional template loaded from a command file (Value Object)
///
/// The body may contain `$ARGUMENTS` placeholders; [`render`](Self::render)
/// substitutes every occurrence with the caller's argument text and the
/// result is used as the system instruction for one completion call.
#[derive(Debug, Clone)]
pub struct CommandTemplate {
    name: String,
    body: String,
}

impl CommandTemplate {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Substitute `$ARGUMENTS` with the supplied text.
    pub fn render(&self, arguments: &str) -> String {
        self.body.replace(ARGUMENTS_PLACEHOLDER, arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_all_occurrences() {
        let template = CommandTemplate::new(
            "review",
            "Review the following: $ARGUMENTS\n\nFocus on: $ARGUMENTS",
        );
        let rendered = template.render("src/main.rs");
        assert_eq!(
            rendered,
            "Review the following: src/main.rs\n\nFocus on: src/main.rs"
        );
    }

    #[test]
    fn render_with_empty_arguments() {
        let template = CommandTemplate::new("summarize", "Summarize $ARGUMENTS now.");
        assert_eq!(template.render(""), "Summarize  now.");
    }

    #[test]
    fn render_without_placeholder_is_identity() {
        let template = CommandTemplate::new("plain", "No placeholders here.");
        assert_eq!(template.render("ignored"), "No placeholders here.");
    }

    #[test]
    fn command_kickoff_format() {
        assert_eq!(
            PromptTemplate::command_kickoff("review", "src/lib.rs"),
            "Run command: /review src/lib.rs"
        );
        assert_eq!(PromptTemplate::command_kickoff("status", ""), "Run command: /status");
    }

    #[test]
    fn command_history_entry_format() {
        assert_eq!(
            PromptTemplate::command_history_entry("review", "src/lib.rs"),
            "/review src/lib.rs"
        );
        assert_eq!(PromptTemplate::command_history_entry("status", ""), "/status");
    }
}
