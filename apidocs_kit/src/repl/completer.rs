use clap::Command;
use reedline::{Completer, Span, Suggestion};
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

/// Values offered for command arguments, refreshed by the REPL after every
/// command.
#[derive(Debug, Clone, Default)]
pub struct CompletionIndex {
    pub sections: Vec<String>,
    /// Resources of the active section, offered to `open`.
    pub resources: Vec<String>,
    /// Current search results, offered to `pick`.
    pub picks: Vec<String>,
}

/// A completer for the REPL commands and their arguments.
pub struct NavCompleter {
    command: Command,
    index: Arc<RwLock<CompletionIndex>>,
}

impl NavCompleter {
    pub fn new(command: Command, index: Arc<RwLock<CompletionIndex>>) -> Self {
        Self { command, index }
    }

    fn subcommand_suggestions(&self, current_word: &str, span: Span) -> Vec<Suggestion> {
        self.command
            .get_subcommands()
            .filter(|sub_cmd| sub_cmd.get_name().starts_with(current_word))
            .map(|sub_cmd| Suggestion {
                value: sub_cmd.get_name().to_string(),
                description: sub_cmd.get_about().map(|s| s.to_string()),
                span,
                append_whitespace: true,
                ..Suggestion::default()
            })
            .chain(
                ["help", "exit"]
                    .into_iter()
                    .filter(|builtin| builtin.starts_with(current_word))
                    .map(|builtin| Suggestion {
                        value: builtin.to_string(),
                        description: None,
                        span,
                        append_whitespace: false,
                        ..Suggestion::default()
                    }),
            )
            .collect()
    }

    fn value_suggestions(&self, subcommand: &str, current_word: &str, span: Span) -> Vec<Suggestion> {
        let dynamic = self.index.read().ok().map(|index| match subcommand {
            "go" => index.sections.clone(),
            "open" => index.resources.clone(),
            "pick" => index.picks.clone(),
            _ => Vec::new(),
        });
        let mut values = dynamic.unwrap_or_default();

        // Fixed choices declared on the clap argument, e.g. `lang js|bash`.
        if let Some(sub_cmd) = self.command.get_subcommands().find(|sc| sc.get_name() == subcommand) {
            for arg in sub_cmd.get_positionals() {
                values.extend(arg.get_possible_values().iter().map(|pv| pv.get_name().to_string()));
            }
        }

        values
            .into_iter()
            .filter(|value| value.starts_with(current_word))
            .map(|value| Suggestion {
                value,
                description: None,
                span,
                append_whitespace: false,
                ..Suggestion::default()
            })
            .collect()
    }
}

impl Completer for NavCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let line_to_cursor = line.get(..pos).unwrap_or(line);

        let parts: Vec<String> = shlex::split(line_to_cursor)
            .unwrap_or_else(|| line_to_cursor.split_whitespace().map(String::from).collect());

        let (current_word, completed) = match parts.split_last() {
            Some((last, rest)) if !line_to_cursor.ends_with(' ') => (last.as_str(), rest),
            _ => ("", parts.as_slice()),
        };
        let span = Span::new(pos.saturating_sub(current_word.len()), pos);

        let suggestions = match completed {
            [] => self.subcommand_suggestions(current_word, span),
            [subcommand] => self.value_suggestions(subcommand, current_word, span),
            _ => Vec::new(),
        };

        // Deduplicate suggestions
        let mut seen_values = HashSet::new();
        suggestions
            .into_iter()
            .filter(|s| seen_values.insert(s.value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_cli::commands::ReplLine;
    use clap::CommandFactory;

    fn completer() -> NavCompleter {
        let index = CompletionIndex {
            sections: vec!["entities".into(), "edge-functions".into(), "storage".into()],
            resources: vec!["users".into(), "user_roles".into(), "posts".into()],
            picks: vec!["users".into()],
        };
        NavCompleter::new(ReplLine::command(), Arc::new(RwLock::new(index)))
    }

    fn values(suggestions: Vec<Suggestion>) -> Vec<String> {
        suggestions.into_iter().map(|s| s.value).collect()
    }

    #[test]
    fn completes_command_words() {
        let found = values(completer().complete("se", 2));
        assert_eq!(found, ["sections", "search"]);
        assert!(values(completer().complete("", 0)).contains(&"exit".to_string()));
    }

    #[test]
    fn completes_sections_and_resources() {
        assert_eq!(values(completer().complete("go e", 4)), ["entities", "edge-functions"]);
        assert_eq!(values(completer().complete("open user", 9)), ["users", "user_roles"]);
        assert_eq!(values(completer().complete("pick ", 5)), ["users"]);
    }

    #[test]
    fn completes_fixed_choices() {
        assert_eq!(values(completer().complete("lang ", 5)), ["js", "bash"]);
        assert_eq!(values(completer().complete("keys h", 6)), ["hide"]);
    }

    #[test]
    fn span_covers_the_current_word() {
        let suggestions = completer().complete("open po", 7);
        assert_eq!(suggestions[0].span, Span::new(5, 7));
    }
}
