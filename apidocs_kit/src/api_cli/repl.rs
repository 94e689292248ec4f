use crate::api_cli::commands::{self, ReplLine};
use crate::api_cli::error::Result;
use crate::api_cli::session::DocsSession;
use crate::repl::{CompletionIndex, NavCompleter};
use clap::CommandFactory;
use docs_core::Section;
use nu_ansi_term::{Color, Style};
use reedline::{
    default_emacs_keybindings, ColumnarMenu, Emacs, KeyCode, KeyModifiers, MenuBuilder, Reedline, ReedlineEvent,
    ReedlineMenu, Signal,
};
use std::borrow::Cow;
use std::sync::{Arc, RwLock};

/// Shows the current navigation path, e.g. `apidocs:entities/users>> `.
struct ReplPrompt {
    path: String,
}

impl reedline::Prompt for ReplPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        Cow::Owned(format!("apidocs:{}", self.path))
    }

    fn render_prompt_right(&self) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: reedline::PromptEditMode) -> Cow<str> {
        Cow::Borrowed(">> ")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        Cow::Borrowed("::: ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: reedline::PromptHistorySearch,
    ) -> Cow<str> {
        Cow::Borrowed("? ")
    }
}

fn completion_index(session: &DocsSession) -> CompletionIndex {
    CompletionIndex {
        sections: Section::ALL.iter().map(|s| s.key().to_string()).collect(),
        resources: session.resource_names(),
        picks: session.picker_names(),
    }
}

pub async fn start_repl(session: &mut DocsSession) -> Result<()> {
    let command = ReplLine::command();
    let index = Arc::new(RwLock::new(completion_index(session)));
    let completer = NavCompleter::new(command.clone(), Arc::clone(&index));

    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );

    let edit_mode = Box::new(Emacs::new(keybindings));

    let completion_menu = Box::new(
        ColumnarMenu::default()
            .with_name("completion_menu")
            .with_text_style(Style::new().fg(Color::White))
            .with_selected_text_style(Style::new().fg(Color::Black).on(Color::Green))
            .with_description_text_style(Style::new().fg(Color::Yellow)),
    );

    let mut line_editor = Reedline::create()
        .with_completer(Box::new(completer))
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_edit_mode(edit_mode);

    println!("Welcome to the interactive API docs. Type 'help' for a list of commands, or 'exit' to quit.");

    let mut prompt = ReplPrompt {
        path: session.nav().path().to_string(),
    };

    loop {
        let sig = line_editor.read_line(&prompt)?;

        match sig {
            Signal::Success(buffer) => {
                let line = buffer.trim();
                if line.is_empty() {
                    continue;
                }

                if line == "exit" || line == "quit" {
                    break;
                }

                if line == "help" {
                    let _ = command.clone().print_help();
                    continue;
                }

                match commands::parse_line(line) {
                    Ok(repl_command) => match session.execute(repl_command).await {
                        Ok(output) => println!("{}", output),
                        Err(e) => eprintln!("Error: {}", e),
                    },
                    Err(e) => {
                        eprintln!("{}", e);
                    }
                }

                prompt.path = session.nav().path().to_string();
                if let Ok(mut shared) = index.write() {
                    *shared = completion_index(session);
                }
            }
            Signal::CtrlD | Signal::CtrlC => {
                break;
            }
        }
    }

    Ok(())
}
