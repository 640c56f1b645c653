//! REPL commands prefixed with `/`.
//!
//! Commands implement the [`Command`] trait and are registered in a
//! [`CommandRegistry`]. The registry handles dispatch, alias resolution,
//! and help generation. Anything that is not a command counts as a
//! question for the oracle.

mod answer;
mod ask;
mod help;
mod quit;

use async_trait::async_trait;
use std::sync::Arc;

use crate::presenter::LoadController;

/// What commands can see while they run.
pub struct CommandContext<'a> {
    pub controller: &'a LoadController,
    pub api_url: &'a str,
}

/// What the REPL should do after a command runs.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Not a command: treat the input as a question.
    NotACommand,
    /// Command handled, continue the REPL loop.
    Handled,
    /// Ask the oracle (same as pressing the action control).
    Ask,
    /// Exit the REPL.
    Quit,
}

/// A REPL command. Implement this trait to add new commands.
#[async_trait]
pub trait Command: Send + Sync {
    /// Primary name, e.g. `"/answer"`.
    fn name(&self) -> &str;

    /// Alternative names, e.g. `&["/h", "/?"]`.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// One-line description for `/help`.
    fn description(&self) -> &str;

    async fn execute(&self, ctx: &CommandContext<'_>) -> CommandResult;
}

/// Holds registered commands.
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a registry with all built-in commands.
    pub fn new() -> Self {
        let commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(help::HelpCommand),
            Arc::new(ask::AskCommand),
            Arc::new(answer::AnswerCommand),
            Arc::new(quit::QuitCommand),
        ];
        Self { commands }
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.push(command);
    }

    /// Dispatch input to a matching command, or return `NotACommand`.
    pub async fn dispatch(&self, input: &str, ctx: &CommandContext<'_>) -> CommandResult {
        let cmd = input.trim();

        for command in &self.commands {
            if cmd == command.name() || command.aliases().contains(&cmd) {
                // /help lists the registry itself
                if command.name() == help::NAME {
                    print!("{}", self.help_text());
                    return CommandResult::Handled;
                }
                return command.execute(ctx).await;
            }
        }

        if cmd.starts_with('/') {
            println!("unknown command: {cmd}");
            println!("type /help for available commands");
            return CommandResult::Handled;
        }

        CommandResult::NotACommand
    }

    /// Whether `input` names the quit command or one of its aliases.
    pub fn is_quit(&self, input: &str) -> bool {
        let cmd = input.trim();
        self.commands
            .iter()
            .filter(|c| c.name() == quit::NAME)
            .any(|c| cmd == c.name() || c.aliases().contains(&cmd))
    }

    /// Generate help text from all registered commands.
    pub fn help_text(&self) -> String {
        let entries: Vec<(String, &str)> = self
            .commands
            .iter()
            .map(|c| (format_label(c.name(), c.aliases()), c.description()))
            .collect();

        let max_width = entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(10);

        let mut out = String::new();
        for (label, desc) in &entries {
            out.push_str(&format!("  {label:<max_width$}  {desc}\n"));
        }
        out.push_str(&format!(
            "  {:<max_width$}  ask the oracle\n",
            "<question>"
        ));
        out
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// All registered names and aliases (for duplicate detection).
    pub fn all_triggers(&self) -> Vec<&str> {
        let mut triggers = Vec::new();
        for cmd in &self.commands {
            triggers.push(cmd.name());
            triggers.extend_from_slice(cmd.aliases());
        }
        triggers
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn format_label(name: &str, aliases: &[&str]) -> String {
    if aliases.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, aliases.join(", "))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::alert::recording::RecordingAlerts;
    use crate::loader::mock::MockLoader;
    use crate::ui;
    use crate::view::View;
    use crate::view::recording::RecordingView;
    use std::sync::Weak;

    /// A controller with no loads scripted. Keep the view alive alongside it.
    pub(crate) fn test_controller() -> (Arc<RecordingView>, Arc<LoadController>) {
        let view = Arc::new(RecordingView::new());
        let (ui, _loop) = ui::channel();
        let weak: Weak<dyn View> = Arc::downgrade(&view) as Weak<dyn View>;
        let controller = LoadController::new(
            weak,
            Arc::new(MockLoader::new(vec![])),
            Arc::new(RecordingAlerts::new()),
            ui,
        );
        (view, controller)
    }

    pub(crate) const TEST_API_URL: &str = "http://127.0.0.1:9/api";

    #[test]
    fn all_builtins_registered() {
        let reg = CommandRegistry::new();
        let names = reg.names();
        assert!(names.contains(&"/help"));
        assert!(names.contains(&"/ask"));
        assert!(names.contains(&"/answer"));
        assert!(names.contains(&"/quit"));
    }

    #[test]
    fn no_duplicate_triggers() {
        let reg = CommandRegistry::new();
        let triggers = reg.all_triggers();
        let mut seen = Vec::new();
        for t in &triggers {
            assert!(!seen.contains(t), "duplicate trigger: {t}");
            seen.push(t);
        }
    }

    #[test]
    fn help_text_includes_all_commands_and_aliases() {
        let reg = CommandRegistry::new();
        let text = reg.help_text();
        for trigger in reg.all_triggers() {
            assert!(text.contains(trigger), "help missing: {trigger}");
        }
        assert!(text.contains("<question>"));
    }

    #[tokio::test]
    async fn help_is_handled() {
        let (_view, controller) = test_controller();
        let ctx = CommandContext {
            controller: &controller,
            api_url: TEST_API_URL,
        };
        let reg = CommandRegistry::new();
        assert_eq!(reg.dispatch("/?", &ctx).await, CommandResult::Handled);
    }

    #[tokio::test]
    async fn unknown_slash_command_is_handled() {
        let (_view, controller) = test_controller();
        let ctx = CommandContext {
            controller: &controller,
            api_url: TEST_API_URL,
        };
        let reg = CommandRegistry::new();
        assert_eq!(reg.dispatch("/foobar", &ctx).await, CommandResult::Handled);
    }

    #[tokio::test]
    async fn questions_pass_through() {
        let (_view, controller) = test_controller();
        let ctx = CommandContext {
            controller: &controller,
            api_url: TEST_API_URL,
        };
        let reg = CommandRegistry::new();
        assert_eq!(
            reg.dispatch("will it rain tomorrow?", &ctx).await,
            CommandResult::NotACommand
        );
        assert_eq!(reg.dispatch("", &ctx).await, CommandResult::NotACommand);
    }

    #[tokio::test]
    async fn plugin_command_works() {
        struct PingCommand;

        #[async_trait]
        impl Command for PingCommand {
            fn name(&self) -> &str {
                "/ping"
            }
            fn description(&self) -> &str {
                "pong"
            }
            async fn execute(&self, _ctx: &CommandContext<'_>) -> CommandResult {
                CommandResult::Handled
            }
        }

        let (_view, controller) = test_controller();
        let ctx = CommandContext {
            controller: &controller,
            api_url: TEST_API_URL,
        };
        let mut reg = CommandRegistry::new();
        reg.register(Arc::new(PingCommand));
        assert_eq!(reg.dispatch("/ping", &ctx).await, CommandResult::Handled);
        assert!(reg.help_text().contains("/ping"));
    }

    #[test]
    fn quit_triggers_are_recognised() {
        let reg = CommandRegistry::new();
        for input in ["/quit", " quit ", "exit", "/exit"] {
            assert!(reg.is_quit(input), "{input}");
        }
        for input in ["", "/ask", "should I quit?", "/help"] {
            assert!(!reg.is_quit(input), "{input}");
        }
    }

    #[test]
    fn format_label_with_aliases() {
        assert_eq!(format_label("/help", &["/h", "/?"]), "/help (/h, /?)");
        assert_eq!(format_label("/answer", &[]), "/answer");
    }
}
