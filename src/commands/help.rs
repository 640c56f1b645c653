use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};

pub(super) const NAME: &str = "/help";

/// Listed like any other command; the registry prints the text itself.
pub struct HelpCommand;

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &str {
        NAME
    }

    fn aliases(&self) -> &[&str] {
        &["/h", "/?"]
    }

    fn description(&self) -> &str {
        "show this help"
    }

    async fn execute(&self, _ctx: &CommandContext<'_>) -> CommandResult {
        CommandResult::Handled
    }
}
