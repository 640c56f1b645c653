use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};

pub(super) const NAME: &str = "/quit";

pub struct QuitCommand;

#[async_trait]
impl Command for QuitCommand {
    fn name(&self) -> &str {
        NAME
    }

    fn aliases(&self) -> &[&str] {
        &["quit", "exit", "/exit"]
    }

    fn description(&self) -> &str {
        "leave the oracle"
    }

    async fn execute(&self, _ctx: &CommandContext<'_>) -> CommandResult {
        CommandResult::Quit
    }
}
