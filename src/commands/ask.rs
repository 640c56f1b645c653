use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};

pub struct AskCommand;

#[async_trait]
impl Command for AskCommand {
    fn name(&self) -> &str {
        "/ask"
    }

    fn aliases(&self) -> &[&str] {
        &["/again"]
    }

    fn description(&self) -> &str {
        "ask the oracle again"
    }

    async fn execute(&self, _ctx: &CommandContext<'_>) -> CommandResult {
        CommandResult::Ask
    }
}
