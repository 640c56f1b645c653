use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};
use crate::presenter::LoadController;

pub struct AnswerCommand;

/// Both renderings of the current answer, one per line.
fn describe(controller: &LoadController) -> String {
    match (controller.formatted_answer(), controller.normalized_answer()) {
        (Some(formatted), Some(normalized)) => {
            format!("  formatted   {formatted}\n  normalized  {normalized}")
        }
        _ => "  no answer yet".to_string(),
    }
}

#[async_trait]
impl Command for AnswerCommand {
    fn name(&self) -> &str {
        "/answer"
    }

    fn description(&self) -> &str {
        "show the last answer"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> CommandResult {
        println!("{}", describe(ctx.controller));
        println!("  source      {}", ctx.api_url);
        CommandResult::Handled
    }
}
