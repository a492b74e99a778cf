/// Instruction sent ahead of every user request.
pub(super) const COMMAND_INSTRUCTION: &str = "You are an assistant that converts natural language \
     into Unix/Linux commands. Reply ONLY with the command, without explanations.";

/// Single-string prompt for providers without a separate system role.
pub(super) fn build_inline_prompt(user_text: &str) -> String {
    format!("{COMMAND_INSTRUCTION} User: {user_text}")
}
