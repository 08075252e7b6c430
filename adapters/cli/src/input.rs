//! Conversion of raw mission input into command lines.

/// Splits `input` into command lines, dropping trailing blank lines.
///
/// Interior blank lines are kept so mission control can reject them.
pub(crate) fn split_commands(input: &str) -> Vec<&str> {
    let mut commands: Vec<&str> = input.lines().collect();
    while commands.last().is_some_and(|line| line.trim().is_empty()) {
        let _ = commands.pop();
    }
    commands
}
