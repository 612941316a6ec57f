//! Prompt construction for changelog generation.

use crate::models::AvatarMap;

/// Opening instruction sent ahead of the diffs.
const INSTRUCTIONS: &str = "Generate a concise changelog based on the following diffs. \
Make sure to group the changes by each developer with their profile picture in markdown:";

/// Separator between the instructions, diffs and the avatar list.
const AVATAR_PREAMBLE: &str = "Here is a map of all the developer profile pictures:";

/// Render the avatar map as `user:{handle}  profile picture:{url}` lines,
/// each preceded by a newline, in map order.
pub fn serialize_avatars(avatars: &AvatarMap) -> String {
    avatars
        .iter()
        .map(|(login, url)| format!("\nuser:{login}  profile picture:{url}"))
        .collect()
}

/// Build the single user message: instructions, diffs separated by a blank
/// line, then the avatar list.
pub fn build_prompt(diffs: &[String], avatars: &AvatarMap) -> String {
    format!(
        "{INSTRUCTIONS} {} {AVATAR_PREAMBLE}{}",
        diffs.join("\n\n"),
        serialize_avatars(avatars)
    )
}
