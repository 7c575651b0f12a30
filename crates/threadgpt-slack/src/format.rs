use crate::types::ThreadData;

const THREAD_HEADER: &str = "--- SLACK THREAD CONTENT ---";
const THREAD_FOOTER: &str = "--- END OF SLACK THREAD ---";

/// Render a thread snapshot into the single textual block sent to the
/// completion API as one user turn.
///
/// Each message becomes a `{name}: {text}` line, where `{name}` is the bot
/// username when present and `User ({user_id})` otherwise.
pub fn format_thread(thread: &ThreadData) -> String {
    let mut formatted = format!("{}\n\n", THREAD_HEADER);

    for message in &thread.messages {
        let name = message
            .username
            .clone()
            .unwrap_or_else(|| format!("User ({})", message.user));
        formatted.push_str(&format!("{}: {}\n\n", name, message.text));
    }

    formatted.push_str(THREAD_FOOTER);
    formatted
}
