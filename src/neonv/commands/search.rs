use crate::commands::filter::{self, UnreadablePolicy};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::NoteStore;

pub fn run<S: NoteStore>(store: &S, query: &str, policy: UnreadablePolicy) -> Result<CmdResult> {
    let pass = filter::run(store, query, policy)?;

    let mut result = CmdResult::default();
    for path in &pass.unreadable {
        result.add_message(CmdMessage::warning(format!(
            "Skipped unreadable path: {}",
            path.display()
        )));
    }
    Ok(result.with_matches(pass.matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn reports_skipped_notes_as_warnings() {
        let store = StoreFixture::shopping_and_todo()
            .with_unreadable("secret.md")
            .store;
        let result = run(&store, "mom", UnreadablePolicy::Skip).unwrap();
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.messages.len(), 1);
        assert!(result.messages[0].content.contains("secret.md"));
    }

    #[test]
    fn no_messages_on_clean_pass() {
        let store = StoreFixture::shopping_and_todo().store;
        let result = run(&store, "milk", UnreadablePolicy::Skip).unwrap();
        assert!(result.messages.is_empty());
    }
}
