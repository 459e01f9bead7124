//! The conversation loop.
//!
//! Line-oriented protocol:
//! - lines starting with `#` are commands (quit, score, help)
//! - everything else is a conversation turn routed through the engine

use crate::router;
use capquiz_core::{
    CountryDataset, Intent, Locale, QuizEngine, Reply, SessionStore, UserId,
};
use std::io::{self, BufRead};

/// Run the quiz conversation until the user quits or input ends.
pub fn run(
    dataset: &CountryDataset,
    locale: Locale,
    user_name: Option<String>,
) -> io::Result<()> {
    let engine = QuizEngine::new(dataset, locale);
    let mut store = SessionStore::new();
    let user = UserId::new();

    if let Some(name) = user_name {
        store.user_mut(user).1.user_name = Some(name);
    }

    println!("=== Name the Capital ===");
    println!("Commands:");
    println!("  #quit   - Exit the quiz");
    println!("  #score  - Show your best score");
    println!("  #help   - Show this help");
    println!();

    // Opening turn: greet (and maybe ask for a name).
    let reply = engine.welcome(store.user_mut(user).1);
    print_reply(&reply);
    store.set_expected(user, reply.expect);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('#') {
            match command.trim() {
                "quit" | "exit" => {
                    println!("{}", locale.messages().bye);
                    break;
                }
                "score" => match store.profile(user).and_then(|p| p.best_score) {
                    Some(best) => println!("[BEST] {best}"),
                    None => println!("[BEST] no finished games yet"),
                },
                "help" => {
                    println!("[HELP]");
                    println!("  #quit   - Exit the quiz");
                    println!("  #score  - Show your best score");
                    println!("  #help   - Show this help");
                    println!("  (anything else is part of the conversation)");
                }
                _ => println!("[ERROR] Unknown command. Type #help for help."),
            }
            continue;
        }

        let expected = store.expected(user).map(|e| e.action);
        let intent = router::route(line, expected, locale);
        tracing::debug!(?expected, ?intent, "routed input");
        let leaving = matches!(intent, Intent::Decline);
        store.tick(user);

        let (session, profile) = store.user_mut(user);
        match engine.dispatch(session, profile, intent) {
            Ok(reply) => {
                print_reply(&reply);
                store.set_expected(user, reply.expect);
                if leaving {
                    break;
                }
            }
            Err(e) => println!("[ERROR] {e}"),
        }
    }

    Ok(())
}

fn print_reply(reply: &Reply) {
    for line in reply.text.lines() {
        println!("{line}");
    }
    if !reply.suggestions.is_empty() {
        println!("({})", reply.suggestions.join(" / "));
    }
    println!();
}
