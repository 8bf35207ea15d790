use std::io::{self, BufRead, Write};

use crate::cli::reporter::{BOLD, CYAN, GREEN, RESET, YELLOW};
use crate::fixer::{ReviewAction, ReviewPrompt};
use crate::models::HardcodedString;

/// Raw operator keystroke for one reviewed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Yes,
    No,
    Edit,
    Quit,
}

fn parse_choice(input: &str) -> Option<Choice> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(Choice::Yes),
        "n" | "no" => Some(Choice::No),
        "e" | "edit" => Some(Choice::Edit),
        "q" | "quit" => Some(Choice::Quit),
        _ => None,
    }
}

/// Stdin-backed review prompter for interactive mode.
pub struct FixPrompter {
    use_colors: bool,
}

impl FixPrompter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn print_intro(&self, total: usize) {
        println!("\n🎮 INTERACTIVE MODE — {total} strings to review");
        println!("Commands:");
        println!("  [y] Yes - Apply this fix");
        println!("  [n] No - Skip this fix");
        println!("  [e] Edit - Customize the key name");
        println!("  [q] Quit - Exit interactive mode\n");
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn read_line(&self) -> String {
        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            // EOF quits rather than looping forever.
            Ok(0) => "q".to_string(),
            Ok(_) => input,
            Err(_) => "q".to_string(),
        }
    }
}

impl ReviewPrompt for FixPrompter {
    fn review(&mut self, item: &HardcodedString, position: usize, total: usize) -> ReviewAction {
        println!("\n[{position}/{total}] Priority: {}/10", item.priority);
        println!("File: {}", self.paint(CYAN, &format!("{}:{}", item.file, item.line)));
        println!("Text: {}", self.paint(BOLD, &format!("\"{}\"", item.text)));
        println!("Component: {}", item.component);
        println!("Suggested Key: {}", self.paint(GREEN, &item.suggested_key));

        loop {
            print!("{} ", self.paint(YELLOW, "\nAction [y/n/e/q]?"));
            let _ = io::stdout().flush();

            match parse_choice(&self.read_line()) {
                Some(Choice::Yes) => return ReviewAction::Accept,
                Some(Choice::No) => return ReviewAction::Skip,
                Some(Choice::Quit) => return ReviewAction::Quit,
                Some(Choice::Edit) => {
                    print!("Enter custom key name [{}]: ", item.suggested_key);
                    let _ = io::stdout().flush();
                    let custom = self.read_line().trim().to_string();
                    let key = if custom.is_empty() {
                        item.suggested_key.clone()
                    } else {
                        custom
                    };
                    return ReviewAction::Rename(key);
                }
                None => println!("Invalid choice. Please enter y/n/e/q"),
            }
        }
    }
}
