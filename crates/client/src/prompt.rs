//! Terminal side of the accuracy/difficulty confirmation.
use std::io::Write;

use game_core::AccDiffData;
use runtime::PromptRequest;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Answer {
    Accept,
    Cancel,
    /// Positive adds accuracy, negative adds difficulty.
    Adjust(i32),
    Unknown,
}

fn parse_answer(line: &str) -> Answer {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "" | "y" | "yes" => Answer::Accept,
        "n" | "no" | "q" => Answer::Cancel,
        other if other.starts_with(['+', '-']) => other
            .parse::<i32>()
            .map(Answer::Adjust)
            .unwrap_or(Answer::Unknown),
        _ => Answer::Unknown,
    }
}

fn adjust(data: &mut AccDiffData, delta: i32) {
    if delta >= 0 {
        data.base.accuracy += delta;
    } else {
        data.base.difficulty += delta.abs();
    }
}

fn print_bundle(data: &AccDiffData) {
    println!("-- {} --", data.title);
    println!(
        "accuracy {} / difficulty {} (net {:+})",
        data.base.accuracy,
        data.base.difficulty,
        data.untargeted_total()
    );
    for target in &data.targets {
        let lock_on = if target.uses_lock_on() { " [lock on]" } else { "" };
        println!(
            "  vs {} (E-Def {}): net {:+}{}",
            target.name,
            target.e_defense,
            data.total_for(target),
            lock_on
        );
    }
}

/// Answers confirmation requests from stdin until the channel closes.
///
/// End of input cancels whatever is pending.
pub fn spawn_terminal_prompt(mut requests: mpsc::Receiver<PromptRequest>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(mut request) = requests.recv().await {
            print_bundle(&request.data);
            loop {
                print!("roll? [Y/n, +N accuracy, -N difficulty] ");
                let _ = std::io::stdout().flush();

                let Ok(Some(line)) = lines.next_line().await else {
                    request.cancel();
                    return;
                };
                match parse_answer(&line) {
                    Answer::Accept => {
                        request.accept_unchanged();
                        break;
                    }
                    Answer::Cancel => {
                        request.cancel();
                        break;
                    }
                    Answer::Adjust(delta) => {
                        adjust(&mut request.data, delta);
                        print_bundle(&request.data);
                    }
                    Answer::Unknown => println!("unrecognized answer: {}", line.trim()),
                }
            }
        }
    })
}
