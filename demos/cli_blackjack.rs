//! CLI blackjack example.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use twentyone::{Game, GameOptions, Player};

const PLAYER: &str = "You";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    println!("Blackjack CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let mut game = Game::new(GameOptions::default().with_decks(2), seed);
    game.add_player(PLAYER, 500);

    loop {
        let chips = game.player(PLAYER).map_or(0, Player::chips);
        if chips == 0 {
            println!("You are out of chips. Game over.");
            break;
        }

        if game.shoe().needs_reshuffle() {
            println!("Shoe reshuffled.");
        }
        game.start_new_round();

        let Some(bet) = prompt_usize(&format!("Bet amount (1-{chips}, 0 to quit): ")) else {
            break;
        };
        if bet == 0 {
            println!("Goodbye.");
            break;
        }

        if let Some(player) = game.player_mut(PLAYER) {
            if let Err(err) = player.place_bet(bet) {
                println!("Bet error: {err}");
                continue;
            }
        }

        if let Err(err) = game.deal_initial_cards() {
            println!("Deal error: {err}");
            break;
        }

        if let Some(up) = game.dealer().upcard() {
            println!("Dealer shows {up}.");
        }

        if game.dealer().has_blackjack() {
            println!("Dealer has blackjack.");
        }

        while !game.dealer().has_blackjack() && game.active_player().is_some() {
            print!("{}", game.status(false));

            println!("{}", format_actions(&game));
            match prompt_line("Action: ").as_str() {
                "h" | "hit" => report(game.player_hit(PLAYER)),
                "s" | "stand" => report(game.player_stand(PLAYER)),
                "d" | "double" => report(game.player_double_down_hit(PLAYER)),
                "p" | "split" => report(game.player_split(PLAYER)),
                "u" | "surrender" => report(game.player_surrender(PLAYER)),
                "q" | "quit" => return,
                _ => println!("Unknown action."),
            }
        }

        if let Err(err) = game.dealer_play() {
            println!("Dealer error: {err}");
            break;
        }

        print!("{}", game.status(true));

        if let Some(player) = game.player(PLAYER) {
            let values = player.hand_values();
            for (i, hand) in player.hands().iter().enumerate() {
                if hand.is_surrendered() {
                    println!("Hand {}: Surrendered", i + 1);
                } else {
                    println!(
                        "Hand {} ({}): {}",
                        i + 1,
                        values[i],
                        game.evaluate_hand(hand)
                    );
                }
            }
        }

        game.payout_results();

        if let Some(player) = game.player(PLAYER) {
            let net: isize = player.hands().iter().map(|h| h.winnings()).sum();
            println!("Net result: {} (chips: {})\n", net, player.chips());
        }
    }
}

fn report<E: std::fmt::Display>(result: Result<(), E>) {
    if let Err(err) = result {
        println!("Action error: {err}");
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_usize(prompt: &str) -> Option<usize> {
    loop {
        let input = prompt_line(prompt);
        if input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<usize>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn format_actions(game: &Game) -> String {
    let Some(player) = game.player(PLAYER) else {
        return String::new();
    };

    let mut parts = Vec::new();
    parts.push(format_action("hit", "h", true));
    parts.push(format_action("stand", "s", true));
    parts.push(format_action("double", "d", player.can_double_down()));
    parts.push(format_action("split", "p", player.can_split()));
    parts.push(format_action("surrender", "u", player.can_surrender()));
    format!("Actions: {}", parts.join(" "))
}

fn format_action(label: &str, key: &str, allowed: bool) -> String {
    let text = format!("[{key}]{label}");
    if allowed {
        colorize(&text, "32")
    } else {
        colorize(&text, "90")
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}
