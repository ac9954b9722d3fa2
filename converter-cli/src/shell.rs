//! Interactive shell over one session.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

use converter_hex::ConversionSession;
use converter_types::{Notice, RateFetcher};

use crate::{parse_currency, print_currencies, print_history, print_notices, print_total};

const HELP: &str = "\
Commands:
  amount <value>     set the amount to convert
  from <code>        set the base currency (unlocked only)
  to <code>          set the target currency (unlocked only)
  convert [value]    convert the pending (or given) amount
  history            list recorded conversions
  total              show the running total
  clear              clear the history and unlock the pair
  status             show the pending input and lock state
  currencies         list supported currencies
  help               show this message
  quit               leave the shell";

/// Reads commands from stdin until `quit` or end of input.
pub async fn run<F: RateFetcher>(
    session: &mut ConversionSession<F>,
    notices: &mut UnboundedReceiver<Notice>,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Type `help` for commands.");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (word, arg) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let arg = arg.trim();

        match word {
            "" => {}
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "currencies" => print_currencies(),
            "amount" => session.set_amount(arg),
            "from" | "to" => set_currency(session, word, arg),
            "convert" => {
                if !arg.is_empty() {
                    session.set_amount(arg);
                }
                if let Ok(record) = session.convert().await {
                    println!("{}", record.summary());
                }
            }
            "history" => print_history(session),
            "total" => print_total(session),
            "clear" => {
                // Deletion failures arrive as a notice.
                let _ = session.clear_history().outcome().await;
            }
            "status" => print_status(session),
            other => println!("Unknown command `{}`; type `help`", other),
        }

        print_notices(notices);
    }

    Ok(())
}

fn set_currency<F: RateFetcher>(session: &mut ConversionSession<F>, which: &str, arg: &str) {
    let code = match parse_currency(arg) {
        Ok(code) => code,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };
    if session.is_locked() {
        println!(
            "Currency pair is locked to {} -> {} until history is cleared",
            session.from_currency(),
            session.to_currency()
        );
        return;
    }
    if which == "from" {
        session.set_from_currency(code);
    } else {
        session.set_to_currency(code);
    }
}

fn print_status<F: RateFetcher>(session: &ConversionSession<F>) {
    println!(
        "amount: {:?}  pair: {} -> {}  {:?}  entries: {}",
        session.pending_amount(),
        session.from_currency(),
        session.to_currency(),
        session.state(),
        session.history().len()
    );
    if let Some(result) = session.last_result() {
        println!("last result: {} {}", result, session.to_currency());
    }
}
