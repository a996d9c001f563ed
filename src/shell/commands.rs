//! Shell command parsing.

use crate::core::constants::{
    SHOP_FULL_REFILL_MAX_QUANTITY, SHOP_SINGLE_LIFE_MAX_QUANTITY, UNLIMITED_LIVES,
};

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Connect,
    Prospect,
    Cashout,
    /// Lives to purchase, already expanded from the shop item.
    Buy(u32),
    Status,
    Collection,
    History,
    Reset,
    Help,
    Quit,
}

/// Parse a line. Blank input yields `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let command = match verb.to_ascii_lowercase().as_str() {
        "connect" => Command::Connect,
        "p" | "prospect" | "draw" => Command::Prospect,
        "c" | "cashout" | "bank" => Command::Cashout,
        "buy" => Command::Buy(parse_buy(arg)?),
        "pack" => Command::Buy(parse_pack(arg)?),
        "s" | "status" => Command::Status,
        "collection" | "nfts" => Command::Collection,
        "history" | "recent" => Command::History,
        "reset" => Command::Reset,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
    };
    Ok(Some(command))
}

/// `buy [N]` buys single lives; `buy unlimited` switches to unlimited lives.
fn parse_buy(arg: Option<&str>) -> Result<u32, String> {
    match arg {
        None => Ok(1),
        Some(a) if a.eq_ignore_ascii_case("unlimited") => Ok(UNLIMITED_LIVES),
        Some(a) => {
            let n: u32 = a
                .parse()
                .map_err(|_| format!("'{}' is not a number of lives", a))?;
            Ok(n.clamp(1, SHOP_SINGLE_LIFE_MAX_QUANTITY))
        }
    }
}

/// `pack [N]` buys N five-life packs.
fn parse_pack(arg: Option<&str>) -> Result<u32, String> {
    let packs: u32 = match arg {
        None => 1,
        Some(a) => a
            .parse()
            .map_err(|_| format!("'{}' is not a number of packs", a))?,
    };
    Ok(5 * packs.clamp(1, SHOP_FULL_REFILL_MAX_QUANTITY))
}

pub const HELP_TEXT: &str = "\
Commands:
  connect           Connect the (demo) wallet
  p, prospect       Start a draw
  c, cashout        Bank the current prospect run
  buy [N]           Buy N lives (1-10)
  buy unlimited     Unlimited lives (demo)
  pack [N]          Buy N five-life packs (1-5)
  s, status         Show balances and lives
  collection        List collected NFTs
  history           Recent draws
  reset             Wipe all progress
  q, quit           Exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_is_no_command() {
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn test_aliases() {
        assert_eq!(parse_command("p"), Ok(Some(Command::Prospect)));
        assert_eq!(parse_command("PROSPECT"), Ok(Some(Command::Prospect)));
        assert_eq!(parse_command("bank"), Ok(Some(Command::Cashout)));
        assert_eq!(parse_command("exit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn test_buy_quantities_are_clamped() {
        assert_eq!(parse_command("buy"), Ok(Some(Command::Buy(1))));
        assert_eq!(parse_command("buy 3"), Ok(Some(Command::Buy(3))));
        assert_eq!(parse_command("buy 50"), Ok(Some(Command::Buy(10))));
        assert_eq!(parse_command("buy 0"), Ok(Some(Command::Buy(1))));
        assert_eq!(
            parse_command("buy unlimited"),
            Ok(Some(Command::Buy(UNLIMITED_LIVES)))
        );
        assert!(parse_command("buy lots").is_err());
    }

    #[test]
    fn test_packs_buy_five_each() {
        assert_eq!(parse_command("pack"), Ok(Some(Command::Buy(5))));
        assert_eq!(parse_command("pack 2"), Ok(Some(Command::Buy(10))));
        assert_eq!(parse_command("pack 9"), Ok(Some(Command::Buy(25))));
    }

    #[test]
    fn test_unknown_command() {
        assert!(parse_command("dance").is_err());
    }
}
