//! Line commands read by the event loop

use anyhow::{anyhow, bail, Result};
use chatboard_types::{parse_trigger_name, TriggerKind};

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/login NAME`
    Login(String),
    /// `/logout`
    Logout,
    /// `/refresh KIND`: broadcast an arbitrary trigger
    Refresh(TriggerKind),
    /// `/quit`
    Quit,
    /// `NAME: text`, or plain text from the session user
    Chat { sender: Option<String>, text: String },
}

/// Parse an input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if let Some(rest) = line.strip_prefix('/') {
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        let command = match name {
            "login" => {
                if arg.is_empty() {
                    bail!("usage: /login NAME");
                }
                Command::Login(arg.to_string())
            }
            "logout" => Command::Logout,
            "quit" | "exit" => Command::Quit,
            "refresh" => {
                let trigger = parse_trigger_name(arg)
                    .ok_or_else(|| anyhow!("unknown trigger: {:?}", arg))?;
                Command::Refresh(trigger)
            }
            other => bail!("unknown command: /{}", other),
        };
        return Ok(Some(command));
    }

    let command = match line.split_once(": ") {
        Some((sender, text)) if is_sender_name(sender) => Command::Chat {
            sender: Some(sender.to_string()),
            text: text.trim().to_string(),
        },
        _ => Command::Chat {
            sender: None,
            text: line.to_string(),
        },
    };
    Ok(Some(command))
}

fn is_sender_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slash_commands() {
        assert_eq!(
            parse_command("/login  ana ").unwrap(),
            Some(Command::Login("ana".to_string()))
        );
        assert_eq!(parse_command("/logout").unwrap(), Some(Command::Logout));
        assert_eq!(parse_command("/quit").unwrap(), Some(Command::Quit));
        assert_eq!(
            parse_command("/refresh timer").unwrap(),
            Some(Command::Refresh(TriggerKind::TIMER))
        );
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("/login").is_err());
        assert!(parse_command("/refresh later").is_err());
        assert!(parse_command("/dance").is_err());
    }

    #[test]
    fn test_parse_chat_lines() {
        assert_eq!(
            parse_command("bo: hello there").unwrap(),
            Some(Command::Chat {
                sender: Some("bo".to_string()),
                text: "hello there".to_string()
            })
        );
        assert_eq!(
            parse_command("well: not a name here: ok").unwrap(),
            Some(Command::Chat {
                sender: Some("well".to_string()),
                text: "not a name here: ok".to_string()
            })
        );
        assert_eq!(
            parse_command("good game all").unwrap(),
            Some(Command::Chat {
                sender: None,
                text: "good game all".to_string()
            })
        );
    }
}
