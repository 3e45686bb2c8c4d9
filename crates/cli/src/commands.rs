use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Questions and commands
    Chat,
    /// Commands only
    Command,
}

impl FromStr for Mode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(Mode::Chat),
            "command" => Ok(Mode::Command),
            _ => Err(()),
        }
    }
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Chat => "chat",
            Mode::Command => "command",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Stats,
    List,
    Delete(usize),
    Clear,
    Export(String),
    Import(String),
    SaveAs(String),
    Load(String),
    Backup,
    About,
    Version,
    /// Requested mode, validated when executed.
    Mode(String),
    Unknown,
}

pub const HELP: &[&str] = &[
    "Commands:",
    "/help                 show commands",
    "/exit or /quit        exit chatbot",
    "/stats                show knowledge size",
    "/list                 list all learned questions",
    "/delete <index>       delete a question by index",
    "/clear                clear knowledge base",
    "/export <file>        export knowledge base",
    "/import <file>        import knowledge base",
    "/saveas <file>        save current KB as file",
    "/load <file>          load KB from file",
    "/backup               create automatic backup",
    "/about                show bot info",
    "/version              show version",
    "/mode chat            chat + commands",
    "/mode command         commands only",
];

/// Parses a line starting with `/`. Names are case-insensitive; arguments
/// are taken verbatim.
pub fn parse(line: &str) -> Command {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(name) = parts.first() else {
        return Command::Unknown;
    };
    let arg = match parts.as_slice() {
        [_, arg] => Some(*arg),
        _ => None,
    };
    match (name.to_lowercase().as_str(), arg) {
        ("/help", _) => Command::Help,
        ("/exit" | "/quit", _) => Command::Exit,
        ("/stats", _) => Command::Stats,
        ("/list", _) => Command::List,
        ("/delete", Some(a)) if a.chars().all(|c| c.is_ascii_digit()) => {
            // Digits that overflow are still an index, just never a valid one.
            Command::Delete(a.parse().unwrap_or(usize::MAX))
        }
        ("/clear", _) => Command::Clear,
        ("/export", Some(a)) => Command::Export(a.to_string()),
        ("/import", Some(a)) => Command::Import(a.to_string()),
        ("/saveas", Some(a)) => Command::SaveAs(a.to_string()),
        ("/load", Some(a)) => Command::Load(a.to_string()),
        ("/backup", _) => Command::Backup,
        ("/about", _) => Command::About,
        ("/version", _) => Command::Version,
        ("/mode", Some(a)) => Command::Mode(a.to_string()),
        _ => Command::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(parse("/HELP"), Command::Help);
        assert_eq!(parse("/Quit"), Command::Exit);
        assert_eq!(parse("/stats extra"), Command::Stats);
    }

    #[test]
    fn delete_needs_a_single_numeric_argument() {
        assert_eq!(parse("/delete 3"), Command::Delete(3));
        assert_eq!(parse("/delete"), Command::Unknown);
        assert_eq!(parse("/delete -1"), Command::Unknown);
        assert_eq!(parse("/delete 1 2"), Command::Unknown);
        assert_eq!(
            parse("/delete 99999999999999999999999"),
            Command::Delete(usize::MAX)
        );
    }

    #[test]
    fn file_commands_keep_argument_case() {
        assert_eq!(parse("/export Out.json"), Command::Export("Out.json".into()));
        assert_eq!(parse("/load"), Command::Unknown);
        assert_eq!(parse("/mode Chat"), Command::Mode("Chat".into()));
    }

    #[test]
    fn mode_names() {
        assert_eq!("chat".parse::<Mode>(), Ok(Mode::Chat));
        assert_eq!("command".parse::<Mode>(), Ok(Mode::Command));
        assert!("Chat".parse::<Mode>().is_err());
    }

    #[test]
    fn unknown_commands() {
        assert_eq!(parse("/dance"), Command::Unknown);
        assert_eq!(parse("/"), Command::Unknown);
    }
}
