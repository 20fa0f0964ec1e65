use crate::application::ports::CommandDescription;

/// A slash command sent by a chat user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Start,
    Help,
    Upload,
    Entities,
    Amounts,
    Dates,
    Deadlines,
    Ask(String),
    Lang(Option<String>),
    Clear,
    Setup,
    Unknown(String),
}

impl ChatCommand {
    /// Parses `/name[@bot] args`. Returns `None` for text that is not a
    /// command at all.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let body = text.strip_prefix('/')?;

        let (head, args) = match body.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (body, ""),
        };
        let name = head.split('@').next().unwrap_or(head).to_lowercase();

        let command = match name.as_str() {
            "start" => ChatCommand::Start,
            "help" => ChatCommand::Help,
            "upload" => ChatCommand::Upload,
            "entities" => ChatCommand::Entities,
            "amounts" => ChatCommand::Amounts,
            "dates" => ChatCommand::Dates,
            "deadlines" => ChatCommand::Deadlines,
            "ask" => ChatCommand::Ask(args.to_string()),
            "lang" => ChatCommand::Lang(
                args.split_whitespace()
                    .next()
                    .map(|code| code.to_lowercase()),
            ),
            "clear" => ChatCommand::Clear,
            "setup" => ChatCommand::Setup,
            _ => ChatCommand::Unknown(name),
        };

        Some(command)
    }
}

/// Entries registered with the platform's command menu by `/setup`.
pub const COMMAND_MENU: [CommandDescription; 11] = [
    CommandDescription {
        command: "start",
        description: "Welcome message and bot introduction",
    },
    CommandDescription {
        command: "help",
        description: "Show all available commands",
    },
    CommandDescription {
        command: "upload",
        description: "Upload a PDF or DOCX document for analysis",
    },
    CommandDescription {
        command: "entities",
        description: "Extract all entities (parties, amounts, dates, terms)",
    },
    CommandDescription {
        command: "amounts",
        description: "Show only monetary amounts from the document",
    },
    CommandDescription {
        command: "dates",
        description: "Show only important dates from the document",
    },
    CommandDescription {
        command: "deadlines",
        description: "Show critical deadlines and due dates",
    },
    CommandDescription {
        command: "ask",
        description: "Ask questions about your document",
    },
    CommandDescription {
        command: "lang",
        description: "Change language (en/hi/bn)",
    },
    CommandDescription {
        command: "clear",
        description: "Clear current document from memory",
    },
    CommandDescription {
        command: "setup",
        description: "Set up bot commands menu",
    },
];
