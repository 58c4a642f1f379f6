/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the search box content (may be empty).
    Search(String),
    Tag(String),
    Clear,
    More,
    Retry,
    Job(String),
    Back,
    Featured(Option<String>),
    Next,
    Prev,
    Login(String),
    Logout,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  search <text>       type into the search box (debounced)
  tag <name>          toggle a tag filter
  clear               clear search and filters
  more                load the next page
  retry               repeat the last failed request
  job <id>            open a job
  back                close the job view
  featured [country]  load featured jobs
  next | prev         move the featured carousel
  login <token>       store a bearer token
  logout              forget the stored token
  quit";

/// Parses one input line; `None` for blank or unknown input.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (word, rest) = match line.trim_start().split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (line.trim(), ""),
    };
    let arg = rest.trim();

    let command = match word.to_ascii_lowercase().as_str() {
        // Search keeps the raw text; normalization happens after the debounce.
        "search" | "s" => Command::Search(rest.to_string()),
        "tag" | "t" if !arg.is_empty() => Command::Tag(arg.to_string()),
        "clear" => Command::Clear,
        "more" | "m" => Command::More,
        "retry" | "r" => Command::Retry,
        "job" | "j" if !arg.is_empty() => Command::Job(arg.to_string()),
        "back" | "b" => Command::Back,
        "featured" | "f" => Command::Featured((!arg.is_empty()).then(|| arg.to_string())),
        "next" | "n" => Command::Next,
        "prev" | "p" => Command::Prev,
        "login" if !arg.is_empty() => Command::Login(arg.to_string()),
        "logout" => Command::Logout,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_keeps_raw_text() {
        assert_eq!(
            parse_command("search  Rust Dev \n"),
            Some(Command::Search(" Rust Dev ".to_string()))
        );
        assert_eq!(parse_command("search"), Some(Command::Search(String::new())));
    }

    #[test]
    fn arguments_are_trimmed() {
        assert_eq!(
            parse_command("tag   remote  "),
            Some(Command::Tag("remote".to_string()))
        );
        assert_eq!(
            parse_command("featured New Zealand"),
            Some(Command::Featured(Some("New Zealand".to_string())))
        );
        assert_eq!(parse_command("featured"), Some(Command::Featured(None)));
    }

    #[test]
    fn missing_required_argument_is_unknown() {
        assert_eq!(parse_command("job"), None);
        assert_eq!(parse_command("tag  "), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("dance"), None);
    }
}
