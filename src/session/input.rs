use crate::error::InputError;

/// Typing this (any case) ends the session.
pub const EXIT_SENTINEL: &str = "exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Exit,
    Message(String),
}

/// Classify one line of user input. Surrounding whitespace is dropped.
pub fn parse_input(raw: &str) -> Result<Input, InputError> {
    let text = raw.trim();
    if text.eq_ignore_ascii_case(EXIT_SENTINEL) {
        return Ok(Input::Exit);
    }
    if text.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(Input::Message(text.to_string()))
}
