//! printf-style message formatting.
//!
//! Supports `%s` (any argument, display form), `%d` (integer argument) and
//! `%%` (a literal percent sign).

use std::fmt;

/// Argument substituted into a message template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageArg {
    Str(String),
    Int(i64),
}

impl fmt::Display for MessageArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageArg::Str(value) => f.write_str(value),
            MessageArg::Int(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for MessageArg {
    fn from(value: &str) -> Self {
        MessageArg::Str(value.to_owned())
    }
}

impl From<String> for MessageArg {
    fn from(value: String) -> Self {
        MessageArg::Str(value)
    }
}

impl From<i32> for MessageArg {
    fn from(value: i32) -> Self {
        MessageArg::Int(i64::from(value))
    }
}

impl From<i64> for MessageArg {
    fn from(value: i64) -> Self {
        MessageArg::Int(value)
    }
}

impl From<u32> for MessageArg {
    fn from(value: u32) -> Self {
        MessageArg::Int(i64::from(value))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("template expects more than {supplied} argument(s)")]
    MissingArgument { supplied: usize },

    #[error("%d expects an integer, got {found:?}")]
    NotAnInteger { found: String },

    #[error("unknown conversion %{0}")]
    UnknownConversion(char),

    #[error("template ends with a dangling %")]
    DanglingPercent,
}

/// Substitutes `args` into `template` in order.
///
/// Extra arguments are ignored.
pub fn format_message(template: &str, args: &[MessageArg]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut remaining = args.iter();
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let conversion = chars.next().ok_or(FormatError::DanglingPercent)?;
        match conversion {
            '%' => out.push('%'),
            's' => {
                let arg = remaining.next().ok_or(FormatError::MissingArgument {
                    supplied: args.len(),
                })?;
                out.push_str(&arg.to_string());
            }
            'd' => {
                let arg = remaining.next().ok_or(FormatError::MissingArgument {
                    supplied: args.len(),
                })?;
                match arg {
                    MessageArg::Int(value) => out.push_str(&value.to_string()),
                    MessageArg::Str(found) => {
                        return Err(FormatError::NotAnInteger {
                            found: found.clone(),
                        });
                    }
                }
            }
            other => return Err(FormatError::UnknownConversion(other)),
        }
    }

    Ok(out)
}
