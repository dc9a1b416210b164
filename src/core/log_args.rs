//! Positional arguments of a log call

use super::event::{CapturedError, MessagePart};
use super::fields::FieldMap;

/// One positional argument: message text, an error, or a field map
#[derive(Debug, Clone, PartialEq)]
pub enum LogArg {
    Text(String),
    Error(CapturedError),
    Fields(FieldMap),
}

impl From<&str> for LogArg {
    fn from(s: &str) -> Self {
        LogArg::Text(s.to_string())
    }
}

impl From<String> for LogArg {
    fn from(s: String) -> Self {
        LogArg::Text(s)
    }
}

impl From<&String> for LogArg {
    fn from(s: &String) -> Self {
        LogArg::Text(s.clone())
    }
}

impl From<CapturedError> for LogArg {
    fn from(error: CapturedError) -> Self {
        LogArg::Error(error)
    }
}

impl From<FieldMap> for LogArg {
    fn from(fields: FieldMap) -> Self {
        LogArg::Fields(fields)
    }
}

impl From<MessagePart> for LogArg {
    fn from(part: MessagePart) -> Self {
        match part {
            MessagePart::Text(text) => LogArg::Text(text),
            MessagePart::Error(error) => LogArg::Error(error),
        }
    }
}

/// Ordered positional arguments of a log call.
///
/// Converts from a single argument, a tuple, an array or a `Vec`, so calls
/// read naturally:
///
/// ```
/// use rust_field_logger::{fields, LogArgs};
///
/// let args: LogArgs = ("Deploying", fields!("app" => "myapp")).into();
/// let (message, scoped) = args.split();
/// assert_eq!(message.len(), 1);
/// assert_eq!(scoped.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogArgs(Vec<LogArg>);

impl LogArgs {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn push(mut self, arg: impl Into<LogArg>) -> Self {
        self.0.push(arg.into());
        self
    }

    /// Append a trailing field map
    #[must_use]
    pub fn with_fields(self, fields: FieldMap) -> Self {
        self.push(fields)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Separate message parts from call-scoped fields.
    ///
    /// A trailing field map becomes the scoped fields. Field maps anywhere
    /// else are rendered to text and kept as message parts.
    pub fn split(self) -> (Vec<MessagePart>, FieldMap) {
        let mut args = self.0;
        let scoped = match args.pop() {
            Some(LogArg::Fields(fields)) => fields,
            Some(other) => {
                args.push(other);
                FieldMap::new()
            }
            None => FieldMap::new(),
        };

        let parts = args
            .into_iter()
            .map(|arg| match arg {
                LogArg::Text(text) => MessagePart::Text(text),
                LogArg::Error(error) => MessagePart::Error(error),
                LogArg::Fields(fields) => MessagePart::Text(fields.to_string()),
            })
            .collect();

        (parts, scoped)
    }

    /// Partition block output: every field map merges into `scoped`
    pub(crate) fn absorb(self, parts: &mut Vec<MessagePart>, scoped: &mut FieldMap) {
        for arg in self.0 {
            match arg {
                LogArg::Text(text) => parts.push(MessagePart::Text(text)),
                LogArg::Error(error) => parts.push(MessagePart::Error(error)),
                LogArg::Fields(fields) => scoped.extend_from(&fields),
            }
        }
    }
}

impl From<()> for LogArgs {
    fn from(_: ()) -> Self {
        LogArgs::new()
    }
}

impl From<&str> for LogArgs {
    fn from(s: &str) -> Self {
        LogArgs(vec![s.into()])
    }
}

impl From<String> for LogArgs {
    fn from(s: String) -> Self {
        LogArgs(vec![s.into()])
    }
}

impl From<&String> for LogArgs {
    fn from(s: &String) -> Self {
        LogArgs(vec![s.into()])
    }
}

impl From<CapturedError> for LogArgs {
    fn from(error: CapturedError) -> Self {
        LogArgs(vec![error.into()])
    }
}

impl From<FieldMap> for LogArgs {
    fn from(fields: FieldMap) -> Self {
        LogArgs(vec![fields.into()])
    }
}

impl From<LogArg> for LogArgs {
    fn from(arg: LogArg) -> Self {
        LogArgs(vec![arg])
    }
}

impl<T: Into<LogArg>> From<Vec<T>> for LogArgs {
    fn from(args: Vec<T>) -> Self {
        LogArgs(args.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<LogArg>, const N: usize> From<[T; N]> for LogArgs {
    fn from(args: [T; N]) -> Self {
        LogArgs(args.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<LogArg>, B: Into<LogArg>> From<(A, B)> for LogArgs {
    fn from((a, b): (A, B)) -> Self {
        LogArgs(vec![a.into(), b.into()])
    }
}

impl<A: Into<LogArg>, B: Into<LogArg>, C: Into<LogArg>> From<(A, B, C)> for LogArgs {
    fn from((a, b, c): (A, B, C)) -> Self {
        LogArgs(vec![a.into(), b.into(), c.into()])
    }
}

impl<A, B, C, D> From<(A, B, C, D)> for LogArgs
where
    A: Into<LogArg>,
    B: Into<LogArg>,
    C: Into<LogArg>,
    D: Into<LogArg>,
{
    fn from((a, b, c, d): (A, B, C, D)) -> Self {
        LogArgs(vec![a.into(), b.into(), c.into(), d.into()])
    }
}
