//! Line protocol spoken over the pinpop control socket.
//!
//! One request per line, one JSON reply per line:
//!
//! ```text
//! press [held_secs]
//! drag <dx> <dy> [<start_x> <start_y>]
//! release
//! state
//! ```

use crate::geom::{Offset, Point};
use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/pinpop.sock";

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Finger held on the trigger for `held` seconds (the minimum if omitted).
    Press { held: Option<f64> },
    /// Drag moved; `start` is the touch-down location of the gesture.
    Drag {
        translation: Offset,
        start: Option<Point>,
    },
    Release,
    State,
}

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Empty request")]
    Empty,
    #[error("Malformed request line: {0}")]
    Split(#[from] shell_words::ParseError),
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'{command}' takes {expected} arguments, got {got}")]
    Arity {
        command: &'static str,
        expected: &'static str,
        got: usize,
    },
    #[error("Invalid number: {0}")]
    Number(#[from] ParseFloatError),
    #[error("Number must be finite: {0}")]
    NotFinite(String),
}

fn numbers(args: &[String]) -> Result<Vec<f64>, ProtocolError> {
    args.iter()
        .map(|a| match a.parse::<f64>()? {
            n if n.is_finite() => Ok(n),
            _ => Err(ProtocolError::NotFinite(a.clone())),
        })
        .collect()
}

fn no_args(command: &'static str, args: &[String]) -> Result<(), ProtocolError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(ProtocolError::Arity {
            command,
            expected: "no",
            got: args.len(),
        })
    }
}

impl FromStr for Request {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words = shell_words::split(line)?;
        let (command, args) = words.split_first().ok_or(ProtocolError::Empty)?;

        match command.to_ascii_lowercase().as_str() {
            "press" => match numbers(args)?.as_slice() {
                [] => Ok(Self::Press { held: None }),
                [held] => Ok(Self::Press { held: Some(*held) }),
                _ => Err(ProtocolError::Arity {
                    command: "press",
                    expected: "0 or 1",
                    got: args.len(),
                }),
            },
            "drag" => match numbers(args)?.as_slice() {
                [dx, dy] => Ok(Self::Drag {
                    translation: Offset::new(*dx, *dy),
                    start: None,
                }),
                [dx, dy, sx, sy] => Ok(Self::Drag {
                    translation: Offset::new(*dx, *dy),
                    start: Some(Point::new(*sx, *sy)),
                }),
                _ => Err(ProtocolError::Arity {
                    command: "drag",
                    expected: "2 or 4",
                    got: args.len(),
                }),
            },
            "release" => no_args("release", args).map(|_| Self::Release),
            "state" => no_args("state", args).map(|_| Self::State),
            _ => Err(ProtocolError::UnknownCommand(command.clone())),
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Press { held: None } => write!(f, "press"),
            Self::Press { held: Some(h) } => write!(f, "press {}", h),
            Self::Drag { translation, start } => {
                write!(f, "drag {} {}", translation.width, translation.height)?;
                if let Some(s) = start {
                    write!(f, " {} {}", s.x, s.y)?;
                }
                Ok(())
            }
            Self::Release => write!(f, "release"),
            Self::State => write!(f, "state"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_requests() {
        let cases = vec![
            ("press", Request::Press { held: None }),
            ("PRESS 0.5", Request::Press { held: Some(0.5) }),
            (
                "drag 0 -104",
                Request::Drag {
                    translation: Offset::new(0.0, -104.0),
                    start: None,
                },
            ),
            (
                "  drag -70 0 25 25 ",
                Request::Drag {
                    translation: Offset::new(-70.0, 0.0),
                    start: Some(Point::new(25.0, 25.0)),
                },
            ),
            ("release", Request::Release),
            ("state", Request::State),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<Request>().unwrap(), expected, "{line}");
        }
    }

    #[test]
    fn test_display_is_parseable() {
        let req = Request::Drag {
            translation: Offset::new(-12.5, 3.0),
            start: Some(Point::new(10.0, 40.0)),
        };
        assert_eq!(req.to_string(), "drag -12.5 3 10 40");
        assert_eq!(req.to_string().parse::<Request>().unwrap(), req);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("".parse::<Request>(), Err(ProtocolError::Empty)));
        assert!(matches!(
            "spin".parse::<Request>(),
            Err(ProtocolError::UnknownCommand(c)) if c == "spin"
        ));
        assert!(matches!(
            "drag 1 2 3".parse::<Request>(),
            Err(ProtocolError::Arity { command: "drag", got: 3, .. })
        ));
        assert!(matches!(
            "drag up 2".parse::<Request>(),
            Err(ProtocolError::Number(_))
        ));
        assert!(matches!(
            "drag 0 0 nan 25".parse::<Request>(),
            Err(ProtocolError::NotFinite(n)) if n == "nan"
        ));
        assert!(matches!(
            "press inf".parse::<Request>(),
            Err(ProtocolError::NotFinite(_))
        ));
        assert!(matches!(
            "release now".parse::<Request>(),
            Err(ProtocolError::Arity { command: "release", .. })
        ));
        assert!(matches!(
            "drag \"1 2".parse::<Request>(),
            Err(ProtocolError::Split(_))
        ));
    }
}
