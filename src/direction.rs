use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::MqueueError;

/// One end of a redis list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum End {
    Left,
    Right,
}

impl End {
    pub fn pop_command(self) -> &'static str {
        match self {
            End::Left => "LPOP",
            End::Right => "RPOP",
        }
    }

    pub fn push_command(self) -> &'static str {
        match self {
            End::Left => "LPUSH",
            End::Right => "RPUSH",
        }
    }

    /// Argument form used by `LMOVE`.
    pub fn as_arg(self) -> &'static str {
        match self {
            End::Left => "LEFT",
            End::Right => "RIGHT",
        }
    }
}

/// Which end of the source is popped and which end of the destination is pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    #[serde(rename = "LTR")]
    LeftToRight,
    #[serde(rename = "RTL")]
    RightToLeft,
    #[serde(rename = "LTL")]
    LeftToLeft,
    #[serde(rename = "RTR")]
    RightToRight,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::LeftToRight,
        Direction::RightToLeft,
        Direction::LeftToLeft,
        Direction::RightToRight,
    ];

    /// Returns `(pop end, push end)`.
    pub fn ends(self) -> (End, End) {
        match self {
            Direction::LeftToRight => (End::Left, End::Right),
            Direction::RightToLeft => (End::Right, End::Left),
            Direction::LeftToLeft => (End::Left, End::Left),
            Direction::RightToRight => (End::Right, End::Right),
        }
    }

    pub fn pop_end(self) -> End {
        self.ends().0
    }

    pub fn push_end(self) -> End {
        self.ends().1
    }

    /// Returns `(pop command, push command)`.
    pub fn commands(self) -> (&'static str, &'static str) {
        (self.pop_end().pop_command(), self.push_end().push_command())
    }

    pub fn code(self) -> &'static str {
        match self {
            Direction::LeftToRight => "LTR",
            Direction::RightToLeft => "RTL",
            Direction::LeftToLeft => "LTL",
            Direction::RightToRight => "RTR",
        }
    }
}

impl FromStr for Direction {
    type Err = MqueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Direction::ALL
            .into_iter()
            .find(|direction| direction.code() == code)
            .ok_or_else(|| MqueueError::InvalidDirection(s.to_string()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
