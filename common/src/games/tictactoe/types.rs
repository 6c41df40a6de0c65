use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const BOARD_SIDE: usize = 3;
pub const BOARD_SIZE: usize = BOARD_SIDE * BOARD_SIDE;

pub const CENTER: usize = 4;
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];
pub const EDGES: [usize; 4] = [1, 3, 5, 7];

/// Row-major 3x3 board, index = row * 3 + col.
pub type Board = [Mark; BOARD_SIZE];

pub const EMPTY_BOARD: Board = [Mark::Empty; BOARD_SIZE];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    Empty,
    Human,
    Ai,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::Human => Some(Mark::Ai),
            Mark::Ai => Some(Mark::Human),
            Mark::Empty => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::Human => 'X',
            Mark::Ai => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    HumanWins,
    AiWins,
    Draw,
}

impl Outcome {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::HumanWins => write!(f, "you win"),
            Outcome::AiWins => write!(f, "AI wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "Unknown difficulty '{}', expected easy, medium or hard",
                other
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstPlayerMode {
    Human,
    Ai,
    Random,
}

impl FromStr for FirstPlayerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(FirstPlayerMode::Human),
            "ai" => Ok(FirstPlayerMode::Ai),
            "random" => Ok(FirstPlayerMode::Random),
            other => Err(format!(
                "Unknown first player '{}', expected human, ai or random",
                other
            )),
        }
    }
}

/// Score of one root candidate in the hard search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub index: usize,
    pub score: i32,
}

impl Evaluation {
    pub fn new(index: usize, score: i32) -> Self {
        Self { index, score }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BotMove {
    pub index: usize,
    pub trace: Vec<Evaluation>,
}

impl BotMove {
    pub fn new(index: usize, trace: Vec<Evaluation>) -> Self {
        Self { index, trace }
    }

    pub fn untraced(index: usize) -> Self {
        Self::new(index, Vec::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Mark,
    pub cells: [usize; BOARD_SIDE],
}

impl WinningLine {
    pub fn new(mark: Mark, cells: [usize; BOARD_SIDE]) -> Self {
        Self { mark, cells }
    }
}
