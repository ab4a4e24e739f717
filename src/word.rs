use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Letter {
    pub value: char,
}

impl Letter {
    pub fn new(value: char) -> Self {
        Self { value }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordError {
    #[error("word {id} was already evaluated as {}", outcome(.correct))]
    AlreadyEvaluated { id: u32, correct: bool },
}

fn outcome(correct: &bool) -> &'static str {
    if *correct {
        "correct"
    } else {
        "incorrect"
    }
}

/// A target word, spelled out letter by letter.
///
/// `active` marks the word currently being typed; at most one word in a list
/// should have it set, which is up to whoever owns the list. `correct` stays
/// `None` until the attempt is evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub id: u32,
    pub letters: Vec<Letter>,
    pub active: bool,
    correct: Option<bool>,
}

impl Word {
    pub fn new(id: u32, value: &str) -> Self {
        Self {
            id,
            letters: value.chars().map(Letter::new).collect(),
            active: false,
            correct: None,
        }
    }

    pub fn text(&self) -> String {
        self.letters.iter().map(|letter| letter.value).collect()
    }

    pub fn correct(&self) -> Option<bool> {
        self.correct
    }

    /// Records the result of typing this word. Only the first call in an
    /// evaluation cycle sticks.
    pub fn evaluate(&mut self, correct: bool) -> Result<(), WordError> {
        match self.correct {
            Some(previous) => Err(WordError::AlreadyEvaluated {
                id: self.id,
                correct: previous,
            }),
            None => {
                self.correct = Some(correct);
                Ok(())
            }
        }
    }

    /// Starts a new evaluation cycle.
    pub fn reset(&mut self) {
        self.correct = None;
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.letters
            .iter()
            .try_for_each(|letter| write!(f, "{}", letter.value))
    }
}
