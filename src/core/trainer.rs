//! # Trainer
//!
//! A small text-adventure drill: each exercise describes a situation and the
//! player types the keys that solve it. Lessons are static content.

use crate::core::path_input::LineBuffer;

#[derive(Debug, Clone, Copy)]
pub struct Exercise {
    pub prompt: &'static str,
    pub answer: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Lesson {
    pub title: &'static str,
    pub exercises: &'static [Exercise],
}

pub const LESSONS: &[Lesson] = &[
    Lesson {
        title: "The Cave of Motions",
        exercises: &[
            Exercise {
                prompt: "A goblin waits at the end of the line. Jump there.",
                answer: "$",
            },
            Exercise {
                prompt: "Retreat to the first non-blank character of the line.",
                answer: "^",
            },
            Exercise {
                prompt: "Leap forward three words to reach the door.",
                answer: "3w",
            },
        ],
    },
    Lesson {
        title: "The Forge of Edits",
        exercises: &[
            Exercise {
                prompt: "A cursed line blocks the path. Delete it whole.",
                answer: "dd",
            },
            Exercise {
                prompt: "Change the word under the cursor to break the spell.",
                answer: "ciw",
            },
            Exercise {
                prompt: "Undo your last mistake before the guard notices.",
                answer: "u",
            },
        ],
    },
];

/// Progress through one lesson.
#[derive(Debug, Clone, Default)]
pub struct TrainerSession {
    pub lesson: usize,
    pub exercise: usize,
    pub correct: usize,
    pub answer: LineBuffer,
    /// Feedback for the previous answer.
    pub feedback: Option<String>,
}

impl TrainerSession {
    pub fn start(lesson: usize) -> Self {
        Self {
            lesson,
            ..Default::default()
        }
    }

    pub fn lesson(&self) -> Option<&'static Lesson> {
        LESSONS.get(self.lesson)
    }

    pub fn current(&self) -> Option<&'static Exercise> {
        self.lesson().and_then(|l| l.exercises.get(self.exercise))
    }

    pub fn total(&self) -> usize {
        self.lesson().map_or(0, |l| l.exercises.len())
    }

    /// Check the typed answer and advance. Returns true when the lesson is over.
    pub fn submit(&mut self) -> bool {
        let Some(exercise) = self.current() else {
            return true;
        };
        let typed = self.answer.text();
        if typed.trim() == exercise.answer {
            self.correct += 1;
            self.feedback = Some("Correct!".to_string());
        } else {
            self.feedback = Some(format!("Not quite. The answer was `{}`.", exercise.answer));
        }
        self.answer.clear();
        self.exercise += 1;
        self.exercise >= self.total()
    }
}
