//! Self-check questions and open-ended scenarios
//!
//! A concept check locks on the first answer. Scenarios only toggle their
//! discussion notes.

use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOption {
    pub label: String,
    pub correct: bool,
}

impl QuizOption {
    pub fn new(label: impl Into<String>, correct: bool) -> Self {
        Self {
            label: label.into(),
            correct,
        }
    }
}

/// How an option is shown once the question is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    /// Not yet answered, or an unselected wrong option
    None,
    /// The chosen option, and it is correct
    Correct,
    /// The chosen option, and it is wrong
    Wrong,
    /// A correct option the reader did not pick
    Missed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConceptCheck {
    pub question: String,
    pub options: Vec<QuizOption>,
    pub explanation: String,
    pub hint: Option<String>,
    selected: Option<usize>,
    hint_open: bool,
}

impl ConceptCheck {
    pub fn new(
        question: impl Into<String>,
        options: Vec<QuizOption>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            options,
            explanation: explanation.into(),
            hint: None,
            selected: None,
            hint_open: false,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_answered(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_correct(&self) -> bool {
        self.selected
            .and_then(|i| self.options.get(i))
            .is_some_and(|o| o.correct)
    }

    /// First valid answer wins; later calls are ignored.
    pub fn answer(&mut self, index: usize) -> bool {
        if self.is_answered() || index >= self.options.len() {
            return false;
        }
        self.selected = Some(index);
        debug!(index, correct = self.is_correct(), "Concept check answered");
        true
    }

    /// Hint toggle is offered only before answering
    pub fn hint_available(&self) -> bool {
        self.hint.is_some() && !self.is_answered()
    }

    pub fn toggle_hint(&mut self) {
        if self.hint_available() {
            self.hint_open = !self.hint_open;
        }
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_available() && self.hint_open
    }

    pub fn mark(&self, index: usize) -> OptionMark {
        let (Some(selected), Some(option)) = (self.selected, self.options.get(index)) else {
            return OptionMark::None;
        };
        match (index == selected, option.correct) {
            (true, true) => OptionMark::Correct,
            (true, false) => OptionMark::Wrong,
            (false, true) => OptionMark::Missed,
            (false, false) => OptionMark::None,
        }
    }

    pub fn result_header(&self) -> Option<&'static str> {
        if !self.is_answered() {
            None
        } else if self.is_correct() {
            Some("Correct!")
        } else {
            Some("Not quite \u{2014} review the explanation below.")
        }
    }
}

/// Open-ended "what would you do" prompt
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub title: String,
    pub prompt: String,
    pub questions: Vec<String>,
    pub notes: Option<String>,
    notes_open: bool,
}

impl Scenario {
    pub fn new(title: impl Into<String>, prompt: impl Into<String>, questions: Vec<String>) -> Self {
        Self {
            title: title.into(),
            prompt: prompt.into(),
            questions,
            notes: None,
            notes_open: false,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn toggle_notes(&mut self) {
        if self.notes.is_some() {
            self.notes_open = !self.notes_open;
        }
    }

    pub fn notes_visible(&self) -> bool {
        self.notes.is_some() && self.notes_open
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.notes_open {
            "Hide discussion notes"
        } else {
            "Show discussion notes"
        }
    }
}

/// Questions shipped with the guide
pub fn concept_checks() -> Vec<ConceptCheck> {
    vec![
        ConceptCheck::new(
            "Which traffic can a SmartNIC on an NVL72 rack's InfiniBand ports observe?",
            vec![
                QuizOption::new("GPU-to-GPU NVLink traffic inside the rack", false),
                QuizOption::new("All-reduce traffic between racks", true),
                QuizOption::new("Per-GPU power draw", false),
                QuizOption::new("Kernel launches on each GPU", false),
            ],
            "NVLink traffic never leaves the rack's NVLink domain, so only inter-rack InfiniBand traffic crosses the NIC boundary.",
        )
        .with_hint("Think about where the IB boundary sits in the topology."),
        ConceptCheck::new(
            "Roughly how much training compute does a 70B-parameter model on 2T tokens need?",
            vec![
                QuizOption::new("8.4e20 FLOP", false),
                QuizOption::new("8.4e23 FLOP", true),
                QuizOption::new("8.4e26 FLOP", false),
            ],
            "6 \u{00D7} 70e9 parameters \u{00D7} 2e12 tokens = 8.4e23 FLOP.",
        )
        .with_hint("Use the 6 \u{00B7} N \u{00B7} D approximation."),
    ]
}

pub fn scenarios() -> Vec<Scenario> {
    vec![Scenario::new(
        "Verifying a declared training run",
        "A facility reports a 30-day run on 1,024 GB200 GPUs. You have BMC power telemetry and SmartNIC flow logs, but no host access.",
        vec![
            "Which signals would confirm the cluster was training rather than serving inference?".to_string(),
            "What could the operator hide inside the NVLink domain?".to_string(),
            "How would you bound the total compute from the energy consumed?".to_string(),
        ],
    )
    .with_notes(
        "Training shows a steady, synchronized power signature and periodic all-reduce bursts across racks. Energy divided by per-GPU power and peak throughput gives an upper bound on FLOP.",
    )]
}
