//! Status returned by script nodes.

/// The result of evaluating a script node.
///
/// # Round Semantics
///
/// A node performs at most the actions it describes within one tick:
/// - Conditions evaluate immediately (e.g., "Is the opponent X?")
/// - Actions resolve one combat round (e.g., "Cast skill Y")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The node completed and the encounter is still running.
    ///
    /// For conditions: The condition was met.
    /// For actions: The action was performed.
    Success,

    /// The node could not do what it describes.
    ///
    /// For conditions: The condition was not met.
    /// For actions: The action was unavailable (e.g., skill not known).
    Failure,

    /// The encounter is over, or the script asked to stop.
    ///
    /// Every composite returns `Halt` as soon as a child does, so nothing
    /// after the halting node is evaluated.
    Halt,
}

impl Status {
    /// Returns `true` if the encounter ended or the script stopped.
    #[inline]
    pub fn is_halt(self) -> bool {
        matches!(self, Status::Halt)
    }
}
