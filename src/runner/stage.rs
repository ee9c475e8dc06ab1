//! Pipeline stages.

use std::fmt;

/// A state of the install pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolving,
    ShortCircuit,
    Fetching,
    Patching,
    Assembling,
    Installing,
    Done,
}

impl Stage {
    /// Whether `next` may follow `self`.
    pub fn can_advance_to(self, next: Stage) -> bool {
        use Stage::*;
        matches!(
            (self, next),
            (Resolving, ShortCircuit)
                | (Resolving, Fetching)
                | (Fetching, Patching)
                | (Patching, Assembling)
                | (Assembling, Installing)
                | (Installing, Done)
        )
    }

    /// Whether the pipeline stops in this state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::ShortCircuit | Stage::Done)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Resolving => "resolving",
            Stage::ShortCircuit => "short-circuit",
            Stage::Fetching => "fetching",
            Stage::Patching => "patching",
            Stage::Assembling => "assembling",
            Stage::Installing => "installing",
            Stage::Done => "done",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_path_is_allowed() {
        let path = [
            Stage::Resolving,
            Stage::Fetching,
            Stage::Patching,
            Stage::Assembling,
            Stage::Installing,
            Stage::Done,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_advance_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn short_circuit_only_from_resolving() {
        assert!(Stage::Resolving.can_advance_to(Stage::ShortCircuit));
        assert!(!Stage::Fetching.can_advance_to(Stage::ShortCircuit));
        assert!(!Stage::Resolving.can_advance_to(Stage::Installing));
    }

    #[test]
    fn terminal_states() {
        assert!(Stage::ShortCircuit.is_terminal());
        assert!(Stage::Done.is_terminal());
        assert!(!Stage::Installing.is_terminal());
    }
}
