// Copyright contributors to the TeleSABRE Replay Viewer project

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Routing primitive, classified by how many physical qubits its path spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    Swap,
    Teleport,
    Telegate,
}

impl OpKind {
    /// 2 qubits is a swap, 3 a teleport, anything else a telegate.
    pub fn from_len(len: usize) -> Self {
        match len {
            2 => Self::Swap,
            3 => Self::Teleport,
            _ => Self::Telegate,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Swap => "swap",
            Self::Teleport => "teleport",
            Self::Telegate => "telegate",
        }
    }
}

impl Display for OpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Swap => "Swap",
            Self::Teleport => "Teleport",
            Self::Telegate => "Telegate",
        };
        write!(f, "{name}")
    }
}

/// Consecutive qubit pairs along a path: `[a, b, c]` yields `(a, b)` and `(b, c)`.
pub fn consecutive_pairs(path: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    path.windows(2).map(|w| (w[0], w[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_length() {
        assert_eq!(OpKind::Swap, OpKind::from_len(2));
        assert_eq!(OpKind::Teleport, OpKind::from_len(3));
        assert_eq!(OpKind::Telegate, OpKind::from_len(4));
        assert_eq!("Swap", OpKind::from_len(2).to_string());
        assert_eq!("Teleport", OpKind::from_len(3).to_string());
        assert_eq!("Telegate", OpKind::from_len(4).to_string());
    }

    #[test]
    fn pairs_along_path() {
        let pairs: Vec<_> = consecutive_pairs(&[1, 3, 5]).collect();
        assert_eq!(vec![(1, 3), (3, 5)], pairs);
        assert_eq!(0, consecutive_pairs(&[7]).count());
        assert_eq!(0, consecutive_pairs(&[]).count());
    }
}
