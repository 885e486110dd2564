// Copyright contributors to the TeleSABRE Replay Viewer project

//! Semantic style records. The renderer decides *what* an element means this
//! iteration; the drawing layer maps that meaning onto colours and widths.

use std::fmt::Display;

use serde::Serialize;
use telesabre_common::OpKind;

use crate::config::OpacityLevels;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Color {
    Named(&'static str),
    Hsl { h: u16, s: u8, l: u8 },
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Named(name) => write!(f, "{name}"),
            Color::Hsl { h, s, l } => write!(f, "hsl({h}, {s}%, {l}%)"),
        }
    }
}

pub const WHITE: Color = Color::Named("white");
pub const BLACK: Color = Color::Named("black");
pub const GRAY: Color = Color::Named("gray");
pub const DIM_GRAY: Color = Color::Named("dimgray");
pub const PINK: Color = Color::Named("pink");
pub const GOLD: Color = Color::Named("gold");

/// What a physical or teleport link currently shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum LinkHighlight {
    #[default]
    Idle,
    /// A gate was executed across this link.
    AppliedGate,
    /// A routing operation of this kind used this link.
    Op(OpKind),
    /// A candidate row touching this link is under the pointer.
    Inspect,
}

impl LinkHighlight {
    /// Highlight for a link on an applied operation path of `len` qubits.
    pub fn for_op_len(len: usize) -> Self {
        match len {
            3 => Self::Op(OpKind::Teleport),
            4 => Self::Op(OpKind::Telegate),
            _ => Self::Op(OpKind::Swap),
        }
    }

    pub fn stroke(&self) -> Color {
        match self {
            Self::Idle => GRAY,
            Self::AppliedGate => Color::Named("green"),
            Self::Op(OpKind::Swap) => Color::Named("red"),
            Self::Op(OpKind::Teleport) => Color::Named("blue"),
            Self::Op(OpKind::Telegate) => Color::Named("purple"),
            Self::Inspect => BLACK,
        }
    }

    pub fn stroke_width(&self) -> f64 {
        match self {
            Self::Idle => 1.0,
            _ => 5.0,
        }
    }
}

/// Fill of a qubit node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeFill {
    /// The slot holds a logical qubit drawn in its palette colour.
    Occupied(Color),
    /// Padding slot, drawn unfilled.
    Vacant,
}

impl NodeFill {
    pub fn color(&self) -> Color {
        match self {
            Self::Occupied(color) => *color,
            Self::Vacant => WHITE,
        }
    }
}

/// Opacity tier of a gate or dependency edge in the circuit view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Emphasis {
    #[default]
    Dimmed,
    Pending,
    Front,
}

impl Emphasis {
    pub fn opacity(&self, levels: &OpacityLevels) -> f64 {
        match self {
            Self::Dimmed => levels.dimmed,
            Self::Pending => levels.pending,
            Self::Front => levels.front,
        }
    }
}
