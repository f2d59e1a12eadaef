//! Handle catalog: the nine interaction affordances of the selection overlay.
//!
//! Each resize handle knows which dimensions it changes, in which direction a
//! positive pointer delta pushes them, and which corner must stay pinned in
//! world space while a rotated target is resized. The rotate handle only
//! changes the angle and takes no part in the anchor math.

#[cfg(test)]
#[path = "handle_test.rs"]
mod handle_test;

use serde::{Deserialize, Serialize};

use crate::geometry::Corner;

/// A logical handle on the selection overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
    Rotate,
}

/// How a pointer delta along one axis affects a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// The dimension is left untouched.
    None,
    /// Positive delta grows the dimension (east / south edges).
    Grow,
    /// Positive delta shrinks the dimension (west / north edges).
    Shrink,
}

impl Sign {
    /// Multiplier applied to the raw delta.
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Grow => 1.0,
            Self::Shrink => -1.0,
        }
    }

    #[must_use]
    pub fn affects(self) -> bool {
        self != Self::None
    }
}

/// Static description of what a handle does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleSpec {
    /// Effect of the local-frame x delta on width.
    pub width: Sign,
    /// Effect of the local-frame y delta on height.
    pub height: Sign,
    /// Corner pinned in world space during a rotated, non-centered resize.
    pub anchor: Option<Corner>,
    /// Whether the anchor-preserving rotation math applies to this handle.
    pub rotation_aware: bool,
}

impl Handle {
    /// The eight resize handles.
    pub const RESIZE: [Handle; 8] = [Self::N, Self::Ne, Self::E, Self::Se, Self::S, Self::Sw, Self::W, Self::Nw];

    /// Look up this handle's entry in the catalog.
    #[must_use]
    pub fn spec(self) -> HandleSpec {
        use Sign::{Grow, Shrink};
        let (width, height, anchor) = match self {
            Self::E => (Grow, Sign::None, Some(Corner::TopLeft)),
            Self::S => (Sign::None, Grow, Some(Corner::TopLeft)),
            Self::Se => (Grow, Grow, Some(Corner::TopLeft)),
            Self::W => (Shrink, Sign::None, Some(Corner::TopRight)),
            Self::Sw => (Shrink, Grow, Some(Corner::TopRight)),
            Self::Ne => (Grow, Shrink, Some(Corner::BottomLeft)),
            Self::N => (Sign::None, Shrink, Some(Corner::BottomRight)),
            Self::Nw => (Shrink, Shrink, Some(Corner::BottomRight)),
            Self::Rotate => (Sign::None, Sign::None, None),
        };
        HandleSpec { width, height, anchor, rotation_aware: anchor.is_some() }
    }

    /// Anchor corner for rotation-aware resizing; `None` for the rotate handle.
    #[must_use]
    pub fn anchor(self) -> Option<Corner> {
        self.spec().anchor
    }

    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(self, Self::Ne | Self::Se | Self::Sw | Self::Nw)
    }
}

/// What a session manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "handle", rename_all = "lowercase")]
pub enum HandleKind {
    /// Pointer went down on the target body.
    Move,
    /// Pointer went down on one of the eight resize handles.
    Resize(Handle),
    /// Pointer went down on the rotate handle.
    Rotate,
}

impl HandleKind {
    /// The kind a pointer-down on `handle` starts.
    #[must_use]
    pub fn from_handle(handle: Handle) -> Self {
        match handle {
            Handle::Rotate => Self::Rotate,
            other => Self::Resize(other),
        }
    }

    /// Fold `Resize(Rotate)` into `Rotate`.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Resize(handle) => Self::from_handle(handle),
            other => other,
        }
    }

    /// The overlay handle backing this kind, if any.
    #[must_use]
    pub fn handle(self) -> Option<Handle> {
        match self.normalized() {
            Self::Move => None,
            Self::Resize(handle) => Some(handle),
            Self::Rotate => Some(Handle::Rotate),
        }
    }
}

/// Which handles the overlay offers for a target. All enabled by default.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleSet {
    pub n: bool,
    pub ne: bool,
    pub e: bool,
    pub se: bool,
    pub s: bool,
    pub sw: bool,
    pub w: bool,
    pub nw: bool,
    #[serde(alias = "r")]
    pub rotate: bool,
}

impl Default for HandleSet {
    fn default() -> Self {
        Self::all()
    }
}

impl HandleSet {
    #[must_use]
    pub fn all() -> Self {
        Self { n: true, ne: true, e: true, se: true, s: true, sw: true, w: true, nw: true, rotate: true }
    }

    #[must_use]
    pub fn contains(&self, handle: Handle) -> bool {
        match handle {
            Handle::N => self.n,
            Handle::Ne => self.ne,
            Handle::E => self.e,
            Handle::Se => self.se,
            Handle::S => self.s,
            Handle::Sw => self.sw,
            Handle::W => self.w,
            Handle::Nw => self.nw,
            Handle::Rotate => self.rotate,
        }
    }

    /// Copy of this set with `handle` switched on or off.
    #[must_use]
    pub fn with(mut self, handle: Handle, enabled: bool) -> Self {
        let slot = match handle {
            Handle::N => &mut self.n,
            Handle::Ne => &mut self.ne,
            Handle::E => &mut self.e,
            Handle::Se => &mut self.se,
            Handle::S => &mut self.s,
            Handle::Sw => &mut self.sw,
            Handle::W => &mut self.w,
            Handle::Nw => &mut self.nw,
            Handle::Rotate => &mut self.rotate,
        };
        *slot = enabled;
        self
    }}
