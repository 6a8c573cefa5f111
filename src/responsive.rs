//! Viewport breakpoint tracking.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when configuring breakpoints.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponsiveError {
    #[error("Breakpoints must be strictly increasing (sm={sm}, md={md}, lg={lg}, xl={xl})")]
    Unordered { sm: u32, md: u32, lg: u32, xl: u32 },
}

/// Lower bounds, in pixels, of each breakpoint above `xs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    pub sm: u32,
    pub md: u32,
    pub lg: u32,
    pub xl: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            sm: 576,
            md: 768,
            lg: 992,
            xl: 1200,
        }
    }
}

impl Breakpoints {
    pub fn validate(&self) -> Result<(), ResponsiveError> {
        if self.sm < self.md && self.md < self.lg && self.lg < self.xl {
            Ok(())
        } else {
            Err(ResponsiveError::Unordered {
                sm: self.sm,
                md: self.md,
                lg: self.lg,
                xl: self.xl,
            })
        }
    }

    /// The breakpoint whose half-open interval contains `width`.
    pub fn classify(&self, width: u32) -> Breakpoint {
        if width >= self.xl {
            Breakpoint::Xl
        } else if width >= self.lg {
            Breakpoint::Lg
        } else if width >= self.md {
            Breakpoint::Md
        } else if width >= self.sm {
            Breakpoint::Sm
        } else {
            Breakpoint::Xs
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    pub fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Xs => "xs",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
        }
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One flag per breakpoint; exactly one is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub xs: bool,
    pub sm: bool,
    pub md: bool,
    pub lg: bool,
    pub xl: bool,
}

impl From<Breakpoint> for ScreenSize {
    fn from(breakpoint: Breakpoint) -> Self {
        Self {
            xs: breakpoint == Breakpoint::Xs,
            sm: breakpoint == Breakpoint::Sm,
            md: breakpoint == Breakpoint::Md,
            lg: breakpoint == Breakpoint::Lg,
            xl: breakpoint == Breakpoint::Xl,
        }
    }
}

/// Tracks which breakpoint the viewport is in.
#[derive(Debug, Clone)]
pub struct Responsive {
    breakpoints: Breakpoints,
    listen: bool,
    width: u32,
    current: Breakpoint,
}

impl Responsive {
    /// Start tracking from the current viewport width.
    ///
    /// With `listen` off, later resizes are ignored.
    pub fn new(breakpoints: Breakpoints, width: u32, listen: bool) -> Result<Self, ResponsiveError> {
        breakpoints.validate()?;
        Ok(Self {
            breakpoints,
            listen,
            width,
            current: breakpoints.classify(width),
        })
    }

    /// Window resize notification. Returns true if the breakpoint changed.
    pub fn handle_resize(&mut self, width: u32) -> bool {
        if !self.listen {
            return false;
        }
        self.width = width;
        let next = self.breakpoints.classify(width);
        if next == self.current {
            return false;
        }
        tracing::debug!(width, from = %self.current, to = %next, "Breakpoint changed");
        self.current = next;
        true
    }

    pub fn set_listening(&mut self, listen: bool) {
        self.listen = listen;
    }

    pub fn is_listening(&self) -> bool {
        self.listen
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.current
    }

    pub fn screen(&self) -> ScreenSize {
        ScreenSize::from(self.current)
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }
}
