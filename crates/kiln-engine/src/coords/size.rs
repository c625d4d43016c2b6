use std::fmt;

/// Integer extent of a window or framebuffer.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Size2D {
    pub width: u32,
    pub height: u32,
}

impl Size2D {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Size2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
