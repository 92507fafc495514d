/// Mouse cursor shapes every backend can display.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cursor {
    #[default]
    Arrow,
    /// Pointing hand, for clickable things.
    Pointer,
    /// Busy indicator.
    Wait,
    /// Text insertion I-beam.
    Write,
}

impl Cursor {
    /// All cursors in declaration order.
    pub const ALL: &'static [Cursor] = &[
        Cursor::Arrow,
        Cursor::Pointer,
        Cursor::Wait,
        Cursor::Write,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Arrow => "arrow",
            Self::Pointer => "pointer",
            Self::Wait => "wait",
            Self::Write => "write",
        }
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
