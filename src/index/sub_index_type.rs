use std::fmt;

/// The branch a path takes into an atom's nested content.
///
/// `None` means the path stops at the atom itself. Every other variant names
/// one of the sub-lists an atom may own.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubIndexType {
    #[default]
    None,
    Nucleus,
    Superscript,
    Subscript,
    /// Only valid for fractions.
    Numerator,
    /// Only valid for fractions.
    Denominator,
    /// Only valid for radicals.
    Radicand,
    /// Only valid for radicals.
    Degree,
}

impl SubIndexType {
    pub const ALL: [SubIndexType; 8] = [
        SubIndexType::None,
        SubIndexType::Nucleus,
        SubIndexType::Superscript,
        SubIndexType::Subscript,
        SubIndexType::Numerator,
        SubIndexType::Denominator,
        SubIndexType::Radicand,
        SubIndexType::Degree,
    ];

    pub fn is_none(self) -> bool {
        self == SubIndexType::None
    }

    fn name(self) -> &'static str {
        match self {
            SubIndexType::None => "none",
            SubIndexType::Nucleus => "nucleus",
            SubIndexType::Superscript => "superscript",
            SubIndexType::Subscript => "subscript",
            SubIndexType::Numerator => "numerator",
            SubIndexType::Denominator => "denominator",
            SubIndexType::Radicand => "radicand",
            SubIndexType::Degree => "degree",
        }
    }
}

impl fmt::Display for SubIndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
