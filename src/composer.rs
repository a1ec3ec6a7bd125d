use std::fmt;

/// The composers the classifier knows, with their class indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Composer {
    Unknown = 0,
    Bach = 1,
    Beethoven = 2,
    Chopin = 3,
    Mozart = 4,
}

impl Composer {
    pub const KNOWN: [Composer; 4] = [
        Composer::Bach,
        Composer::Beethoven,
        Composer::Chopin,
        Composer::Mozart,
    ];

    /// Matches the label exactly; anything unrecognised is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Bach" => Composer::Bach,
            "Beethoven" => Composer::Beethoven,
            "Chopin" => Composer::Chopin,
            "Mozart" => Composer::Mozart,
            _ => Composer::Unknown,
        }
    }

    pub fn class_index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Composer::Unknown => "Unknown",
            Composer::Bach => "Bach",
            Composer::Beethoven => "Beethoven",
            Composer::Chopin => "Chopin",
            Composer::Mozart => "Mozart",
        }
    }
}

impl fmt::Display for Composer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_class_indices() {
        assert_eq!(Composer::from_label("Bach").class_index(), 1);
        assert_eq!(Composer::from_label("Beethoven").class_index(), 2);
        assert_eq!(Composer::from_label("Chopin").class_index(), 3);
        assert_eq!(Composer::from_label("Mozart").class_index(), 4);
    }

    #[test]
    fn test_unknown_labels() {
        assert_eq!(Composer::from_label("Liszt"), Composer::Unknown);
        assert_eq!(Composer::from_label("bach").class_index(), 0);
        assert_eq!(Composer::from_label("").class_index(), 0);
    }

    #[test]
    fn test_names_round_trip() {
        for composer in Composer::KNOWN {
            assert_eq!(Composer::from_label(composer.name()), composer);
        }
    }
}
