use std::error::Error;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Importance {
    Low,
    #[default]
    Basic,
    Important,
}

impl Importance {
    pub const ALL: [Importance; 3] = [Importance::Low, Importance::Basic, Importance::Important];

    pub fn as_str(self) -> &'static str {
        match self {
            Importance::Low => "low",
            Importance::Basic => "basic",
            Importance::Important => "important",
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Importance {
    type Err = ParseImportanceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        let importance = match normalized.as_str() {
            "low" | "unimportant" => Importance::Low,
            "basic" | "normal" | "ordinary" => Importance::Basic,
            "important" | "high" => Importance::Important,
            _ => {
                return Err(ParseImportanceError {
                    value: value.to_string(),
                });
            }
        };

        Ok(importance)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseImportanceError {
    value: String,
}

impl fmt::Display for ParseImportanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid importance '{}': expected one of {}",
            self.value,
            Importance::ALL
                .iter()
                .map(|level| level.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl Error for ParseImportanceError {}
