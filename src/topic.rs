// src/topic.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PipelineError;

/// Topic domain selecting the canonical schema and the registry subsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicDomain {
    Travel,
    Politics,
    Sports,
    Cinema,
}

impl TopicDomain {
    pub const ALL: [TopicDomain; 4] = [Self::Travel, Self::Politics, Self::Sports, Self::Cinema];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Travel => "travel",
            Self::Politics => "politics",
            Self::Sports => "sports",
            Self::Cinema => "cinema",
        }
    }

    /// Search query used against the live source.
    pub fn default_query(&self) -> &'static str {
        match self {
            Self::Travel => "travel India",
            Self::Politics => "Karnataka politics",
            Self::Sports => "India sports",
            Self::Cinema => "cinema India",
        }
    }
}

impl fmt::Display for TopicDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopicDomain {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(t))
            .ok_or_else(|| PipelineError::UnknownTopic(t.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(" Sports ".parse::<TopicDomain>(), Ok(TopicDomain::Sports));
        assert_eq!("CINEMA".parse::<TopicDomain>(), Ok(TopicDomain::Cinema));
    }

    #[test]
    fn unknown_topic_is_rejected() {
        assert_eq!(
            "weather".parse::<TopicDomain>(),
            Err(PipelineError::UnknownTopic("weather".into()))
        );
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let s = serde_json::to_string(&TopicDomain::Politics).unwrap();
        assert_eq!(s, r#""politics""#);
    }
}
