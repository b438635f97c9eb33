/// Declares a closed set of lowercase text tags stored in `TEXT` columns and
/// exchanged as JSON strings.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
            utoipa::ToSchema,
        )]
        #[serde(rename_all = "snake_case")]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::error::StorageError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    other => Err(crate::error::StorageError::Validation(format!(
                        concat!("unknown ", stringify!($name), " '{}'"),
                        other
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod award;
pub mod caller;
pub mod competition;
pub mod entrant;
pub mod judge;
pub mod judge_score;
pub mod ranking;
pub mod team;

pub use award::{Award, AwardCategory, AwardTargetKind, AwardType};
pub use caller::{Caller, Role};
pub use competition::{Competition, CompetitionFormat, CompetitionStatus};
pub use entrant::{EngagementCounters, Entrant, EntrantKind, EntrantOwner, EntrantStats};
pub use judge::Judge;
pub use judge_score::{Criterion, CriterionScores, JudgeScore, ScoreWeighting};
pub use ranking::RankingMode;
pub use team::Team;
