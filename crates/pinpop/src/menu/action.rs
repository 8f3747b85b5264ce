use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumCount, EnumIter, EnumString};

/// The satellite buttons, in display order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    EnumCount,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[strum(to_string = "pin", serialize = "0")]
    Pin,
    #[strum(to_string = "share", serialize = "1")]
    Share,
    #[strum(to_string = "cross", serialize = "2")]
    Cross,
    #[strum(to_string = "more", serialize = "3")]
    More,
}

impl Action {
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Pin => "pin.fill",
            Self::Share => "square.and.arrow.up",
            Self::Cross => "xmark",
            Self::More => "ellipsis",
        }
    }
}
