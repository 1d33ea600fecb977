//! Fixed choice lists offered by the application form
//!
//! Each entry serializes as its display label, which is also what the
//! backend stores.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            /// Every choice, in display order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Case-insensitive lookup by label
            pub fn from_label(raw: &str) -> Option<Self> {
                let raw = raw.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label().eq_ignore_ascii_case(raw))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_enum! {
    /// University faculty
    Faculty {
        CommerceAndManagement => "Faculty of Commerce & Management Studies",
        ComputingAndTechnology => "Faculty of Computing and Technology",
        Humanities => "Faculty of Humanities",
        Medicine => "Faculty of Medicine",
        Science => "Faculty of Science",
        SocialSciences => "Faculty of Social Sciences",
    }
}

labelled_enum! {
    /// Year of study
    StudyYear {
        First => "1st Year",
        Second => "2nd Year",
        Third => "3rd Year",
        Fourth => "4th Year",
    }
}

labelled_enum! {
    /// Skills a member can offer the club
    Skill {
        Leadership => "Leadership",
        EventPlanning => "Event Planning",
        PublicSpeaking => "Public Speaking",
        GraphicDesign => "Graphic Design",
        VideoEditing => "Video Editing",
        Photography => "Photography",
        SocialMediaManagement => "Social Media Management",
        ContentWriting => "Content Writing",
        WebDevelopment => "Web Development",
        Marketing => "Marketing",
        FinanceManagement => "Finance Management",
        TeamCoordination => "Team Coordination",
    }
}
