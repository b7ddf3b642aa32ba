//! Closed catalogue of named enumerations that `Enum` rules can target.
//!
//! Each enumeration is a list of members with a `NAME` and a `value`
//! (e.g. `MONDAY` / `Monday`). Input resolves to a member by exact value
//! first, then by case-insensitive name.

use serde::Serialize;

use super::rules::ActiveStatus;

const DAY_OF_WEEK_MEMBERS: &[(&str, &str)] = &[
    ("MONDAY", "Monday"),
    ("TUESDAY", "Tuesday"),
    ("WEDNESDAY", "Wednesday"),
    ("THURSDAY", "Thursday"),
    ("FRIDAY", "Friday"),
    ("SATURDAY", "Saturday"),
    ("SUNDAY", "Sunday"),
    ("WEEKEND", "Weekend"),
    ("WEEKDAY", "Weekday"),
    ("ALL", "All"),
];

/// Minutes between consecutive `TimeOfDay` members.
const TIME_OF_DAY_STEP_MINUTES: u32 = 15;

/// An enumeration known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NamedEnum {
    DayOfWeek,
    ActiveStatus,
    TimeOfDay,
}

/// One member of a [`NamedEnum`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumMember {
    pub name: String,
    pub value: String,
}

impl EnumMember {
    fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl NamedEnum {
    pub const ALL: [NamedEnum; 3] = [Self::DayOfWeek, Self::ActiveStatus, Self::TimeOfDay];

    pub fn name(&self) -> &'static str {
        match self {
            Self::DayOfWeek => "DayOfWeek",
            Self::ActiveStatus => "ActiveStatus",
            Self::TimeOfDay => "TimeOfDay",
        }
    }

    /// Look up an enumeration by identifier.
    ///
    /// Namespaced identifiers (`Vendor\Enums\DayOfWeek`, `enums::DayOfWeek`)
    /// resolve by their final segment; comparison is case-insensitive.
    pub fn resolve(identifier: &str) -> Option<Self> {
        let wanted = final_segment(identifier);
        Self::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(wanted))
    }

    pub fn members(&self) -> Vec<EnumMember> {
        match self {
            Self::DayOfWeek => DAY_OF_WEEK_MEMBERS
                .iter()
                .map(|(name, value)| EnumMember::new(*name, *value))
                .collect(),
            Self::ActiveStatus => [ActiveStatus::Active, ActiveStatus::Inactive]
                .into_iter()
                .map(|s| EnumMember::new(s.as_str().to_ascii_uppercase(), s.as_str()))
                .collect(),
            Self::TimeOfDay => (0..24 * 60)
                .step_by(TIME_OF_DAY_STEP_MINUTES as usize)
                .map(|minutes| {
                    let (h, m) = (minutes / 60, minutes % 60);
                    EnumMember::new(format!("T{h:02}_{m:02}"), format!("{h:02}:{m:02}"))
                })
                .collect(),
        }
    }

    /// Resolve `input` to a member: exact value match first, then
    /// case-insensitive name match.
    pub fn find(&self, input: &str) -> Option<EnumMember> {
        let members = self.members();
        if let Some(member) = members.iter().find(|m| m.value == input) {
            return Some(member.clone());
        }
        members
            .into_iter()
            .find(|m| m.name.eq_ignore_ascii_case(input))
    }
}

/// Last segment of a namespaced identifier (`a\b\C`, `a::b::C`, `a.b.C`).
pub(crate) fn final_segment(identifier: &str) -> &str {
    identifier
        .trim()
        .rsplit(['\\', ':', '.', '/'])
        .find(|segment| !segment.is_empty())
        .unwrap_or("")
}
