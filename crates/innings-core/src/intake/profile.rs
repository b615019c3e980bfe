//! Profile records collected by the intake flows.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use innings_db::models::FlowKind;

use super::IntakeError;

/// Sport preselected in both intake forms.
pub const DEFAULT_SPORT: &str = "Cricket";

// ---------------------------------------------------------------------------
// Option enums
// ---------------------------------------------------------------------------

/// Generates `Display`, `FromStr`, `ALL`, and `label()` for a fixed option set.
macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal, $label:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every option, in presentation order.
            pub const ALL: &[$name] = &[$( $name::$variant, )+];

            /// Human-readable label shown in forms.
            pub fn label(&self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let s = match self {
                    $( Self::$variant => $value, )+
                };
                f.write_str(s)
            }
        }

        impl FromStr for $name {
            type Err = IntakeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $value => Ok(Self::$variant), )+
                    other => Err(IntakeError::UnknownOption {
                        kind: $kind,
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

option_enum! {
    /// Current competitive level of an aspiring athlete (ordinal).
    Level, "level" {
        Beginner => "Beginner", "Rookie (0-2 yrs)";
        Intermediate => "Intermediate", "Club/School Level";
        Advanced => "Advanced", "District/State";
        Elite => "Elite", "National Prospect";
    }
}

option_enum! {
    /// A circumstance pushing the athlete out of competitive sport.
    ConstraintTag, "constraint" {
        AcuteInjury => "Acute Injury", "Acute Injury";
        FinancialPressure => "Financial Pressure", "Financial Pressure";
        AgeFactor => "Age Factor", "Age Factor";
        Burnout => "Burnout/Mental Fatigue", "Burnout/Mental Fatigue";
        FamilyResponsibility => "Family Responsibility", "Family Responsibility";
        LackOfDegrees => "Lack of Degrees", "Lack of Degrees";
    }
}

option_enum! {
    /// How much physical work the next career can involve.
    PhysicalCapacity, "physical capacity" {
        Field => "field", "Active / On-Field";
        Desk => "desk", "Desk / Analyst";
        Mixed => "mixed", "Hybrid";
    }
}

option_enum! {
    /// The role the athlete played in the dressing room.
    LockerRoomRole, "locker-room role" {
        Strategist => "strategist", "The Strategist";
        Motivator => "motivator", "The Motivator";
        Technician => "technician", "The Technician";
    }
}

option_enum! {
    /// How soon the athlete needs income.
    FinancialUrgency, "financial urgency" {
        Immediate => "immediate", "Immediate / Critical";
        Stable => "stable", "Stable / 3-6 Months";
        Study => "study", "Long Term / Can Study";
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::Beginner
    }
}

impl Default for PhysicalCapacity {
    fn default() -> Self {
        Self::Mixed
    }
}

impl Default for LockerRoomRole {
    fn default() -> Self {
        Self::Strategist
    }
}

impl Default for FinancialUrgency {
    fn default() -> Self {
        Self::Stable
    }
}

// ---------------------------------------------------------------------------
// Identity score
// ---------------------------------------------------------------------------

/// How strongly the athlete identifies with their sport, 1 (adaptable) to
/// 10 (it is who I am).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdentityScore(u8);

impl IdentityScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, IntakeError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(IntakeError::IdentityScoreOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Scores above 7 point towards on-field careers.
    pub fn favours_field_roles(self) -> bool {
        self.0 > 7
    }
}

impl Default for IdentityScore {
    fn default() -> Self {
        Self(5)
    }
}

impl fmt::Display for IdentityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// A validated profile for an aspiring athlete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryProfile {
    pub sport: String,
    pub age: u32,
    pub level: Level,
    pub goal: String,
}

/// Profile for an athlete planning a career pivot.
///
/// Every enum field always holds a valid selection; only `years_played`
/// starts out empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotProfile {
    pub sport: String,
    /// Years played, as typed by the user.
    pub years_played: String,
    pub constraints: BTreeSet<ConstraintTag>,
    pub identity_score: IdentityScore,
    pub physical_capacity: PhysicalCapacity,
    pub role: LockerRoomRole,
    pub financial_urgency: FinancialUrgency,
}

impl Default for PivotProfile {
    fn default() -> Self {
        Self {
            sport: DEFAULT_SPORT.to_string(),
            years_played: String::new(),
            constraints: BTreeSet::new(),
            identity_score: IdentityScore::default(),
            physical_capacity: PhysicalCapacity::default(),
            role: LockerRoomRole::default(),
            financial_urgency: FinancialUrgency::default(),
        }
    }
}

impl PivotProfile {
    /// Whether the profile may be sent for generation.
    pub fn is_generation_eligible(&self) -> bool {
        !self.years_played.trim().is_empty()
    }

    /// Add the tag if absent, remove it if present.
    ///
    /// Returns `true` when the tag is selected afterwards.
    pub fn toggle_constraint(&mut self, tag: ConstraintTag) -> bool {
        if self.constraints.remove(&tag) {
            false
        } else {
            self.constraints.insert(tag);
            true
        }
    }
}

/// A complete profile from either intake flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Profile {
    Discovery(DiscoveryProfile),
    Pivot(PivotProfile),
}

impl Profile {
    pub fn flow(&self) -> FlowKind {
        match self {
            Self::Discovery(_) => FlowKind::Discovery,
            Self::Pivot(_) => FlowKind::Pivot,
        }
    }

    pub fn sport(&self) -> &str {
        match self {
            Self::Discovery(p) => &p.sport,
            Self::Pivot(p) => &p.sport,
        }
    }
}

impl From<DiscoveryProfile> for Profile {
    fn from(p: DiscoveryProfile) -> Self {
        Self::Discovery(p)
    }
}

impl From<PivotProfile> for Profile {
    fn from(p: PivotProfile) -> Self {
        Self::Pivot(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pivot_defaults_match_the_form() {
        let p = PivotProfile::default();
        assert_eq!(p.sport, "Cricket");
        assert!(p.years_played.is_empty());
        assert!(p.constraints.is_empty());
        assert_eq!(p.identity_score.get(), 5);
        assert_eq!(p.physical_capacity, PhysicalCapacity::Mixed);
        assert_eq!(p.role, LockerRoomRole::Strategist);
        assert_eq!(p.financial_urgency, FinancialUrgency::Stable);
        assert!(!p.is_generation_eligible());
    }

    #[test]
    fn toggle_constraint_is_membership_flip() {
        let mut p = PivotProfile::default();
        assert!(p.toggle_constraint(ConstraintTag::AgeFactor));
        assert!(p.toggle_constraint(ConstraintTag::AcuteInjury));
        assert!(!p.toggle_constraint(ConstraintTag::AgeFactor));
        assert_eq!(
            p.constraints.iter().copied().collect::<Vec<_>>(),
            vec![ConstraintTag::AcuteInjury]
        );
    }

    #[test]
    fn identity_score_bounds() {
        assert!(IdentityScore::new(1).is_ok());
        assert!(IdentityScore::new(10).is_ok());
        assert!(matches!(
            IdentityScore::new(0),
            Err(IntakeError::IdentityScoreOutOfRange(0))
        ));
        assert!(IdentityScore::new(11).is_err());
        assert!(IdentityScore::new(8).unwrap().favours_field_roles());
        assert!(!IdentityScore::new(7).unwrap().favours_field_roles());
    }

    #[test]
    fn option_values_round_trip() {
        for tag in ConstraintTag::ALL {
            assert_eq!(tag.to_string().parse::<ConstraintTag>().unwrap(), *tag);
        }
        assert_eq!("desk".parse::<PhysicalCapacity>().unwrap(), PhysicalCapacity::Desk);
        assert_eq!("Elite".parse::<Level>().unwrap(), Level::Elite);
        assert_eq!(LockerRoomRole::Motivator.label(), "The Motivator");
    }

    #[test]
    fn unknown_option_names_its_kind() {
        let err = "sprinter".parse::<LockerRoomRole>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown locker-room role \"sprinter\""
        );
    }

    #[test]
    fn level_is_ordinal() {
        assert!(Level::Beginner < Level::Intermediate);
        assert!(Level::Advanced < Level::Elite);
    }

    #[test]
    fn profile_reports_flow() {
        let pivot: Profile = PivotProfile::default().into();
        assert_eq!(pivot.flow(), FlowKind::Pivot);
        assert_eq!(pivot.sport(), "Cricket");
    }
}
