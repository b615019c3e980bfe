//! The pivot intake: an ordered questionnaire for athletes leaving sport.

use std::fmt;

use tracing::{debug, info};

use super::IntakeError;
use super::profile::{
    ConstraintTag, FinancialUrgency, IdentityScore, LockerRoomRole, PhysicalCapacity,
    PivotProfile, Profile,
};
use crate::generate::GenerationClient;

/// Where the pivot intake currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PivotStep {
    #[default]
    Intro,
    Constraints,
    Identity,
    Physical,
    Role,
    Urgency,
    Generating,
    Results,
}

impl PivotStep {
    /// The steps a user answers, in order.
    pub const QUESTIONS: [PivotStep; 6] = [
        Self::Intro,
        Self::Constraints,
        Self::Identity,
        Self::Physical,
        Self::Role,
        Self::Urgency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Constraints => "constraints",
            Self::Identity => "identity",
            Self::Physical => "physical",
            Self::Role => "role",
            Self::Urgency => "urgency",
            Self::Generating => "generating",
            Self::Results => "results",
        }
    }

    /// The step a confirmation leads to, or `None` where confirming is not
    /// the way forward.
    fn after_confirm(self) -> Option<PivotStep> {
        match self {
            Self::Intro => Some(Self::Constraints),
            Self::Constraints => Some(Self::Identity),
            Self::Identity => Some(Self::Physical),
            Self::Physical => Some(Self::Role),
            Self::Role => Some(Self::Urgency),
            Self::Urgency | Self::Generating | Self::Results => None,
        }
    }

    /// 1-based position among the question steps.
    pub fn position(self) -> Option<usize> {
        Self::QUESTIONS.iter().position(|s| *s == self).map(|i| i + 1)
    }
}

impl fmt::Display for PivotStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State machine collecting a [`PivotProfile`] and holding the generated
/// payload once it arrives.
#[derive(Debug, Clone, Default)]
pub struct PivotIntake {
    step: PivotStep,
    profile: PivotProfile,
    result: Option<String>,
}

impl PivotIntake {
    /// A fresh intake at `intro` with the default profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump straight to `results` with a stored payload.
    pub fn from_stored(payload: impl Into<String>) -> Self {
        Self {
            step: PivotStep::Results,
            profile: PivotProfile::default(),
            result: Some(payload.into()),
        }
    }

    pub fn step(&self) -> PivotStep {
        self.step
    }

    pub fn profile(&self) -> &PivotProfile {
        &self.profile
    }

    /// The generated (or loaded) payload, present only in `results`.
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    fn require(&self, step: PivotStep, action: &'static str) -> Result<(), IntakeError> {
        if self.step == step {
            Ok(())
        } else {
            Err(IntakeError::WrongStep {
                action,
                step: self.step.as_str(),
            })
        }
    }

    // -- Field groups, one per step --

    pub fn set_sport(&mut self, sport: impl Into<String>) -> Result<(), IntakeError> {
        self.require(PivotStep::Intro, "set the sport")?;
        self.profile.sport = sport.into();
        Ok(())
    }

    pub fn set_years_played(&mut self, years: impl Into<String>) -> Result<(), IntakeError> {
        self.require(PivotStep::Intro, "set years played")?;
        self.profile.years_played = years.into();
        Ok(())
    }

    /// Flip membership of `tag`. Returns `true` if it is now selected.
    pub fn toggle_constraint(&mut self, tag: ConstraintTag) -> Result<bool, IntakeError> {
        self.require(PivotStep::Constraints, "toggle a constraint")?;
        Ok(self.profile.toggle_constraint(tag))
    }

    pub fn set_identity_score(&mut self, value: u8) -> Result<(), IntakeError> {
        self.require(PivotStep::Identity, "set the identity score")?;
        self.profile.identity_score = IdentityScore::new(value)?;
        Ok(())
    }

    pub fn set_physical_capacity(&mut self, value: PhysicalCapacity) -> Result<(), IntakeError> {
        self.require(PivotStep::Physical, "set physical capacity")?;
        self.profile.physical_capacity = value;
        Ok(())
    }

    pub fn set_role(&mut self, value: LockerRoomRole) -> Result<(), IntakeError> {
        self.require(PivotStep::Role, "set the locker-room role")?;
        self.profile.role = value;
        Ok(())
    }

    pub fn set_financial_urgency(&mut self, value: FinancialUrgency) -> Result<(), IntakeError> {
        self.require(PivotStep::Urgency, "set financial urgency")?;
        self.profile.financial_urgency = value;
        Ok(())
    }

    // -- Transitions --

    /// Confirm the current question and move to the next one.
    ///
    /// Leaving `intro` requires years played; on failure the step is
    /// unchanged. At `urgency` the way forward is [`Self::begin_generation`].
    pub fn confirm(&mut self) -> Result<PivotStep, IntakeError> {
        let current = self.step;
        let next = current.after_confirm().ok_or(IntakeError::WrongStep {
            action: "confirm",
            step: current.as_str(),
        })?;

        if current == PivotStep::Intro && !self.profile.is_generation_eligible() {
            return Err(IntakeError::YearsPlayedRequired);
        }

        debug!(from = %current, to = %next, "pivot intake advanced");
        self.step = next;
        Ok(next)
    }

    /// Enter `generating` and hand out the profile to generate from.
    ///
    /// Fails with [`IntakeError::GenerationInFlight`] while a previous
    /// request has not resolved.
    pub fn begin_generation(&mut self) -> Result<Profile, IntakeError> {
        match self.step {
            PivotStep::Urgency => {
                self.step = PivotStep::Generating;
                info!(sport = %self.profile.sport, "pivot generation started");
                Ok(Profile::Pivot(self.profile.clone()))
            }
            PivotStep::Generating => Err(IntakeError::GenerationInFlight),
            other => Err(IntakeError::WrongStep {
                action: "start generation",
                step: other.as_str(),
            }),
        }
    }

    /// Resolve the in-flight request. The machine moves to `results`
    /// whatever the payload says.
    pub fn complete_generation(&mut self, payload: impl Into<String>) -> Result<(), IntakeError> {
        self.require(PivotStep::Generating, "complete generation")?;
        self.result = Some(payload.into());
        self.step = PivotStep::Results;
        Ok(())
    }

    /// Run generation end to end: `urgency -> generating -> results`.
    pub async fn generate(&mut self, client: &GenerationClient) -> Result<&str, IntakeError> {
        let profile = self.begin_generation()?;
        let payload = client.generate(&profile).await;
        self.complete_generation(payload)?;
        Ok(self.result.as_deref().unwrap_or_default())
    }

    /// Return to `intro` from `results`, keeping the answers and discarding
    /// the result.
    pub fn reset(&mut self) -> Result<(), IntakeError> {
        self.require(PivotStep::Results, "reset")?;
        self.result = None;
        self.step = PivotStep::Intro;
        Ok(())
    }
}
