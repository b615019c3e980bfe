//! The discovery flow: one form, one submit, one result.

use tracing::info;

use super::IntakeError;
use super::profile::{DEFAULT_SPORT, DiscoveryProfile, Level, Profile};
use crate::generate::GenerationClient;

/// Raw form values, kept as typed so that going back to the form shows
/// exactly what the user entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryForm {
    pub sport: String,
    pub age: String,
    pub level: Level,
    pub goal: String,
}

impl Default for DiscoveryForm {
    fn default() -> Self {
        Self {
            sport: DEFAULT_SPORT.to_string(),
            age: String::new(),
            level: Level::default(),
            goal: String::new(),
        }
    }
}

impl DiscoveryForm {
    /// Check every field and build the profile.
    pub fn validate(&self) -> Result<DiscoveryProfile, IntakeError> {
        let sport = self.sport.trim();
        if sport.is_empty() {
            return Err(IntakeError::MissingField { field: "sport" });
        }

        let age_text = self.age.trim();
        if age_text.is_empty() {
            return Err(IntakeError::MissingField { field: "age" });
        }
        let age = match age_text.parse::<u32>() {
            Ok(age) if age > 0 => age,
            _ => return Err(IntakeError::InvalidAge(self.age.clone())),
        };

        let goal = self.goal.trim();
        if goal.is_empty() {
            return Err(IntakeError::MissingField { field: "goal" });
        }

        Ok(DiscoveryProfile {
            sport: sport.to_string(),
            age,
            level: self.level,
            goal: goal.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiscoveryState {
    #[default]
    Configuring,
    Results,
}

impl DiscoveryState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuring => "configuring",
            Self::Results => "results",
        }
    }
}

/// Two-state machine around the discovery form.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryFlow {
    state: DiscoveryState,
    form: DiscoveryForm,
    submitted: Option<DiscoveryProfile>,
    result: Option<String>,
}

impl DiscoveryFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(form: DiscoveryForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    /// Jump straight to `results` with a stored payload.
    pub fn from_stored(payload: impl Into<String>) -> Self {
        Self {
            state: DiscoveryState::Results,
            result: Some(payload.into()),
            ..Self::default()
        }
    }

    pub fn state(&self) -> DiscoveryState {
        self.state
    }

    pub fn form(&self) -> &DiscoveryForm {
        &self.form
    }

    /// Form values may only change while configuring.
    pub fn form_mut(&mut self) -> Result<&mut DiscoveryForm, IntakeError> {
        match self.state {
            DiscoveryState::Configuring => Ok(&mut self.form),
            other => Err(IntakeError::WrongStep {
                action: "edit the form",
                step: other.as_str(),
            }),
        }
    }

    /// The profile the current result was generated from, if it was
    /// generated in this session.
    pub fn submitted(&self) -> Option<&DiscoveryProfile> {
        self.submitted.as_ref()
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Validate the form, await generation and move to `results`.
    ///
    /// Validation failures leave the flow in `configuring`.
    pub async fn submit(&mut self, client: &GenerationClient) -> Result<&str, IntakeError> {
        if self.state != DiscoveryState::Configuring {
            return Err(IntakeError::WrongStep {
                action: "submit",
                step: self.state.as_str(),
            });
        }

        let profile = self.form.validate()?;
        info!(sport = %profile.sport, level = %profile.level, "discovery generation started");

        let payload = client.generate(&Profile::Discovery(profile.clone())).await;
        self.submitted = Some(profile);
        self.result = Some(payload);
        self.state = DiscoveryState::Results;
        Ok(self.result.as_deref().unwrap_or_default())
    }

    /// Return to the form, keeping its values.
    pub fn back_to_config(&mut self) -> Result<(), IntakeError> {
        if self.state != DiscoveryState::Results {
            return Err(IntakeError::WrongStep {
                action: "go back to the form",
                step: self.state.as_str(),
            });
        }
        self.state = DiscoveryState::Configuring;
        self.result = None;
        self.submitted = None;
        Ok(())
    }
}
