//! `innings pivot`: walk the six-question pivot intake and generate a plan.

use std::collections::BTreeSet;

use anyhow::Result;

use innings_core::intake::{
    ConstraintTag, FinancialUrgency, IntakeError, LockerRoomRole, PhysicalCapacity, PivotIntake,
    PivotStep,
};

use crate::config::InningsConfig;
use crate::deliver::{self, ResultOptions};

/// Answers for every intake question, as given on the command line.
#[derive(Debug, Clone)]
pub struct PivotAnswers {
    pub sport: String,
    pub years_played: String,
    pub constraints: Vec<ConstraintTag>,
    pub identity_score: u8,
    pub physical_capacity: PhysicalCapacity,
    pub role: LockerRoomRole,
    pub financial_urgency: FinancialUrgency,
}

/// Answer each question in turn, leaving the intake at `urgency`.
pub fn answer_all(intake: &mut PivotIntake, answers: &PivotAnswers) -> Result<(), IntakeError> {
    intake.set_sport(answers.sport.trim())?;
    intake.set_years_played(answers.years_played.as_str())?;
    intake.confirm()?;

    // Repeating a flag must not toggle the tag back off.
    let wanted: BTreeSet<ConstraintTag> = answers.constraints.iter().copied().collect();
    for tag in wanted {
        intake.toggle_constraint(tag)?;
    }
    intake.confirm()?;

    intake.set_identity_score(answers.identity_score)?;
    intake.confirm()?;

    intake.set_physical_capacity(answers.physical_capacity)?;
    intake.confirm()?;

    intake.set_role(answers.role)?;
    intake.confirm()?;

    intake.set_financial_urgency(answers.financial_urgency)?;
    debug_assert_eq!(intake.step(), PivotStep::Urgency);
    Ok(())
}

pub async fn run_pivot(
    config: &InningsConfig,
    answers: &PivotAnswers,
    options: &ResultOptions,
) -> Result<()> {
    let mut intake = PivotIntake::new();
    answer_all(&mut intake, answers)?;
    let client = config.generation_client().await?;

    let profile = intake.profile().clone();
    eprintln!(
        "Building a pivot plan for {} ({} yrs, {})...",
        profile.sport,
        profile.years_played.trim(),
        profile.role.label()
    );
    let payload = intake.generate(&client).await?.to_string();

    deliver::deliver(&config.db_config, &profile.into(), &payload, options).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers() -> PivotAnswers {
        PivotAnswers {
            sport: "Hockey".into(),
            years_played: "12".into(),
            constraints: vec![
                ConstraintTag::AcuteInjury,
                ConstraintTag::AgeFactor,
                ConstraintTag::AcuteInjury,
            ],
            identity_score: 8,
            physical_capacity: PhysicalCapacity::Field,
            role: LockerRoomRole::Motivator,
            financial_urgency: FinancialUrgency::Immediate,
        }
    }

    #[test]
    fn answers_reach_urgency_with_full_profile() {
        let mut intake = PivotIntake::new();
        answer_all(&mut intake, &answers()).unwrap();

        assert_eq!(intake.step(), PivotStep::Urgency);
        let p = intake.profile();
        assert_eq!(p.sport, "Hockey");
        assert_eq!(
            p.constraints.iter().copied().collect::<Vec<_>>(),
            vec![ConstraintTag::AcuteInjury, ConstraintTag::AgeFactor]
        );
        assert_eq!(p.identity_score.get(), 8);
        assert_eq!(p.role, LockerRoomRole::Motivator);
        assert_eq!(p.financial_urgency, FinancialUrgency::Immediate);
    }

    #[test]
    fn missing_years_stops_at_intro() {
        let mut intake = PivotIntake::new();
        let mut a = answers();
        a.years_played = " ".into();
        assert_eq!(
            answer_all(&mut intake, &a),
            Err(IntakeError::YearsPlayedRequired)
        );
        assert_eq!(intake.step(), PivotStep::Intro);
    }

    #[test]
    fn identity_out_of_range_is_rejected() {
        let mut intake = PivotIntake::new();
        let mut a = answers();
        a.identity_score = 11;
        assert_eq!(
            answer_all(&mut intake, &a),
            Err(IntakeError::IdentityScoreOutOfRange(11))
        );
        assert_eq!(intake.step(), PivotStep::Identity);
    }
}
