//! Saving generated payloads to the locker and loading them back.

use innings_db::models::{FlowKind, NewRoadmap, Roadmap};
use innings_db::{LocalStore, StoreResult};

use crate::artifact::ResultView;
use crate::intake::{DiscoveryProfile, PivotProfile, Profile};

/// The record a discovery result is saved as.
pub fn discovery_record(profile: &DiscoveryProfile, payload: &str) -> NewRoadmap {
    NewRoadmap::new(
        FlowKind::Discovery,
        profile.sport.as_str(),
        format!("{} Roadmap ({}yo)", profile.sport, profile.age),
        profile.goal.as_str(),
        payload,
    )
}

/// The record a pivot result is saved as.
pub fn pivot_record(profile: &PivotProfile, payload: &str) -> NewRoadmap {
    NewRoadmap::new(
        FlowKind::Pivot,
        profile.sport.as_str(),
        format!("Pivot Plan: {}", profile.sport),
        format!(
            "Played {} yrs. Role: {}",
            profile.years_played.trim(),
            profile.role
        ),
        payload,
    )
}

pub async fn save_discovery(
    store: &LocalStore,
    profile: &DiscoveryProfile,
    payload: &str,
) -> StoreResult<i64> {
    store.add_roadmap(&discovery_record(profile, payload)).await
}

pub async fn save_pivot(
    store: &LocalStore,
    profile: &PivotProfile,
    payload: &str,
) -> StoreResult<i64> {
    store.add_roadmap(&pivot_record(profile, payload)).await
}

/// Save a payload generated from either flow.
pub async fn save_result(store: &LocalStore, profile: &Profile, payload: &str) -> StoreResult<i64> {
    match profile {
        Profile::Discovery(p) => save_discovery(store, p, payload).await,
        Profile::Pivot(p) => save_pivot(store, p, payload).await,
    }
}

/// Prepare a stored roadmap for display, bypassing intake.
pub fn load_into_view(roadmap: &Roadmap) -> ResultView {
    ResultView::from_payload(&roadmap.full_content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::{Level, LockerRoomRole};

    #[test]
    fn discovery_metadata() {
        let record = discovery_record(
            &DiscoveryProfile {
                sport: "Badminton".into(),
                age: 15,
                level: Level::Intermediate,
                goal: "Represent the state".into(),
            },
            "{}",
        );
        assert_eq!(record.flow, FlowKind::Discovery);
        assert_eq!(record.sport, "Badminton");
        assert_eq!(record.title, "Badminton Roadmap (15yo)");
        assert_eq!(record.summary, "Represent the state");
        assert_eq!(record.full_content, "{}");
    }

    #[test]
    fn pivot_metadata() {
        let profile = PivotProfile {
            years_played: "9".into(),
            role: LockerRoomRole::Technician,
            ..PivotProfile::default()
        };
        let record = pivot_record(&profile, "{}");
        assert_eq!(record.flow, FlowKind::Pivot);
        assert_eq!(record.title, "Pivot Plan: Cricket");
        assert_eq!(record.summary, "Played 9 yrs. Role: technician");
    }
}
