//! Prompt construction for every generation operation.

use crate::intake::{DiscoveryProfile, PivotProfile, Profile};

/// Behavioural instruction sent with roadmap, eligibility and skill
/// requests.
pub const SYSTEM_INSTRUCTION: &str = "\
Context: You are the planning engine for \"Second Innings\", a service that helps Indian \
athletes through their First Innings (aspiring athletes) and their Second Innings \
(career transition after sport).
Task: When asked for a roadmap or a career pivot, answer with specific, localized Indian \
institutions, programmes and pathways.
Tone: Professional, realistic, encouraging, and authoritative on Indian sports structures.";

/// Instruction for the mental support check-in.
pub const SUPPORT_INSTRUCTION: &str =
    "You are a mental performance coach and compassionate mentor for Indian athletes.";

/// Answers from the four-question wellbeing check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckIn {
    pub time_since_retirement: String,
    pub misses_most: String,
    /// Clarity of purpose, 1 to 10.
    pub purpose_clarity: u8,
    pub mood: String,
}

/// Task prompt for either roadmap flow.
pub fn roadmap_prompt(profile: &Profile) -> String {
    match profile {
        Profile::Discovery(p) => discovery_prompt(p),
        Profile::Pivot(p) => pivot_prompt(p),
    }
}

pub fn discovery_prompt(p: &DiscoveryProfile) -> String {
    format!(
        "Create a detailed development roadmap for a {age}-year-old {level} {sport} player in India.
Their main goal is: \"{goal}\".

Requirements:
- Order the roadmap_steps through the tiers: Grassroots (School/Club) -> District -> State \
(Ranji Trophy / Santosh Trophy / National Games) -> National and Pro Leagues (IPL, ISL, PKL).
- Name the Indian bodies involved: SAI (Sports Authority of India), Khelo India and the \
relevant State Federation.
- In financial_aid_tips include scholarships with named Indian grants (e.g. Reliance \
Foundation, Tata Football Academy, Government Sports Quota).
- Give specific drills and measurable benchmarks in every phase.",
        age = p.age,
        level = p.level,
        sport = p.sport,
        goal = p.goal,
    )
}

pub fn pivot_prompt(p: &PivotProfile) -> String {
    let constraints = if p.constraints.is_empty() {
        "None reported".to_string()
    } else {
        p.constraints
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "A retired or pivoting athlete in India needs a Second Innings career plan.
Profile:
- Sport: {sport} (played {years} years)
- Identity score (1-10, 10 is pure athlete): {identity}
- Physical capacity: {physical}
- Locker room role: {role}
- Financial urgency: {urgency}
- Constraints: {constraints}

Based on these constraints and skills, suggest 3 realistic Indian career paths.

Requirements:
- Put the 3 career paths in pivot_options.
- For each pivot option name the exact certification needed (e.g. NIS Patiala for coaching, \
BCCI Level 1 for umpiring, IISM Mumbai for sports management).
- If suggesting government jobs, explain the Sports Quota for Railways, Banks (SBI/PNB) and \
Police forces.
- If suggesting tech, cover Video Analysis or Sports Data Analytics.
- In current_status_analysis address the identity score and the constraints with empathy \
and logic.
- Use roadmap_steps for the next 6 months of transition (Networking, Upskilling, \
Application).",
        sport = p.sport,
        years = p.years_played.trim(),
        identity = p.identity_score,
        physical = p.physical_capacity,
        role = p.role,
        urgency = p.financial_urgency,
    )
}

pub fn eligibility_prompt(profile_text: &str, scheme: &str) -> String {
    format!(
        "User profile: \"{profile_text}\"
Scheme: \"{scheme}\"

Act as a Government of India Sports Ministry eligibility officer and decide whether the \
user qualifies for this scheme.
If yes, state \"QUALIFIED\" and explain why.
If no, state \"NOT QUALIFIED\" and list the missing criteria (e.g. no National medal, age \
limit exceeded).
Keep it brief (max 50 words)."
    )
}

pub fn skills_prompt(sport: &str, role: &str) -> String {
    format!(
        "I am a {sport} player who played as a \"{role}\".
Translate my on-field game sense and soft skills into specific corporate or tech skills.

Output format JSON:
{{
  \"core_transferable_skill\": \"string (e.g. Risk Assessment)\",
  \"corporate_translation\": \"string (explanation)\",
  \"suggested_roles\": [\"role1\", \"role2\"]
}}"
    )
}

pub fn support_prompt(check_in: &CheckIn) -> String {
    format!(
        "The user is a retired athlete struggling with the transition into their Second Innings.

Check-in answers:
1. Time since retirement: {since}
2. Missing most: {misses}
3. Clarity of purpose (1-10): {purpose}
4. Current mood: {mood}

Task: write a compassionate, non-clinical supportive message.
- Validate their feeling of athlete grief (loss of identity).
- Explain why this feeling is psychologically normal for athletes.
- Suggest 3 small, non-sport grounding habits for tomorrow.

Tone: warm and empathetic, like an older teammate. Not robotic.
Format: Markdown.",
        since = check_in.time_since_retirement,
        misses = check_in.misses_most,
        purpose = check_in.purpose_clarity,
        mood = check_in.mood,
    )
}
