use super::params::NO_PROFESSION;

/// Suggestions offered by the profession field.
pub const PROFESSIONS: [&str; 20] = [
    NO_PROFESSION,
    "Astronaut",
    "Doctor",
    "Firefighter",
    "Police Officer",
    "Teacher",
    "Chef",
    "Artist",
    "Musician",
    "Scientist",
    "Engineer",
    "Pilot",
    "Farmer",
    "Software Developer",
    "Writer",
    "Photographer",
    "Journalist",
    "Architect",
    "Lawyer",
    "Athlete",
];

/// Catalog entries containing `query`, case-insensitively, in catalog order.
#[must_use]
pub fn suggest(query: &str) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();
    PROFESSIONS
        .iter()
        .copied()
        .filter(|p| p.to_lowercase().contains(&needle))
        .collect()
}
