//! Scoring key and major catalog.
//!
//! Every checkbox label and motivational category maps to the RIASEC letters it feeds. The
//! tables are plain data so they can be audited, rendered into generation prompts, and tested
//! apart from the aggregation logic.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::domain::{Dimension, MotivationalCategory, SignalKind};

use super::domain::Dimension::{
    Artistic as A, Conventional as C, Enterprising as E, Investigative as I, Realistic as R,
    Social as S,
};

const INTEREST_FIELDS: &[(&str, &[Dimension])] = &[
    ("Health and medicine", &[S]),
    ("Agriculture and sciences", &[I]),
    ("Arts and communication", &[A]),
    ("Engineering and technology", &[R, I]),
    ("Business and management", &[E, C]),
    ("Human and public service", &[S]),
];

const QUALITIES: &[(&str, &[Dimension])] = &[
    ("Compassionate and caring", &[S]),
    ("Good listener", &[S]),
    ("Following directions", &[C]),
    ("Conscientious", &[C]),
    ("Patient", &[S]),
    ("Problem solver", &[I]),
    ("Nature lover", &[R]),
    ("Physically active", &[R]),
    ("Observer", &[I]),
    ("Imaginative", &[A]),
    ("Creative", &[A]),
    ("Outgoing", &[S]),
    ("Performer", &[A]),
    ("Hands-on creator", &[R]),
    ("Logical thinker", &[I]),
    ("Practical", &[R]),
    ("Decision-maker", &[E]),
    ("Open-minded", &[A]),
    ("Organized", &[C]),
];

const FREE_TIME_ACTIVITIES: &[(&str, &[Dimension])] = &[
    ("Volunteering", &[S]),
    ("Caring for others", &[S]),
    ("Healthy living", &[R]),
    ("Hiking", &[R]),
    ("Experimentation", &[I]),
    ("Acting", &[A]),
    ("Writing", &[A]),
    ("Painting", &[A]),
    ("Building things", &[R]),
    ("Computing", &[I]),
    ("Coaching/tutoring", &[S]),
];

/// Letters fed by each motivational category; each receives the raw Likert value.
pub fn motivation_dimensions(category: MotivationalCategory) -> &'static [Dimension] {
    match category {
        MotivationalCategory::IntrinsicMotivation => &[A, I],
        MotivationalCategory::IdentifiedRegulation => &[S, I, A],
        MotivationalCategory::IntegratedRegulation => &[S, E, A],
        MotivationalCategory::IntrojectedRegulation => &[E, C, R],
        MotivationalCategory::ExternalRegulation => &[C, R, E],
        MotivationalCategory::Amotivation => &[],
    }
}

/// Resolved checkbox label with its canonical spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelEntry {
    pub label: &'static str,
    pub dimensions: &'static [Dimension],
}

/// Process-wide lookup over the checkbox tables keyed by `(kind, normalized label)`.
#[derive(Debug)]
pub struct ScoringTables {
    entries: HashMap<(SignalKind, String), LabelEntry>,
}

static SCORING_TABLES: OnceLock<ScoringTables> = OnceLock::new();

impl ScoringTables {
    pub fn standard() -> &'static ScoringTables {
        SCORING_TABLES.get_or_init(|| {
            let mut entries = HashMap::new();
            for kind in SignalKind::ALL {
                for &(label, dimensions) in Self::rows(kind) {
                    entries.insert(
                        (kind, normalize_label(label)),
                        LabelEntry { label, dimensions },
                    );
                }
            }
            ScoringTables { entries }
        })
    }

    /// Table rows for one checkbox question, in questionnaire order.
    pub fn rows(kind: SignalKind) -> &'static [(&'static str, &'static [Dimension])] {
        match kind {
            SignalKind::InterestField => INTEREST_FIELDS,
            SignalKind::Quality => QUALITIES,
            SignalKind::FreeTimeActivity => FREE_TIME_ACTIVITIES,
        }
    }

    pub fn lookup(&self, kind: SignalKind, label: &str) -> Option<LabelEntry> {
        self.entries.get(&(kind, normalize_label(label))).copied()
    }

    pub fn vocabulary(kind: SignalKind) -> Vec<&'static str> {
        Self::rows(kind).iter().map(|(label, _)| *label).collect()
    }
}

/// Ordered candidate majors per letter.
pub struct MajorCatalog;

impl MajorCatalog {
    pub fn majors(dimension: Dimension) -> &'static [&'static str; 5] {
        match dimension {
            R => &[
                "Mechanical Eng",
                "Civil Eng",
                "Electrical Eng",
                "Architecture",
                "Industrial Design",
            ],
            I => &[
                "Biology",
                "Chemistry",
                "Computer Science",
                "Mathematics",
                "Data Science",
            ],
            A => &[
                "Fine Arts",
                "Graphic Design",
                "Journalism",
                "Music",
                "Theater",
            ],
            S => &[
                "Psychology",
                "Nursing",
                "Education",
                "Social Work",
                "Human Services",
            ],
            E => &[
                "Business Admin",
                "Marketing",
                "Finance",
                "Entrepreneurship",
                "Management",
            ],
            C => &[
                "Accounting",
                "Finance",
                "Economics",
                "Library Science",
                "Info Systems",
            ],
        }
    }

    /// Majors listed under more than one letter, with the letters that share them.
    pub fn shared_majors() -> Vec<(&'static str, Vec<Dimension>)> {
        let mut owners: Vec<(&'static str, Vec<Dimension>)> = Vec::new();
        for dimension in Dimension::ALL {
            for major in Self::majors(dimension).iter().copied() {
                match owners.iter_mut().find(|(name, _)| *name == major) {
                    Some((_, letters)) => letters.push(dimension),
                    None => owners.push((major, vec![dimension])),
                }
            }
        }
        owners.retain(|(_, letters)| letters.len() > 1);
        owners
    }
}

pub(crate) fn normalize_label(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}
