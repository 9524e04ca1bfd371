use serde::Serialize;

use crate::db::models::{GroupBreakdown, Performance, Question, StudyMaterial};
use crate::db::types::{DifficultyLevel, MaterialType};

use super::scoring::round2;

/// Score cutoffs. Tiers (chapter focus and overall level) switch at 60 and
/// 80. The weak/strong partitions share the weak cutoff but keep different
/// strong cutoffs: 80 for chapters within a subject, 70 for subjects overall.
const WEAK_CUTOFF: f64 = 60.0;
const TIER_UPPER_CUTOFF: f64 = 80.0;
const STRONG_CHAPTER_CUTOFF: f64 = 80.0;
const STRONG_SUBJECT_CUTOFF: f64 = 70.0;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum GuidanceScope {
    Chapter,
    Subject,
    Overall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) enum FocusLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) enum OverallLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Resource {
    pub(crate) title: String,
    pub(crate) material_type: MaterialType,
    pub(crate) description: Option<String>,
    pub(crate) url: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DifficultyBreakdown {
    pub(crate) easy: usize,
    pub(crate) medium: usize,
    pub(crate) hard: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChapterStatistics {
    pub(crate) total_questions: usize,
    pub(crate) difficulty_breakdown: DifficultyBreakdown,
    pub(crate) average_score: f64,
    pub(crate) recommended_focus: FocusLevel,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChapterStudyPlan {
    pub(crate) focus: &'static str,
    pub(crate) daily_target: String,
    pub(crate) priority: &'static str,
    pub(crate) timeline: &'static str,
    pub(crate) activities: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChapterGuidance {
    pub(crate) scope: GuidanceScope,
    pub(crate) subject: String,
    pub(crate) chapter: String,
    pub(crate) statistics: ChapterStatistics,
    pub(crate) study_plan: ChapterStudyPlan,
    pub(crate) resources: Vec<Resource>,
    pub(crate) tips: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubjectStatistics {
    pub(crate) total_questions: usize,
    pub(crate) total_chapters: usize,
    pub(crate) weak_chapters: Vec<String>,
    pub(crate) strong_chapters: Vec<String>,
    pub(crate) recommended_focus: FocusLevel,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubjectStudyPlan {
    pub(crate) focus: &'static str,
    pub(crate) weekly_target: String,
    pub(crate) daily_schedule: Vec<&'static str>,
    pub(crate) strategy: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubjectGuidance {
    pub(crate) scope: GuidanceScope,
    pub(crate) subject: String,
    pub(crate) statistics: SubjectStatistics,
    pub(crate) study_plan: SubjectStudyPlan,
    pub(crate) priority: Vec<String>,
    pub(crate) resources: Vec<Resource>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OverallStatistics {
    pub(crate) total_tests: usize,
    pub(crate) average_score: f64,
    pub(crate) weak_subjects: Vec<String>,
    pub(crate) strong_subjects: Vec<String>,
    pub(crate) overall_level: OverallLevel,
}

#[derive(Debug, Serialize)]
pub(crate) struct OverallStudyPlan {
    pub(crate) focus: &'static str,
    pub(crate) daily_hours: &'static str,
    pub(crate) priority: &'static str,
    pub(crate) subjects_order: Vec<String>,
    pub(crate) weekly_tests: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct WeeklyTarget {
    pub(crate) chapters: usize,
    pub(crate) questions: u32,
    pub(crate) tests: u32,
    pub(crate) revision: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct OverallGuidance {
    pub(crate) scope: GuidanceScope,
    pub(crate) statistics: OverallStatistics,
    pub(crate) study_plan: OverallStudyPlan,
    pub(crate) recommendations: Vec<String>,
    pub(crate) weekly_target: WeeklyTarget,
}

fn average(percentages: impl Iterator<Item = f64>) -> f64 {
    let values: Vec<f64> = percentages.collect();
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn group_average<'a>(
    history: impl Iterator<Item = &'a [GroupBreakdown]>,
    key: &str,
) -> f64 {
    average(
        history
            .flat_map(|groups| groups.iter())
            .filter(|g| g.key == key)
            .map(|g| g.percentage),
    )
}

fn chapter_average(history: &[Performance], chapter: &str) -> f64 {
    group_average(history.iter().map(|p| p.chapter_wise.0.as_slice()), chapter)
}

fn subject_average(history: &[Performance], subject: &str) -> f64 {
    group_average(history.iter().map(|p| p.subject_wise.0.as_slice()), subject)
}

pub(crate) fn chapter_guidance(
    subject: &str,
    chapter: &str,
    chapter_questions: &[Question],
    history: &[Performance],
    materials: &[StudyMaterial],
) -> ChapterGuidance {
    let count_of = |level: DifficultyLevel| {
        chapter_questions.iter().filter(|q| q.difficulty == level).count()
    };
    let breakdown = DifficultyBreakdown {
        easy: count_of(DifficultyLevel::Easy),
        medium: count_of(DifficultyLevel::Medium),
        hard: count_of(DifficultyLevel::Hard),
    };

    let avg = chapter_average(history, chapter);
    let focus = if avg < WEAK_CUTOFF {
        FocusLevel::High
    } else if avg < TIER_UPPER_CUTOFF {
        FocusLevel::Medium
    } else {
        FocusLevel::Low
    };

    ChapterGuidance {
        scope: GuidanceScope::Chapter,
        subject: subject.to_string(),
        chapter: chapter.to_string(),
        statistics: ChapterStatistics {
            total_questions: chapter_questions.len(),
            difficulty_breakdown: breakdown,
            average_score: round2(avg),
            recommended_focus: focus,
        },
        study_plan: chapter_study_plan(chapter_questions.len(), avg),
        resources: chapter_resources(chapter, materials),
        tips: chapter_tips(subject, chapter),
    }
}

fn chapter_study_plan(total_questions: usize, avg: f64) -> ChapterStudyPlan {
    let daily = |share: f64| {
        format!("{} questions daily", (total_questions as f64 * share).ceil() as usize)
    };

    if avg < WEAK_CUTOFF {
        ChapterStudyPlan {
            focus: "Build Fundamental Understanding",
            daily_target: daily(0.10),
            priority: "Start with easy questions, then medium",
            timeline: "2-3 weeks for mastery",
            activities: vec![
                "Watch concept videos",
                "Solve easy questions first",
                "Practice derivations and formulas",
                "Take chapter-wise tests",
            ],
        }
    } else if avg < TIER_UPPER_CUTOFF {
        ChapterStudyPlan {
            focus: "Improve Speed and Accuracy",
            daily_target: daily(0.15),
            priority: "Mix of medium and hard questions",
            timeline: "1-2 weeks for excellence",
            activities: vec![
                "Time-bound practice",
                "Focus on tricky questions",
                "Revise formulas regularly",
                "Take timed chapter tests",
            ],
        }
    } else {
        ChapterStudyPlan {
            focus: "Maintain Excellence",
            daily_target: daily(0.05),
            priority: "Hard questions and revisions",
            timeline: "Weekly revision",
            activities: vec![
                "Solve advanced problems",
                "Practice previous year questions",
                "Teach concepts to others",
                "Take full syllabus tests",
            ],
        }
    }
}

fn resource_from_material(material: &StudyMaterial) -> Resource {
    Resource {
        title: material.title.clone(),
        material_type: material.material_type,
        description: material.description.clone(),
        url: material.url.clone(),
    }
}

fn chapter_resources(chapter: &str, materials: &[StudyMaterial]) -> Vec<Resource> {
    if !materials.is_empty() {
        return materials.iter().map(resource_from_material).collect();
    }
    vec![
        Resource {
            title: format!("{chapter} Study Notes"),
            material_type: MaterialType::Notes,
            description: Some("Comprehensive notes for quick revision".to_string()),
            url: None,
        },
        Resource {
            title: format!("{chapter} Formula Sheet"),
            material_type: MaterialType::Formula,
            description: Some("Important formulas and theorems".to_string()),
            url: None,
        },
        Resource {
            title: format!("{chapter} Practice Questions"),
            material_type: MaterialType::Pdf,
            description: Some("Chapter-wise practice problems".to_string()),
            url: None,
        },
    ]
}

fn subject_resources(subject: &str, materials: &[StudyMaterial]) -> Vec<Resource> {
    if !materials.is_empty() {
        return materials.iter().map(resource_from_material).collect();
    }
    vec![
        Resource {
            title: format!("{subject} Complete Guide"),
            material_type: MaterialType::Pdf,
            description: Some("Comprehensive subject guide".to_string()),
            url: None,
        },
        Resource {
            title: format!("{subject} Formula Book"),
            material_type: MaterialType::Formula,
            description: Some("All important formulas".to_string()),
            url: None,
        },
        Resource {
            title: format!("{subject} Previous Year Papers"),
            material_type: MaterialType::Pdf,
            description: Some("10 years of question papers".to_string()),
            url: None,
        },
    ]
}

fn chapter_tips(subject: &str, chapter: &str) -> Vec<&'static str> {
    match (subject, chapter) {
        ("Physics", "Mechanics") => vec![
            "Focus on free-body diagrams",
            "Practice numerical problems daily",
            "Understand Newton's laws thoroughly",
            "Master conservation laws",
        ],
        ("Physics", "Electricity and Magnetism") => vec![
            "Understand circuit laws",
            "Practice Gauss's law applications",
            "Master right-hand rules",
            "Solve capacitor problems",
        ],
        ("Chemistry", "Organic Chemistry") => vec![
            "Memorize reaction mechanisms",
            "Practice named reactions",
            "Understand stereochemistry",
            "Solve conversion problems",
        ],
        ("Chemistry", "Physical Chemistry") => vec![
            "Practice numericals regularly",
            "Understand concepts deeply",
            "Master formulas and units",
            "Solve previous year questions",
        ],
        ("Mathematics", "Calculus") => vec![
            "Practice differentiation",
            "Master integration techniques",
            "Understand applications",
            "Solve area and volume problems",
        ],
        ("Mathematics", "Algebra") => vec![
            "Practice quadratic equations",
            "Master sequences and series",
            "Understand complex numbers",
            "Solve probability problems",
        ],
        _ => vec![
            "Practice regularly",
            "Understand concepts deeply",
            "Solve previous year questions",
            "Take regular mock tests",
        ],
    }
}

pub(crate) fn subject_guidance(
    subject: &str,
    total_questions: usize,
    chapters: &[String],
    history: &[Performance],
    materials: &[StudyMaterial],
) -> SubjectGuidance {
    let mut weak_chapters = Vec::new();
    let mut strong_chapters = Vec::new();
    for chapter in chapters {
        let avg = chapter_average(history, chapter);
        if avg < WEAK_CUTOFF {
            weak_chapters.push(chapter.clone());
        } else if avg >= STRONG_CHAPTER_CUTOFF {
            strong_chapters.push(chapter.clone());
        }
    }

    let focus = if weak_chapters.len() > 2 { FocusLevel::High } else { FocusLevel::Medium };
    let study_plan = subject_study_plan(&weak_chapters, &strong_chapters);
    let priority: Vec<String> = weak_chapters.iter().take(3).cloned().collect();

    SubjectGuidance {
        scope: GuidanceScope::Subject,
        subject: subject.to_string(),
        statistics: SubjectStatistics {
            total_questions,
            total_chapters: chapters.len(),
            weak_chapters,
            strong_chapters,
            recommended_focus: focus,
        },
        study_plan,
        priority,
        resources: subject_resources(subject, materials),
    }
}

fn subject_study_plan(weak: &[String], strong: &[String]) -> SubjectStudyPlan {
    let shortlist = |chapters: &[String]| chapters.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
    SubjectStudyPlan {
        focus: if weak.is_empty() { "Enhance Strong Areas" } else { "Improve Weak Areas" },
        weekly_target: format!("{} chapters per week", if weak.is_empty() { 2 } else { weak.len() }),
        daily_schedule: vec![
            "2 hours concept study",
            "1 hour problem solving",
            "30 minutes revision",
            "Weekly full test",
        ],
        strategy: if weak.is_empty() {
            format!("Master: {}", shortlist(strong))
        } else {
            format!("Focus on: {}", shortlist(weak))
        },
    }
}

pub(crate) fn overall_guidance(subjects: &[String], history: &[Performance]) -> OverallGuidance {
    let avg = average(history.iter().map(|p| p.percentage));

    let mut weak_subjects = Vec::new();
    let mut strong_subjects = Vec::new();
    for subject in subjects {
        let subject_avg = subject_average(history, subject);
        if subject_avg < WEAK_CUTOFF {
            weak_subjects.push(subject.clone());
        } else if subject_avg >= STRONG_SUBJECT_CUTOFF {
            strong_subjects.push(subject.clone());
        }
    }

    let level = if avg < WEAK_CUTOFF {
        OverallLevel::Beginner
    } else if avg < TIER_UPPER_CUTOFF {
        OverallLevel::Intermediate
    } else {
        OverallLevel::Advanced
    };

    let study_plan = overall_study_plan(level, subjects, &weak_subjects, &strong_subjects);
    let recommendations = overall_recommendations(avg, &weak_subjects);
    let weekly_target = weekly_target(weak_subjects.len());

    OverallGuidance {
        scope: GuidanceScope::Overall,
        statistics: OverallStatistics {
            total_tests: history.len(),
            average_score: round2(avg),
            weak_subjects,
            strong_subjects,
            overall_level: level,
        },
        study_plan,
        recommendations,
        weekly_target,
    }
}

fn overall_study_plan(
    level: OverallLevel,
    subjects: &[String],
    weak: &[String],
    strong: &[String],
) -> OverallStudyPlan {
    match level {
        OverallLevel::Beginner => OverallStudyPlan {
            focus: "Build Strong Foundation",
            daily_hours: "4-6 hours",
            priority: "Concept understanding",
            subjects_order: if weak.is_empty() { subjects.to_vec() } else { weak.to_vec() },
            weekly_tests: "2 chapter-wise tests",
        },
        OverallLevel::Intermediate => OverallStudyPlan {
            focus: "Improve Problem Solving",
            daily_hours: "6-8 hours",
            priority: "Practice and speed",
            subjects_order: subjects.to_vec(),
            weekly_tests: "1 full syllabus test + 2 chapter tests",
        },
        OverallLevel::Advanced => OverallStudyPlan {
            focus: "Mastery and Revision",
            daily_hours: "8+ hours",
            priority: "Advanced problems and revision",
            subjects_order: if strong.is_empty() { subjects.to_vec() } else { strong.to_vec() },
            weekly_tests: "2 full syllabus tests + revision",
        },
    }
}

fn overall_recommendations(avg: f64, weak_subjects: &[String]) -> Vec<String> {
    let mut recommendations: Vec<String> = if avg < WEAK_CUTOFF {
        vec![
            "Focus on understanding basic concepts".to_string(),
            "Practice easy and medium questions first".to_string(),
            "Build strong foundation in weak subjects".to_string(),
            "Regular revision is key".to_string(),
        ]
    } else {
        vec![
            "Practice time-bound tests".to_string(),
            "Focus on accuracy and speed".to_string(),
            "Solve previous year papers".to_string(),
            "Regular mock tests for improvement".to_string(),
        ]
    };

    if !weak_subjects.is_empty() {
        recommendations.push(format!("Extra focus needed on: {}", weak_subjects.join(", ")));
    }

    recommendations
}

fn weekly_target(weak_subject_count: usize) -> WeeklyTarget {
    WeeklyTarget {
        chapters: if weak_subject_count > 0 { weak_subject_count * 2 } else { 4 },
        questions: 200,
        tests: 3,
        revision: "All studied chapters",
    }
}

#[cfg(test)]
mod tests {
    use sqlx::types::Json;
    use time::macros::datetime;

    use super::*;

    fn breakdown(key: &str, percentage: f64) -> GroupBreakdown {
        GroupBreakdown { key: key.to_string(), correct: 1, total: 2, percentage }
    }

    fn performance(
        percentage: f64,
        subject_wise: Vec<GroupBreakdown>,
        chapter_wise: Vec<GroupBreakdown>,
    ) -> Performance {
        Performance {
            id: "p1".to_string(),
            user_id: "u1".to_string(),
            test_id: "t1".to_string(),
            score: 10,
            max_marks: 20,
            percentage,
            time_taken_seconds: 600,
            answers: Json(Vec::new()),
            subject_wise: Json(subject_wise),
            chapter_wise: Json(chapter_wise),
            created_at: datetime!(2025-01-01 00:00),
        }
    }

    #[test]
    fn overall_level_switches_at_sixty_and_eighty() {
        let subjects = vec!["Physics".to_string()];

        let beginner = overall_guidance(&subjects, &[performance(55.0, vec![], vec![])]);
        assert_eq!(beginner.statistics.overall_level, OverallLevel::Beginner);

        let intermediate = overall_guidance(&subjects, &[performance(65.0, vec![], vec![])]);
        assert_eq!(intermediate.statistics.overall_level, OverallLevel::Intermediate);

        let advanced = overall_guidance(&subjects, &[performance(85.0, vec![], vec![])]);
        assert_eq!(advanced.statistics.overall_level, OverallLevel::Advanced);
    }

    #[test]
    fn overall_with_no_history_is_beginner_at_zero() {
        let subjects = vec!["Physics".to_string(), "Chemistry".to_string()];

        let guidance = overall_guidance(&subjects, &[]);

        assert_eq!(guidance.statistics.total_tests, 0);
        assert_eq!(guidance.statistics.average_score, 0.0);
        assert_eq!(guidance.statistics.overall_level, OverallLevel::Beginner);
        // No history means every subject averages 0 and lands in the weak set.
        assert_eq!(guidance.statistics.weak_subjects, subjects);
    }

    #[test]
    fn subject_partition_uses_seventy_for_strong() {
        let subjects =
            vec!["Physics".to_string(), "Chemistry".to_string(), "Mathematics".to_string()];
        let history = vec![performance(
            72.0,
            vec![
                breakdown("Physics", 55.0),
                breakdown("Chemistry", 75.0),
                breakdown("Mathematics", 65.0),
            ],
            vec![],
        )];

        let guidance = overall_guidance(&subjects, &history);

        assert_eq!(guidance.statistics.weak_subjects, ["Physics"]);
        assert_eq!(guidance.statistics.strong_subjects, ["Chemistry"]);
    }

    #[test]
    fn weekly_target_doubles_weak_subjects() {
        let subjects = vec!["Physics".to_string(), "Chemistry".to_string()];
        let weak_history = vec![performance(
            40.0,
            vec![breakdown("Physics", 30.0), breakdown("Chemistry", 90.0)],
            vec![],
        )];

        let guidance = overall_guidance(&subjects, &weak_history);
        assert_eq!(guidance.weekly_target.chapters, 2);
        assert_eq!(guidance.weekly_target.questions, 200);
        assert_eq!(guidance.weekly_target.tests, 3);

        let strong_history = vec![performance(
            90.0,
            vec![breakdown("Physics", 90.0), breakdown("Chemistry", 90.0)],
            vec![],
        )];
        let guidance = overall_guidance(&subjects, &strong_history);
        assert_eq!(guidance.weekly_target.chapters, 4);
    }

    #[test]
    fn chapter_partition_uses_eighty_for_strong() {
        let chapters = vec![
            "Mechanics".to_string(),
            "Optics".to_string(),
            "Thermodynamics".to_string(),
        ];
        let history = vec![performance(
            70.0,
            vec![],
            vec![
                breakdown("Mechanics", 50.0),
                breakdown("Optics", 85.0),
                breakdown("Thermodynamics", 75.0),
            ],
        )];

        let guidance = subject_guidance("Physics", 120, &chapters, &history, &[]);

        assert_eq!(guidance.statistics.weak_chapters, ["Mechanics"]);
        assert_eq!(guidance.statistics.strong_chapters, ["Optics"]);
        assert_eq!(guidance.priority, ["Mechanics"]);
        assert_eq!(guidance.statistics.recommended_focus, FocusLevel::Medium);
    }

    #[test]
    fn chapter_focus_and_daily_target_follow_tier() {
        let questions: Vec<Question> = (0..37)
            .map(|i| Question {
                id: format!("q{i}"),
                question: "q".to_string(),
                options: Json(vec!["a".into(), "b".into()]),
                correct_answer: 0,
                explanation: None,
                solution: None,
                subject: "Physics".to_string(),
                chapter: "Mechanics".to_string(),
                topic: None,
                difficulty: DifficultyLevel::Easy,
                marks: 1,
                exam: None,
                year: None,
                source: None,
                created_by: "seed".to_string(),
                created_at: datetime!(2025-01-01 00:00),
            })
            .collect();

        let weak = vec![performance(50.0, vec![], vec![breakdown("Mechanics", 50.0)])];
        let guidance = chapter_guidance("Physics", "Mechanics", &questions, &weak, &[]);
        assert_eq!(guidance.statistics.recommended_focus, FocusLevel::High);
        assert_eq!(guidance.study_plan.daily_target, "4 questions daily");
        assert_eq!(guidance.statistics.difficulty_breakdown.easy, 37);

        let strong = vec![performance(90.0, vec![], vec![breakdown("Mechanics", 90.0)])];
        let guidance = chapter_guidance("Physics", "Mechanics", &questions, &strong, &[]);
        assert_eq!(guidance.statistics.recommended_focus, FocusLevel::Low);
        assert_eq!(guidance.study_plan.daily_target, "2 questions daily");
    }

    #[test]
    fn resources_fall_back_to_canned_defaults() {
        let guidance = chapter_guidance("Physics", "Mechanics", &[], &[], &[]);

        assert_eq!(guidance.resources.len(), 3);
        assert_eq!(guidance.resources[0].title, "Mechanics Study Notes");
        assert!(guidance.tips.contains(&"Focus on free-body diagrams"));
    }
}
