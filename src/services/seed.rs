use rand::seq::SliceRandom;
use rand::Rng;

use crate::db::types::{DifficultyLevel, ExamType, MaterialType, TestType};

/// Chapter plan for the generated bank: (subject, chapter, question count).
const BANK_PLAN: &[(&str, &str, usize)] = &[
    ("Physics", "Mechanics", 50),
    ("Physics", "Electricity and Magnetism", 40),
    ("Physics", "Optics", 30),
    ("Physics", "Thermodynamics", 20),
    ("Physics", "Modern Physics", 10),
    ("Chemistry", "Organic Chemistry", 50),
    ("Chemistry", "Physical Chemistry", 40),
    ("Chemistry", "Inorganic Chemistry", 40),
    ("Chemistry", "Environmental Chemistry", 10),
    ("Mathematics", "Calculus", 50),
    ("Mathematics", "Algebra", 40),
    ("Mathematics", "Coordinate Geometry", 35),
    ("Mathematics", "Trigonometry", 25),
    ("Mathematics", "Probability", 10),
];

pub(crate) const TEST_INSTRUCTIONS: &[&str] = &[
    "All questions are compulsory",
    "Each question carries marks as indicated",
    "No negative marking",
    "Use rough sheets for calculations",
];

pub(crate) struct SeedQuestion {
    pub(crate) question: String,
    pub(crate) options: Vec<String>,
    pub(crate) correct_answer: i32,
    pub(crate) explanation: String,
    pub(crate) solution: String,
    pub(crate) subject: &'static str,
    pub(crate) chapter: &'static str,
    pub(crate) topic: &'static str,
    pub(crate) difficulty: DifficultyLevel,
    pub(crate) marks: i32,
    pub(crate) exam: ExamType,
    pub(crate) year: i32,
    pub(crate) source: String,
}

pub(crate) struct SeedTest {
    pub(crate) title: &'static str,
    pub(crate) description: &'static str,
    pub(crate) test_type: TestType,
    pub(crate) subject: Option<&'static str>,
    pub(crate) chapter: Option<&'static str>,
    pub(crate) duration_minutes: i32,
}

pub(crate) struct SeedMaterial {
    pub(crate) title: &'static str,
    pub(crate) material_type: MaterialType,
    pub(crate) subject: &'static str,
    pub(crate) chapter: Option<&'static str>,
    pub(crate) description: &'static str,
}

pub(crate) const SAMPLE_TESTS: &[SeedTest] = &[
    SeedTest {
        title: "JEE Main Full Syllabus Test 1",
        description: "Complete JEE Main syllabus practice test",
        test_type: TestType::Full,
        subject: None,
        chapter: None,
        duration_minutes: 180,
    },
    SeedTest {
        title: "Physics Mechanics Chapter Test",
        description: "Comprehensive Mechanics chapter test",
        test_type: TestType::Chapter,
        subject: Some("Physics"),
        chapter: Some("Mechanics"),
        duration_minutes: 60,
    },
    SeedTest {
        title: "Chemistry Organic Practice",
        description: "Organic chemistry focused test",
        test_type: TestType::Subject,
        subject: Some("Chemistry"),
        chapter: None,
        duration_minutes: 90,
    },
];

pub(crate) const SAMPLE_MATERIALS: &[SeedMaterial] = &[
    SeedMaterial {
        title: "Physics Formula Sheet",
        material_type: MaterialType::Formula,
        subject: "Physics",
        chapter: None,
        description: "All important Physics formulas for JEE",
    },
    SeedMaterial {
        title: "Organic Chemistry Reactions",
        material_type: MaterialType::Notes,
        subject: "Chemistry",
        chapter: Some("Organic Chemistry"),
        description: "Complete organic chemistry reactions guide",
    },
    SeedMaterial {
        title: "Calculus Short Notes",
        material_type: MaterialType::Notes,
        subject: "Mathematics",
        chapter: Some("Calculus"),
        description: "Quick revision notes for Calculus",
    },
];

/// Generates the initial question bank (450 questions across three
/// subjects). Difficulty and exam are drawn at random; marks follow the
/// difficulty's default.
pub(crate) fn generate_question_bank(rng: &mut impl Rng) -> Vec<SeedQuestion> {
    let mut bank = Vec::new();
    for &(subject, chapter, count) in BANK_PLAN {
        for index in 1..=count {
            bank.push(generate_question(subject, chapter, index, rng));
        }
    }
    bank
}

fn generate_question(
    subject: &'static str,
    chapter: &'static str,
    index: usize,
    rng: &mut impl Rng,
) -> SeedQuestion {
    const DIFFICULTIES: [DifficultyLevel; 3] =
        [DifficultyLevel::Easy, DifficultyLevel::Medium, DifficultyLevel::Hard];
    const EXAMS: [ExamType; 2] = [ExamType::JeeMain, ExamType::JeeAdvanced];

    let difficulty = *DIFFICULTIES.choose(rng).unwrap();
    let exam = *EXAMS.choose(rng).unwrap();
    let exam_label = match exam {
        ExamType::JeeMain => "JEE Main",
        ExamType::JeeAdvanced => "JEE Advanced",
        ExamType::Neet => "NEET",
    };
    let year = 2020 + rng.gen_range(0..4);

    SeedQuestion {
        question: format!(
            "[{exam_label}] {subject} - {chapter} - Q{index}: {}",
            question_text(subject, chapter, rng)
        ),
        options: option_texts(subject),
        correct_answer: rng.gen_range(0..4),
        explanation: format!("Detailed explanation for {subject} {chapter} question {index}"),
        solution: format!("Step-by-step solution for {subject} {chapter} question {index}"),
        subject,
        chapter,
        topic: topic_for(subject, chapter, rng),
        difficulty,
        marks: difficulty.default_marks(),
        exam,
        year,
        source: format!("{exam_label} {year}"),
    }
}

fn question_text(subject: &str, chapter: &str, rng: &mut impl Rng) -> &'static str {
    let templates: &[&'static str] = match (subject, chapter) {
        ("Physics", "Mechanics") => &[
            "A particle moves with constant acceleration...",
            "A block of mass m is pulled on a rough surface...",
            "A circular disc of radius R is rotating...",
            "A projectile is fired at an angle...",
        ],
        ("Physics", "Electricity and Magnetism") => &[
            "In the circuit shown, find the current...",
            "A charged particle enters a magnetic field...",
            "Calculate the capacitance of the system...",
            "Find the electric field at point P...",
        ],
        ("Chemistry", "Organic Chemistry") => &[
            "Identify the product of the reaction...",
            "Which compound shows optical activity?",
            "Predict the major product...",
            "Arrange in order of reactivity...",
        ],
        ("Chemistry", "Physical Chemistry") => &[
            "Calculate the pH of the solution...",
            "Find the rate constant for the reaction...",
            "Determine the equilibrium constant...",
            "Calculate the cell potential...",
        ],
        ("Mathematics", "Calculus") => &[
            "Evaluate the integral of (x^2 + 1)...",
            "Find the derivative of f(x) = sin(x)...",
            "Solve the differential equation...",
            "Find the maximum value of the function...",
        ],
        ("Mathematics", "Algebra") => &[
            "Solve the quadratic equation...",
            "Find the sum of the series...",
            "Determine the value of the expression...",
            "Solve the system of equations...",
        ],
        _ => &["Solve the following problem..."],
    };
    templates.choose(rng).unwrap()
}

fn option_texts(subject: &str) -> Vec<String> {
    let values: [&str; 4] = match subject {
        "Physics" => ["2.5 m/s^2", "5.6 x 10^3", "8.31 J/(mol K)", "6.02 x 10^23"],
        "Chemistry" => ["NaOH", "CH3COOH", "NaCl", "H2SO4"],
        "Mathematics" => ["pi/2", "sqrt(2)", "ln(2)", "e^2"],
        _ => ["Option A", "Option B", "Option C", "Option D"],
    };
    values.iter().map(|v| v.to_string()).collect()
}

fn topic_for(subject: &str, chapter: &str, rng: &mut impl Rng) -> &'static str {
    let topics: &[&'static str] = match (subject, chapter) {
        ("Physics", "Mechanics") => &["Kinematics", "Dynamics", "Work-Energy", "Rotational Motion"],
        ("Physics", "Electricity and Magnetism") => {
            &["Electrostatics", "Current Electricity", "Magnetism", "EMI"]
        }
        ("Chemistry", "Organic Chemistry") => {
            &["Hydrocarbons", "Functional Groups", "Reaction Mechanisms", "Stereochemistry"]
        }
        ("Chemistry", "Physical Chemistry") => {
            &["Chemical Kinetics", "Thermodynamics", "Electrochemistry", "Solutions"]
        }
        ("Mathematics", "Calculus") => {
            &["Differentiation", "Integration", "Differential Equations", "Applications"]
        }
        ("Mathematics", "Algebra") => {
            &["Quadratic Equations", "Sequences", "Matrices", "Complex Numbers"]
        }
        _ => &["General"],
    };
    topics.choose(rng).unwrap()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn bank_has_expected_size_and_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let bank = generate_question_bank(&mut rng);

        assert_eq!(bank.len(), 450);
        let physics = bank.iter().filter(|q| q.subject == "Physics").count();
        assert_eq!(physics, 150);

        for question in &bank {
            assert_eq!(question.options.len(), 4);
            assert!((0..4).contains(&question.correct_answer));
            assert_eq!(question.marks, question.difficulty.default_marks());
            assert!((2020..2024).contains(&question.year));
        }
    }

    #[test]
    fn chapters_follow_the_plan() {
        let mut rng = StdRng::seed_from_u64(2);
        let bank = generate_question_bank(&mut rng);

        let mechanics = bank.iter().filter(|q| q.chapter == "Mechanics").count();
        assert_eq!(mechanics, 50);
        let probability = bank.iter().filter(|q| q.chapter == "Probability").count();
        assert_eq!(probability, 10);
    }
}
