use crate::db::models::{AnswerRecord, GroupBreakdown, Question};

/// One answer as submitted by the student. `selected_answer` is `None` for
/// questions the student skipped.
#[derive(Debug, Clone)]
pub(crate) struct SubmittedAnswer {
    pub(crate) question_id: String,
    pub(crate) selected_answer: Option<i32>,
    pub(crate) time_spent_seconds: i32,
}

#[derive(Debug, Clone)]
pub(crate) struct ScoreOutcome {
    pub(crate) score: i32,
    pub(crate) max_marks: i32,
    pub(crate) percentage: f64,
    pub(crate) answers: Vec<AnswerRecord>,
    pub(crate) subject_wise: Vec<GroupBreakdown>,
    pub(crate) chapter_wise: Vec<GroupBreakdown>,
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scores a submission against the test's question list.
///
/// Iterates the test's questions, not the submitted answers: a question with
/// no submitted answer counts as attempted-and-wrong, and answers for ids not
/// in the test are ignored. Breakdown groups keep first-seen question order.
pub(crate) fn score(questions: &[Question], submitted: &[SubmittedAnswer]) -> ScoreOutcome {
    let mut score = 0;
    let mut max_marks = 0;
    let mut answers = Vec::with_capacity(questions.len());
    let mut subjects = GroupAccumulator::default();
    let mut chapters = GroupAccumulator::default();

    for question in questions {
        max_marks += question.marks;

        let submission = submitted.iter().find(|a| a.question_id == question.id);
        let selected_answer = submission.and_then(|a| a.selected_answer);
        let is_correct = selected_answer == Some(question.correct_answer);
        if is_correct {
            score += question.marks;
        }

        subjects.record(&question.subject, is_correct);
        chapters.record(&question.chapter, is_correct);

        answers.push(AnswerRecord {
            question_id: question.id.clone(),
            selected_answer,
            is_correct,
            time_spent_seconds: submission.map(|a| a.time_spent_seconds).unwrap_or(0),
        });
    }

    let percentage = if max_marks == 0 {
        0.0
    } else {
        round2(f64::from(score) / f64::from(max_marks) * 100.0)
    };

    ScoreOutcome {
        score,
        max_marks,
        percentage,
        answers,
        subject_wise: subjects.into_breakdowns(),
        chapter_wise: chapters.into_breakdowns(),
    }
}

#[derive(Default)]
struct GroupAccumulator {
    groups: Vec<(String, i32, i32)>,
}

impl GroupAccumulator {
    fn record(&mut self, key: &str, is_correct: bool) {
        let entry = match self.groups.iter_mut().find(|(k, _, _)| k == key) {
            Some(entry) => entry,
            None => {
                self.groups.push((key.to_string(), 0, 0));
                self.groups.last_mut().unwrap()
            }
        };
        entry.2 += 1;
        if is_correct {
            entry.1 += 1;
        }
    }

    fn into_breakdowns(self) -> Vec<GroupBreakdown> {
        self.groups
            .into_iter()
            .map(|(key, correct, total)| GroupBreakdown {
                key,
                correct,
                total,
                percentage: round2(f64::from(correct) / f64::from(total) * 100.0),
            })
            .collect()
    }
}
