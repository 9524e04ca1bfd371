use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::db::models::Question;
use crate::db::types::DifficultyLevel;

/// Share of the target drawn from the easy and medium buckets when no
/// difficulty is pinned; the hard bucket absorbs the rounding remainder.
const EASY_SHARE: f64 = 0.4;
const MEDIUM_SHARE: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DifficultyMix {
    /// 40/40/20 stratified draw across easy/medium/hard buckets.
    Balanced,
    /// Uniform draw from a pool the caller has already filtered to one level.
    Single(DifficultyLevel),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("not enough questions available: found {found}, requested {requested}")]
pub(crate) struct InsufficientPool {
    pub(crate) found: usize,
    pub(crate) requested: usize,
}

/// Draws `target_count` questions from `pool` without replacement.
///
/// Pure over its inputs; persisting the resulting test is the caller's job.
/// In `Balanced` mode a short bucket is not backfilled from the others, so
/// the result may hold fewer than `target_count` questions even though the
/// combined pool was large enough.
pub(crate) fn assemble(
    pool: Vec<Question>,
    target_count: usize,
    mix: DifficultyMix,
    rng: &mut impl Rng,
) -> Result<Vec<Question>, InsufficientPool> {
    if pool.len() < target_count {
        return Err(InsufficientPool { found: pool.len(), requested: target_count });
    }

    let mut selected = match mix {
        DifficultyMix::Single(_) => {
            let mut items = pool;
            items.shuffle(rng);
            items.truncate(target_count);
            items
        }
        DifficultyMix::Balanced => {
            let mut easy = Vec::new();
            let mut medium = Vec::new();
            let mut hard = Vec::new();
            for question in pool {
                match question.difficulty {
                    DifficultyLevel::Easy => easy.push(question),
                    DifficultyLevel::Medium => medium.push(question),
                    DifficultyLevel::Hard => hard.push(question),
                }
            }

            let easy_count =
                ((target_count as f64 * EASY_SHARE).floor() as usize).min(easy.len());
            let medium_count =
                ((target_count as f64 * MEDIUM_SHARE).floor() as usize).min(medium.len());
            let hard_count = (target_count - easy_count - medium_count).min(hard.len());

            easy.shuffle(rng);
            medium.shuffle(rng);
            hard.shuffle(rng);

            easy.into_iter()
                .take(easy_count)
                .chain(medium.into_iter().take(medium_count))
                .chain(hard.into_iter().take(hard_count))
                .collect()
        }
    };

    // Presentation order must carry no difficulty signal.
    selected.shuffle(rng);
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sqlx::types::Json;
    use time::macros::datetime;

    use super::*;
    use crate::db::types::DifficultyLevel;

    fn question(id: &str, difficulty: DifficultyLevel, marks: i32) -> Question {
        Question {
            id: id.to_string(),
            question: format!("question {id}"),
            options: Json(vec!["a".into(), "b".into(), "c".into(), "d".into()]),
            correct_answer: 0,
            explanation: None,
            solution: None,
            subject: "Physics".to_string(),
            chapter: "Mechanics".to_string(),
            topic: None,
            difficulty,
            marks,
            exam: None,
            year: None,
            source: None,
            created_by: "seed".to_string(),
            created_at: datetime!(2025-01-01 00:00),
        }
    }

    fn pool_of(easy: usize, medium: usize, hard: usize) -> Vec<Question> {
        let mut pool = Vec::new();
        for i in 0..easy {
            pool.push(question(&format!("e{i}"), DifficultyLevel::Easy, 1));
        }
        for i in 0..medium {
            pool.push(question(&format!("m{i}"), DifficultyLevel::Medium, 2));
        }
        for i in 0..hard {
            pool.push(question(&format!("h{i}"), DifficultyLevel::Hard, 3));
        }
        pool
    }

    #[test]
    fn single_difficulty_returns_exact_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = pool_of(12, 0, 0);

        let selected =
            assemble(pool, 10, DifficultyMix::Single(DifficultyLevel::Easy), &mut rng)
                .expect("assemble");

        assert_eq!(selected.len(), 10);
        let ids: HashSet<_> = selected.iter().map(|q| q.id.clone()).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn insufficient_pool_reports_counts() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = pool_of(5, 0, 0);

        let err = assemble(pool, 10, DifficultyMix::Single(DifficultyLevel::Easy), &mut rng)
            .expect_err("must fail");

        assert_eq!(err, InsufficientPool { found: 5, requested: 10 });
    }

    #[test]
    fn balanced_mix_splits_forty_forty_twenty() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = pool_of(20, 20, 20);

        let selected = assemble(pool, 25, DifficultyMix::Balanced, &mut rng).expect("assemble");

        assert_eq!(selected.len(), 25);
        let easy = selected.iter().filter(|q| q.difficulty == DifficultyLevel::Easy).count();
        let medium = selected.iter().filter(|q| q.difficulty == DifficultyLevel::Medium).count();
        let hard = selected.iter().filter(|q| q.difficulty == DifficultyLevel::Hard).count();
        assert_eq!((easy, medium, hard), (10, 10, 5));

        let ids: HashSet<_> = selected.iter().map(|q| q.id.clone()).collect();
        assert_eq!(ids.len(), 25);
    }

    #[test]
    fn balanced_mix_small_pool_scenario() {
        // Pool: 5 easy (1 mark), 3 medium (2 marks), 1 hard (3 marks).
        let mut rng = StdRng::seed_from_u64(3);
        let pool = pool_of(5, 3, 1);

        let selected = assemble(pool, 5, DifficultyMix::Balanced, &mut rng).expect("assemble");

        assert_eq!(selected.len(), 5);
        let easy = selected.iter().filter(|q| q.difficulty == DifficultyLevel::Easy).count();
        let medium = selected.iter().filter(|q| q.difficulty == DifficultyLevel::Medium).count();
        let hard = selected.iter().filter(|q| q.difficulty == DifficultyLevel::Hard).count();
        assert_eq!((easy, medium, hard), (2, 2, 1));

        let ids: HashSet<_> = selected.iter().map(|q| q.id.clone()).collect();
        assert_eq!(ids.len(), 5);
        let max_marks: i32 = selected.iter().map(|q| q.marks).sum();
        assert_eq!(max_marks, 2 + 4 + 3);
    }

    #[test]
    fn balanced_mix_short_bucket_underfills() {
        // 8 easy + 8 medium but no hard questions: the hard allotment is
        // dropped rather than redistributed, so only 8 come back.
        let mut rng = StdRng::seed_from_u64(11);
        let pool = pool_of(8, 8, 0);

        let selected = assemble(pool, 10, DifficultyMix::Balanced, &mut rng).expect("assemble");

        assert_eq!(selected.len(), 8);
    }
}
