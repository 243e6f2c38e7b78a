//! Seeded demo data standing in for a real record provider.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::students::{DisabilityStatus, Gender, StudentRecord};
use crate::trend::ScorePoint;

pub const REGIONS: [&str; 5] = [
    "East Anglian",
    "Scotland",
    "North Western",
    "South East",
    "West Midlands",
];

pub const EDUCATION_LEVELS: [&str; 4] = [
    "Lower Than A Level",
    "A Level or Equivalent",
    "HE Qualification",
    "Postgraduate",
];

pub struct MockData {
    rng: StdRng,
}

impl MockData {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn roster(&mut self, count: usize) -> Vec<StudentRecord> {
        (0..count).map(|i| self.student(10000 + i)).collect()
    }

    fn student(&mut self, number: usize) -> StudentRecord {
        let id = number.to_string();
        let gender = if self.rng.gen_bool(0.5) { Gender::M } else { Gender::F };
        let disability = if self.rng.gen_bool(0.2) {
            DisabilityStatus::Y
        } else {
            DisabilityStatus::N
        };
        let region = REGIONS.choose(&mut self.rng).copied().unwrap_or(REGIONS[0]);
        let education = EDUCATION_LEVELS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(EDUCATION_LEVELS[0]);
        let score: u8 = self.rng.gen_range(0..100);

        StudentRecord::new(
            id.clone(),
            format!("Student {}", id),
            gender,
            region,
            education,
            disability,
            score,
        )
    }

    /// Assessment history with a slight upward drift, one point every 15 days.
    pub fn score_history(&mut self, count: usize) -> Vec<ScorePoint> {
        let start: i32 = 65 + self.rng.gen_range(0..10);

        (0..count)
            .map(|i| {
                let jitter: i32 = self.rng.gen_range(-5..5);
                let score = (start + 2 * i as i32 + jitter).clamp(50, 100);
                let class_average = (score - 5 - self.rng.gen_range(0..10)).max(40);
                ScorePoint::new(
                    format!("Day {}", 10 + i * 15),
                    score as u8,
                    class_average as u8,
                )
            })
            .collect()
    }
}
